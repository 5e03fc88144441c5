use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::Serialize;

use crate::{error::ApiResult, schemas::CreateOrderRequest, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/orders", post(create_order))
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    status: &'static str,
    order_id: String,
}

/// Validates the order completely before touching the store.
async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<Json<CreateOrderResponse>> {
    let Json(payload) = payload?;
    let order = payload.into_order()?;

    let order_id = state.db.insert(&order).await?;
    tracing::info!(order_id = %order_id, items = order.items.len(), "Order created");

    Ok(Json(CreateOrderResponse {
        status: "ok",
        order_id,
    }))
}
