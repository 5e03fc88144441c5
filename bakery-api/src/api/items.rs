//! Bakery catalogue routes.
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/seed | POST | Insert the sample catalogue into an empty collection |
//! | /api/items | GET | List every bakery item |

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use bakery_store::query::Filter;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ApiResult,
    json::with_public_id,
    schemas::Collection,
    seed::sample_items,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/seed", post(seed_items))
        .route("/api/items", get(list_items))
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

async fn seed_items(State(state): State<AppState>) -> ApiResult<Json<SeedResponse>> {
    let existing = state
        .db
        .get_documents(Collection::BakeryItem.name(), Filter::all(), Some(1))
        .await?;

    if !existing.is_empty() {
        return Ok(Json(SeedResponse {
            status: "ok",
            message: Some("Items already seeded"),
            count: None,
        }));
    }

    let samples = sample_items();
    for item in &samples {
        state.db.insert(item).await?;
    }
    tracing::info!(count = samples.len(), "Seeded bakery items");

    Ok(Json(SeedResponse {
        status: "ok",
        message: None,
        count: Some(samples.len()),
    }))
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    items: Vec<Value>,
}

async fn list_items(State(state): State<AppState>) -> ApiResult<Json<ItemsResponse>> {
    let items = state
        .db
        .get_documents(Collection::BakeryItem.name(), Filter::all(), None)
        .await?
        .into_iter()
        .map(with_public_id)
        .collect();

    Ok(Json(ItemsResponse { items }))
}
