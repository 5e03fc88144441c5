use axum::{
    Router,
    http::{HeaderName, HeaderValue, Request},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::state::AppState;

pub mod health;
pub mod items;
pub mod orders;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a UUID v4 for requests that arrive without an id.
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, without middleware or state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(items::router())
        .merge(orders::router())
}

/// The complete application, used by the server and by in-process tests.
pub fn build_app(state: AppState) -> Router {
    build_router()
        // Copies the request id onto the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Outermost, so every inner layer sees the id
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
