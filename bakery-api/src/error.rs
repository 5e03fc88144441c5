//! API error type and its HTTP rendering.
//!
//! Every failure is rendered as `{"detail": "<message>"}`. Storage failures are logged here so
//! handlers can propagate them with `?`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bakery_store::error::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::schemas::{OrderRequestError, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    /// A payload violated declared constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Malformed body or item shape.
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrderRequestError> for ApiError {
    fn from(err: OrderRequestError) -> Self {
        match err {
            OrderRequestError::Invalid(validation) => ApiError::Validation(validation),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(err) = &self {
            tracing::error!(error = %err, "Storage operation failed");
        }

        (self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
