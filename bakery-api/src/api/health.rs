//! Liveness and database diagnostics.
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | / | GET | Static acknowledgment |
//! | /test | GET | Database connectivity report |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{database::DatabaseStatus, state::AppState};

const MAX_REASON_CHARS: usize = 80;
const MAX_COLLECTIONS: usize = 10;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    message: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Bakery backend is running",
    })
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    backend: &'static str,
    database: String,
    /// Only reported when a client exists
    database_url: Option<&'static str>,
    database_name: Option<&'static str>,
    connection_status: &'static str,
    collections: Vec<String>,
}

fn truncate(reason: &str) -> String {
    reason.chars().take(MAX_REASON_CHARS).collect()
}

fn set_flag(value: &Option<String>) -> Option<&'static str> {
    Some(if value.is_some() { "✅ Set" } else { "❌ Not Set" })
}

/// Always answers 200; failures are reported in the `database` field.
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "✅ Running",
        database: String::new(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected",
        collections: Vec::new(),
    };

    match state.db.probe().await {
        DatabaseStatus::Unconfigured => {
            response.database = "⚠️  Available but not initialized".to_string();
        }
        DatabaseStatus::Unavailable(reason) => {
            response.database = format!("❌ Error: {}", truncate(&reason));
        }
        DatabaseStatus::Failing(reason) => {
            tracing::warn!(error = %reason, "Database probe failed");
            response.database_url = set_flag(&state.config.database_url);
            response.database_name = set_flag(&state.config.database_name);
            response.database = format!("⚠️  Connected but Error: {}", truncate(&reason));
        }
        DatabaseStatus::Connected(names) => {
            response.database_url = set_flag(&state.config.database_url);
            response.database_name = set_flag(&state.config.database_name);
            response.collections = names.into_iter().take(MAX_COLLECTIONS).collect();
            response.connection_status = "Connected";
            response.database = "✅ Connected & Working".to_string();
        }
    }

    Json(response)
}
