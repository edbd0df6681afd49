//! Health endpoints.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::error::{ApiError, ErrorCode};
use crate::response::ok;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/db", get(health_db))
}

/// GET /health - process liveness.
async fn health() -> Response {
    ok("Service healthy", json!({ "status": "ok" }))
}

/// GET /health/db - database reachability.
async fn health_db(State(state): State<AppState>) -> Result<Response, ApiError> {
    if state.db.health_check().await {
        Ok(ok("Database healthy", json!({ "status": "ok" })))
    } else {
        Err(ApiError::new(
            ErrorCode::Unavailable,
            "database is unreachable",
        ))
    }
}
