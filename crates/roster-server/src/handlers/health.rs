//! Liveness/readiness probe

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.directory.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "db": "connected" })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
        }
    }
}
