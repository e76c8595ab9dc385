use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::handlers::AppState;

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: ready only once the model is loaded
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.estimator.model_state().load_error() {
        None => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "model_loaded": true })),
        ),
        Some(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "model_loaded": false,
                "error": err.to_string(),
            })),
        ),
    }
}
