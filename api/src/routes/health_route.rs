use std::sync::Arc;

use ai_llm_service::HealthStatus;
use axum::{Json, extract::State, http::StatusCode};

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// `200` when Ollama is up and the model is listed, `503` otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.health.check().await;
    let code = if status.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}
