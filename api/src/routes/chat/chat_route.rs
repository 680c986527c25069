//! POST /chat, /chat/history, /chat/rag — completions rendered as reply strings.
//!
//! Upstream failures still answer `200` with a placeholder reply; only
//! malformed requests get an error status.

use std::sync::Arc;

use ai_llm_service::render_reply;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatHistoryRequest, ChatRequest, ChatResponse, require_message},
};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"Hello!"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let message = require_message(&body.message)?;
    info!(chars = message.len(), "POST /chat");

    let reply = render_reply(state.chat.simple_complete(message).await);
    Ok(Json(ChatResponse { reply }))
}

/// Handler: POST /chat/history
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chat/history \
///   -H 'content-type: application/json' \
///   -d '{"message":"And outdoors?","history":[{"sender":"User","message":"I like biology"},{"sender":"Assistant","message":"Try nursing."}]}'
/// ```
pub async fn chat_with_history(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatHistoryRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let message = require_message(&body.message)?;
    info!(chars = message.len(), history = body.history.len(), "POST /chat/history");

    let reply = render_reply(state.chat.complete_with_history(message, &body.history).await);
    Ok(Json(ChatResponse { reply }))
}

/// Handler: POST /chat/rag
///
/// Answers using the whole career profiles document as context.
pub async fn chat_with_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let message = require_message(&body.message)?;
    info!(
        chars = message.len(),
        document = %state.chat.document().path().display(),
        "POST /chat/rag"
    );

    let reply = render_reply(state.chat.complete_with_document_context(message).await);
    Ok(Json(ChatResponse { reply }))
}
