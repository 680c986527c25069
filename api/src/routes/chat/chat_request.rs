use ai_llm_service::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error_handler::AppError;

/// Request payload for /chat and /chat/rag.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's new message.
    pub message: String,
}

/// Request payload for /chat/history.
#[derive(Debug, Deserialize)]
pub struct ChatHistoryRequest {
    /// The user's new message, sent after the history.
    pub message: String,
    /// Earlier turns, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Response payload for every chat route.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// Assistant text, or a placeholder when the completion failed.
    pub reply: String,
}

/// Rejects blank messages before anything is sent upstream.
pub fn require_message(message: &str) -> Result<&str, AppError> {
    if message.trim().is_empty() {
        Err(AppError::BadRequest("`message` must not be empty".into()))
    } else {
        Ok(message)
    }
}
