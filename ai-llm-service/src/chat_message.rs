//! Conversation history entries and the `/api/chat` wire payloads.

use serde::{Deserialize, Serialize};

/// Who wrote a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Role string used by the chat endpoint.
    pub fn role(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// One entry of the caller's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub message: String,
}

impl ChatMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            message: message.into(),
        }
    }
}

/* ==========================
HTTP payloads
========================== */

/// Role-tagged entry of the request `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a ChatMessage> for RoleMessage<'a> {
    fn from(m: &'a ChatMessage) -> Self {
        Self {
            role: m.sender.role(),
            content: &m.message,
        }
    }
}

/// Request body for `/api/chat` (non-streaming).
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
    pub messages: Vec<RoleMessage<'a>>,
}

impl<'a> CompletionRequest<'a> {
    /// Single user entry.
    pub fn single(model: &'a str, user_message: &'a str) -> Self {
        Self {
            model,
            stream: false,
            messages: vec![RoleMessage {
                role: Sender::User.role(),
                content: user_message,
            }],
        }
    }

    /// History entries in order, then the new user message last.
    pub fn with_history(model: &'a str, history: &'a [ChatMessage], user_message: &'a str) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend(history.iter().map(RoleMessage::from));
        messages.push(RoleMessage {
            role: Sender::User.role(),
            content: user_message,
        });

        Self {
            model,
            stream: false,
            messages,
        }
    }
}

/// Response body for `/api/chat`.
///
/// Only `message.content` is consumed. Every level is optional so that a
/// missing field can be told apart from a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    /// `None` when the key is absent, `Some(None)` when it is `null`.
    #[serde(default, deserialize_with = "present_or_null")]
    pub content: Option<Option<String>>,
}

fn present_or_null<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}
