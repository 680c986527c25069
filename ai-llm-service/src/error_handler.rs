//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes the chat error type [`ChatError`] returned by every
//! completion call, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`DocumentError`]). Small helpers for reading/validating
//! environment values are provided and return [`ConfigError`] directly.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.
//!
//! Errors are never rendered for end users here. The caller decides how to show
//! them; [`ChatError::placeholder`] and [`render_reply`] reproduce the fixed
//! placeholder strings of the chat surface.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Placeholder strings                                                       */
/* ------------------------------------------------------------------------- */

/// Returned when the endpoint answers with a non-success HTTP status.
pub const COMMUNICATION_ERROR_REPLY: &str = "Error communicating with Ollama";

/// Returned when the response JSON lacks `message` or `message.content`.
pub const NO_VALID_RESPONSE_REPLY: &str = "No valid response";

/// Returned when `message.content` is present but null or empty.
pub const EMPTY_CONTENT_REPLY: &str = "No response";

/// Prefix for every other failure (transport, decode, document).
pub const ERROR_REPLY_PREFIX: &str = "Error: ";

/* ------------------------------------------------------------------------- */
/* Chat errors                                                               */
/* ------------------------------------------------------------------------- */

/// Result alias for chat completion calls.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Error returned by [`crate::ChatCompletionClient`] operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ChatError {
    /// Underlying HTTP transport error (connect failure, timeout, body read).
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response body was not valid JSON.
    #[error("[AI LLM Service] failed to decode response: {0}")]
    Decode(String),

    /// Response JSON had no `message` object or no `content` field.
    #[error("[AI LLM Service] response has no `message.content` field")]
    NoValidResponse,

    /// `message.content` was present but null or empty.
    #[error("[AI LLM Service] response `message.content` is empty")]
    EmptyContent,

    /// The document context could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ChatError {
    /// Renders the error as the fixed placeholder string shown to the user.
    ///
    /// - [`ChatError::HttpStatus`] → [`COMMUNICATION_ERROR_REPLY`] (the status is only logged)
    /// - [`ChatError::NoValidResponse`] → [`NO_VALID_RESPONSE_REPLY`]
    /// - [`ChatError::EmptyContent`] → [`EMPTY_CONTENT_REPLY`]
    /// - anything else → `"Error: "` followed by the underlying cause
    pub fn placeholder(&self) -> String {
        match self {
            ChatError::HttpStatus { .. } => COMMUNICATION_ERROR_REPLY.to_string(),
            ChatError::NoValidResponse => NO_VALID_RESPONSE_REPLY.to_string(),
            ChatError::EmptyContent => EMPTY_CONTENT_REPLY.to_string(),
            ChatError::Transport(e) => format!("{ERROR_REPLY_PREFIX}{e}"),
            ChatError::Decode(reason) => format!("{ERROR_REPLY_PREFIX}{reason}"),
            ChatError::Document(e) => format!("{ERROR_REPLY_PREFIX}{}", e.cause()),
        }
    }
}

/// Collapses a completion result into the reply string for the user.
///
/// Never fails: errors become their [`ChatError::placeholder`].
pub fn render_reply(result: Result<String>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => err.placeholder(),
    }
}

/* ------------------------------------------------------------------------- */
/* Document errors                                                           */
/* ------------------------------------------------------------------------- */

/// Error enum for loading the document context.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read (missing, permissions, ...).
    #[error("[AI LLM Service] cannot read document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed into text.
    #[error("[AI LLM Service] cannot extract text from {path:?}: {reason}")]
    Extract { path: PathBuf, reason: String },

    /// The blocking extraction task panicked or was cancelled.
    #[error("[AI LLM Service] document extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl DocumentError {
    /// Short cause without the log attribution suffix.
    fn cause(&self) -> String {
        match self {
            DocumentError::Io { path, source } => {
                format!("{source} ({})", path.display())
            }
            DocumentError::Extract { reason, .. } => reason.clone(),
            DocumentError::Join(e) => e.to_string(),
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like ports, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_TIMEOUT_SECS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// The HTTP client could not be built from the config.
    #[error("[AI LLM Service] cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Cuts a response body down to a short single-line snippet for errors/logs.
pub fn make_snippet(text: &str) -> String {
    text.trim()
        .chars()
        .take(240)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
