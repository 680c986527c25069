//! Ollama chat client for the career chat backend.
//!
//! - [`ChatCompletionClient`] sends plain, history-aware and document-context
//!   chat completions to `POST {endpoint}/api/chat`.
//! - [`PdfDocument`] provides the document context (full PDF text, read per call).
//! - [`HealthService`] probes the endpoint for `/health`.
//! - [`render_reply`] turns a completion result into the user-facing string.

pub mod chat_message;
pub mod config;
pub mod document;
pub mod error_handler;
pub mod health_service;
pub mod prompt;
pub mod services;
pub mod telemetry;

pub use chat_message::{ChatMessage, Sender};
pub use config::chat_model_config::ChatModelConfig;
pub use document::{DocumentSource, PdfDocument};
pub use error_handler::{ChatError, ConfigError, DocumentError, render_reply};
pub use health_service::{HealthService, HealthStatus};
pub use services::ollama_service::ChatCompletionClient;
