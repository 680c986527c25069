use std::time::Duration;

use crate::error_handler::{ConfigError, validate_http_endpoint};

/// Default Ollama endpoint when neither `OLLAMA_URL` nor `OLLAMA_PORT` is set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "llama2:latest";

/// Uniform request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the chat model invocation.
///
/// # Fields
///
/// - `endpoint`: The inference endpoint base URL (e.g. `http://localhost:11434`).
/// - `model`: The model identifier (e.g. `"llama2:latest"`, `"mistral"`).
/// - `timeout_secs`: Request timeout in seconds, applied to every call.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::chat_model_config::ChatModelConfig;
///
/// let cfg = ChatModelConfig::new("http://localhost:11434", "llama2:latest");
/// assert_eq!(cfg.timeout_secs, 60);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatModelConfig {
    /// Inference endpoint base URL, without the `/api/chat` suffix.
    pub endpoint: String,

    /// Model identifier string.
    pub model: String,

    /// Request timeout (in seconds).
    pub timeout_secs: u64,
}

impl ChatModelConfig {
    /// Creates a config with the default 60 second timeout.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Endpoint with any trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates config values.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if the endpoint is not http/https
    /// - [`ConfigError::EmptyModel`] if the model name is blank
    /// - [`ConfigError::InvalidNumber`] if the timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_endpoint("OLLAMA_URL", &self.endpoint)?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "LLM_TIMEOUT_SECS",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

impl Default for ChatModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}
