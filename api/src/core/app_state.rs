use ai_llm_service::{
    ChatCompletionClient, ChatModelConfig, ConfigError, HealthService, PdfDocument,
    config::default_config::{chat_config_from_env, document_path_from_env},
};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Chat client for the configured Ollama endpoint and career document.
    pub chat: ChatCompletionClient<PdfDocument>,
    /// Probe for `/health`.
    pub health: HealthService,
}

impl AppState {
    /// Builds the state from an explicit config and document.
    pub fn new(cfg: ChatModelConfig, document: PdfDocument) -> Result<Self, ConfigError> {
        Ok(Self {
            health: HealthService::new(cfg.clone())?,
            chat: ChatCompletionClient::new(cfg, document)?,
        })
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = chat_config_from_env()?;
        let document = PdfDocument::new(document_path_from_env());
        Self::new(cfg, document)
    }
}
