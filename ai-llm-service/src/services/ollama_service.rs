//! Thin chat-completion client for the local Ollama API.
//!
//! One endpoint is used: `POST {endpoint}/api/chat` with `stream=false`.
//! Three entry points share the same request/response cycle:
//! - [`ChatCompletionClient::simple_complete`]                 — one user message
//! - [`ChatCompletionClient::complete_with_history`]           — history + new message
//! - [`ChatCompletionClient::complete_with_document_context`]  — whole document in the prompt
//!
//! Every call is a single request bounded by the configured timeout (60s by
//! default). There is no retry and no streaming.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::{ChatCompletionClient, ChatModelConfig, PdfDocument, render_reply};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ChatModelConfig::new("http://localhost:11434", "llama2:latest");
//! let client = ChatCompletionClient::new(cfg, PdfDocument::new("Documents/career-profiles.pdf"))?;
//!
//! let reply = render_reply(client.simple_complete("Hello!").await);
//! println!("{reply}");
//! # Ok(()) }
//! ```

use std::time::Instant;

use tracing::{debug, error, info, instrument, warn};

use crate::chat_message::{ChatMessage, CompletionRequest, CompletionResponse};
use crate::config::chat_model_config::ChatModelConfig;
use crate::document::DocumentSource;
use crate::error_handler::{ChatError, ConfigError, Result, make_snippet};
use crate::prompt::career_prompt;

/// Chat client bound to one endpoint, one model and one document source.
///
/// Construct once and share (e.g. behind `Arc`); the inner `reqwest::Client`
/// pools connections and is safe for concurrent use.
#[derive(Debug)]
pub struct ChatCompletionClient<D> {
    client: reqwest::Client,
    cfg: ChatModelConfig,
    url_chat: String,
    document: D,
}

impl<D: DocumentSource> ChatCompletionClient<D> {
    /// Creates a new client from the given config and document source.
    ///
    /// # Errors
    /// - any [`ConfigError`] from [`ChatModelConfig::validate`]
    /// - [`ConfigError::Client`] if the HTTP client cannot be built
    pub fn new(cfg: ChatModelConfig, document: D) -> std::result::Result<Self, ConfigError> {
        cfg.validate()?;

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let url_chat = format!("{}/api/chat", cfg.base_url());

        info!(
            endpoint = %cfg.endpoint,
            model = %cfg.model,
            timeout_secs = cfg.timeout_secs,
            "ChatCompletionClient initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            document,
        })
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Sends a single user message.
    ///
    /// # Errors
    /// See [`ChatError`]; use [`crate::render_reply`] for the user-facing string.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn simple_complete(&self, user_message: &str) -> Result<String> {
        debug!(chars = user_message.len(), "simple completion");
        let body = CompletionRequest::single(&self.cfg.model, user_message);
        self.send(&body).await
    }

    /// Sends the conversation history followed by the new user message.
    ///
    /// History order is preserved; `Sender::User` maps to `"user"`, anything
    /// else to `"assistant"`.
    #[instrument(skip_all, fields(model = %self.cfg.model, history = history.len()))]
    pub async fn complete_with_history(
        &self,
        user_message: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        debug!(chars = user_message.len(), "completion with history");
        let body = CompletionRequest::with_history(&self.cfg.model, history, user_message);
        self.send(&body).await
    }

    /// Loads the document, inlines it into the career prompt and sends it as
    /// one user message.
    ///
    /// # Errors
    /// [`ChatError::Document`] if the document cannot be read or parsed, plus
    /// everything [`ChatCompletionClient::simple_complete`] can return.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn complete_with_document_context(&self, user_message: &str) -> Result<String> {
        let document = self.document.load_text().await?;
        let prompt = career_prompt(&document, user_message);
        info!(prompt_chars = prompt.chars().count(), "sending document-context prompt");

        let body = CompletionRequest::single(&self.cfg.model, &prompt);
        self.send(&body).await
    }

    async fn send(&self, body: &CompletionRequest<'_>) -> Result<String> {
        debug!(messages = body.messages.len(), "POST {}", self.url_chat);
        let start = Instant::now();

        let resp = self
            .client
            .post(&self.url_chat)
            .json(body)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "chat request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(
                url = %self.url_chat,
                %status,
                %snippet,
                latency_ms = start.elapsed().as_millis(),
                "chat returned non-success status"
            );
            return Err(ChatError::HttpStatus {
                status,
                url: self.url_chat.clone(),
                snippet,
            });
        }

        let text = resp.text().await?;
        let content = extract_content(&text)
            .inspect_err(|e| warn!(error = %e, "unusable chat response"))?;

        info!(
            latency_ms = start.elapsed().as_millis(),
            reply_chars = content.chars().count(),
            "chat response received"
        );
        Ok(content)
    }
}

/// Pulls `message.content` out of a `/api/chat` response body.
///
/// - body not JSON                         → [`ChatError::Decode`]
/// - no `message` or no `content` key      → [`ChatError::NoValidResponse`]
/// - `content` null or `""`                → [`ChatError::EmptyContent`]
///
/// Whitespace-only content is a reply like any other and comes back as is.
pub(crate) fn extract_content(body: &str) -> Result<String> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| ChatError::Decode(e.to_string()))?;

    match parsed.message.and_then(|m| m.content) {
        None => Err(ChatError::NoValidResponse),
        Some(Some(content)) if !content.is_empty() => Ok(content),
        Some(_) => Err(ChatError::EmptyContent),
    }
}
