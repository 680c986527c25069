//! Health probe for the Ollama backend.
//!
//! `GET {endpoint}/api/tags` plus a best-effort check that the configured
//! model is listed. The returned [`HealthStatus`] is JSON-serializable and
//! suitable for a `/health` endpoint. [`HealthService::check`] never fails
//! (errors are mapped to `ok=false`); [`HealthService::try_probe`] is strict.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::chat_model_config::ChatModelConfig;
use crate::error_handler::{ChatError, ConfigError, make_snippet};

/// Timeout for the probe; much shorter than a completion.
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A serializable health snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model the chat client is configured with.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &ChatModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker that reuses one HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    cfg: ChatModelConfig,
}

impl HealthService {
    /// Creates a health service for the given chat config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Client`] if the HTTP client cannot be built.
    pub fn new(cfg: ChatModelConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_PROBE_TIMEOUT)
            .build()?;

        info!(
            endpoint = %cfg.endpoint,
            timeout_secs = DEFAULT_PROBE_TIMEOUT.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client, cfg })
    }

    /// Runs the probe; any failure becomes `HealthStatus { ok: false, .. }`.
    pub async fn check(&self) -> HealthStatus {
        let start = Instant::now();
        match self.try_probe().await {
            Ok(status) => {
                info!(
                    endpoint = %status.endpoint,
                    model = %status.model,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::new(&self.cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Strict probe. Returns an error on transport failures and non-2xx status.
    pub async fn try_probe(&self) -> Result<HealthStatus, ChatError> {
        let url = format!("{}/api/tags", self.cfg.base_url());
        let start = Instant::now();
        debug!(model = %self.cfg.model, "GET {}", url);

        let resp = self.client.get(&url).send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%url, %status, %snippet, latency_ms = latency, "health GET /api/tags returned non-success status");
            return Err(ChatError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        // Expected minimal JSON: { "models": [ { "name": "<model>" }, ... ] }
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let status = match resp.json::<Tags>().await {
            Ok(Tags {
                models: Some(models),
            }) => {
                if models.iter().any(|m| m.name == self.cfg.model) {
                    HealthStatus::new(&self.cfg, true, latency, "Ollama is healthy; model is available")
                } else {
                    HealthStatus::new(
                        &self.cfg,
                        false,
                        latency,
                        "Ollama is up, but model not found in /api/tags",
                    )
                }
            }
            Ok(Tags { models: None }) => HealthStatus::new(
                &self.cfg,
                true,
                latency,
                "Ollama is healthy; tags response without `models` field",
            ),
            Err(e) => {
                warn!(error = %e, "failed to decode /api/tags; treating server as reachable");
                HealthStatus::new(
                    &self.cfg,
                    true,
                    latency,
                    format!("Ollama is reachable; failed to decode /api/tags: {e}"),
                )
            }
        };
        Ok(status)
    }
}
