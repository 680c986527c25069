//! Default chat configs loaded from environment variables.
//!
//! Every value has a default, so an empty environment yields a working local
//! setup (`http://localhost:11434`, `llama2:latest`, 60s timeout,
//! `Documents/career-profiles.pdf`).
//!
//! # Environment variables
//!
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint
//! - `OLLAMA_MODEL`               = chat model
//! - `LLM_TIMEOUT_SECS`           = request timeout (u64, seconds)
//! - `CAREER_DOCUMENT_PATH`       = PDF used as document context
//!
//! Loaders take a lookup function so they can be driven by a map in tests;
//! the `*_from_env` variants plug in the process environment.

use std::path::PathBuf;

use crate::{
    config::chat_model_config::{
        ChatModelConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    },
    error_handler::{ConfigError, env_opt},
};

/// Default location of the career profiles PDF, relative to the working directory.
pub const DEFAULT_DOCUMENT_PATH: &str = "Documents/career-profiles.pdf";

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_ENDPOINT`]
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("OLLAMA_URL") {
        return Ok(url.trim().to_string());
    }
    if let Some(port) = lookup("OLLAMA_PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_ENDPOINT.to_string())
}

/// Builds and validates a [`ChatModelConfig`] from the given lookup.
///
/// # Errors
/// Any [`ConfigError`] from parsing or [`ChatModelConfig::validate`].
pub fn chat_config_with<F>(lookup: F) -> Result<ChatModelConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint = ollama_endpoint(&lookup)?;
    let model = lookup("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "LLM_TIMEOUT_SECS",
                reason: "expected u64",
            })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    let cfg = ChatModelConfig {
        endpoint,
        model: model.trim().to_string(),
        timeout_secs,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// [`chat_config_with`] over the process environment.
pub fn chat_config_from_env() -> Result<ChatModelConfig, ConfigError> {
    chat_config_with(env_opt)
}

/// Resolves the document path (`CAREER_DOCUMENT_PATH` or the default).
pub fn document_path_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("CAREER_DOCUMENT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_PATH))
}

pub fn document_path_from_env() -> PathBuf {
    document_path_with(env_opt)
}
