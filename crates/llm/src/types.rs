//! Shared provider types
//!
//! Error taxonomy and configuration for LLM completion providers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from LLM provider calls
#[derive(Debug, Error)]
pub enum LlmError {
    /// Invalid or missing API credentials
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Provider-side rate limiting
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },

    /// Provider-side server error (5xx)
    #[error("Server error: {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },

    /// Connection-level failure (DNS, refused, reset)
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// The request exceeded its deadline
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The configured model does not exist on the provider
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    /// Malformed request rejected by the provider
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Response body could not be interpreted
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Anything else
    #[error("{message}")]
    Other { message: String },
}

/// Result type for provider operations
pub type LlmResult<T> = Result<T, LlmError>;

impl LlmError {
    /// Whether a single immediate retry is worth attempting. Auth,
    /// model, and request-shape errors will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout { .. }
                | LlmError::NetworkError { .. }
                | LlmError::ServerError { .. }
                | LlmError::RateLimited { .. }
        )
    }
}

/// Configuration for a completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Model identifier, e.g. "gpt-4o" or "llama3.1:8b"
    pub model: String,
    /// API key (None for local providers)
    pub api_key: Option<String>,
    /// Override the provider's default endpoint
    pub base_url: Option<String>,
    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.0
}

fn default_timeout_seconds() -> u64 {
    60
}

impl ProviderConfig {
    /// Config for the given model with all defaults
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the endpoint base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}
