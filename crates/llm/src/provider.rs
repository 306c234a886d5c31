//! Completion Provider Trait
//!
//! Defines the common interface for all completion providers. The grader
//! and the answer generator both consume this contract, so any hosted or
//! local model can back them.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult, ProviderConfig};

/// Trait that all completion providers must implement.
///
/// A provider turns a prompt into a single completion. No streaming, no
/// tool calling: the pipeline needs exactly `complete(prompt) -> text`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Send a prompt and get the complete response text.
    async fn complete(&self, prompt: &str) -> LlmResult<String>;

    /// Check if the provider is healthy and reachable.
    ///
    /// For API providers, this validates the API key.
    /// For Ollama, this checks if the server is running.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Map a reqwest transport error onto the provider error taxonomy
pub fn map_transport_error(err: reqwest::Error, timeout_seconds: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout_seconds,
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}
