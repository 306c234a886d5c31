//! Ollama Provider
//!
//! Implementation of the CompletionProvider trait for a local Ollama
//! server via the non-streaming `/api/generate` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{map_transport_error, parse_http_error, CompletionProvider};
use super::types::{LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Ollama server address
const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama provider for local inference
pub struct OllamaProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout_seconds);
        Self { config, client }
    }

    /// Get the server base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OLLAMA_BASE_URL)
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.base_url());
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &err_body, self.name()));
        }

        let generated: GenerateResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                message: format!("failed to parse generate response: {}", e),
            })?;

        Ok(generated.response)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let url = format!("{}/api/tags", self.base_url());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::ServerError {
                message: format!("Ollama server returned {}", status.as_u16()),
                status: Some(status.as_u16()),
            });
        }

        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
