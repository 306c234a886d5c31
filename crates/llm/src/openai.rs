//! OpenAI Provider
//!
//! Implementation of the CompletionProvider trait for OpenAI's chat
//! completions API. Works against any OpenAI-compatible endpoint via
//! `ProviderConfig::base_url`.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{
    map_transport_error, missing_api_key_error, parse_http_error, CompletionProvider,
};
use super::types::{LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI provider
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout_seconds);
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        })
    }

    fn api_key(&self) -> LlmResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing_api_key_error(self.name()))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let api_key = self.api_key()?;
        let body = self.build_request_body(prompt);

        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &err_body, self.name()));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                message: format!("failed to parse completion: {}", e),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                message: "completion contained no choices".to_string(),
            })
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self.api_key()?;

        // Models listing is the cheapest authenticated endpoint.
        let models_url = self
            .base_url()
            .replace("/chat/completions", "/models");

        let response = self
            .client
            .get(&models_url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &err_body, self.name()));
        }

        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
