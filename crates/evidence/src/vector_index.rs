//! Private Vector Index Adapter
//!
//! Tier-1 evidence source. The document index (meeting notes, project
//! docs) is an opaque HTTP collaborator exposing a ranked similarity
//! search: `POST {base}/query {"query", "topK"}` -> `{"matches":
//! [{"text", "score"}, ...]}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use meetmind_core::{AgentResult, EvidenceSource, SourceKind};

use crate::passage::clean_passage;
use crate::retry::fetch_with_retry;

/// Configuration for the private index adapter
#[derive(Debug, Clone)]
pub struct VectorIndexConfig {
    /// Index service base URL
    pub base_url: String,
    /// Optional API key, sent as `Api-Key` header
    pub api_key: Option<String>,
    /// How many passages to request per query
    pub top_k: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl VectorIndexConfig {
    /// Config for the given endpoint with default limits
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            top_k: 5,
            timeout_seconds: 10,
        }
    }
}

/// Tier-1 adapter over the private document index
pub struct VectorIndexSource {
    config: VectorIndexConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<IndexMatch>,
}

#[derive(Debug, Deserialize)]
struct IndexMatch {
    text: String,
}

impl VectorIndexSource {
    /// Create a new adapter for the configured index service
    pub fn new(config: VectorIndexConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    async fn fetch_once(&self, query: &str) -> Result<Vec<String>, String> {
        let url = format!("{}/query", self.config.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "query": query,
            "topK": self.config.top_k,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.header("Api-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("index request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), err_body));
        }

        let data: QueryResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to parse index response: {}", e))?;

        Ok(data
            .matches
            .into_iter()
            .map(|m| clean_passage(&m.text))
            .filter(|p| !p.is_empty())
            .collect())
    }
}

#[async_trait]
impl EvidenceSource for VectorIndexSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Primary
    }

    async fn fetch(&self, query: &str) -> AgentResult<Vec<String>> {
        let passages = fetch_with_retry(self.kind(), || self.fetch_once(query)).await?;
        debug!(count = passages.len(), "private index returned passages");
        Ok(passages)
    }
}
