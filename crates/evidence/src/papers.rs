//! Academic Paper Search Adapter
//!
//! Tier-2 evidence source, backed by the Semantic Scholar Graph API.
//! Passages are "title. abstract" so each result stands on its own for
//! grading and generation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use meetmind_core::{AgentResult, EvidenceSource, SourceKind};

use crate::passage::clean_passage;
use crate::retry::fetch_with_retry;

/// Default paper search endpoint
const PAPER_SEARCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";

/// Configuration for the paper search adapter
#[derive(Debug, Clone)]
pub struct PaperSearchConfig {
    /// Override the default endpoint
    pub base_url: Option<String>,
    /// Optional API key, sent as `x-api-key` header
    pub api_key: Option<String>,
    /// How many papers to request per query
    pub limit: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PaperSearchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            limit: 5,
            timeout_seconds: 15,
        }
    }
}

/// Tier-2 adapter over the academic paper index
pub struct PaperSearchSource {
    config: PaperSearchConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PaperSearchResponse {
    #[serde(default)]
    data: Vec<PaperEntry>,
}

#[derive(Debug, Deserialize)]
struct PaperEntry {
    title: Option<String>,
    #[serde(rename = "abstract")]
    summary: Option<String>,
}

impl PaperSearchSource {
    /// Create a new adapter with the given configuration
    pub fn new(config: PaperSearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(PAPER_SEARCH_URL)
    }

    async fn fetch_once(&self, query: &str) -> Result<Vec<String>, String> {
        let mut request = self.client.get(self.base_url()).query(&[
            ("query", query),
            ("limit", &self.config.limit.to_string()),
            ("fields", "title,abstract"),
        ]);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("paper search request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), err_body));
        }

        let data: PaperSearchResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to parse paper search response: {}", e))?;

        Ok(data.data.into_iter().filter_map(paper_to_passage).collect())
    }
}

/// Render one paper as a passage; papers without an abstract are skipped
/// because a bare title is not self-contained evidence.
fn paper_to_passage(entry: PaperEntry) -> Option<String> {
    let summary = entry.summary.filter(|s| !s.trim().is_empty())?;
    let passage = match entry.title.filter(|t| !t.trim().is_empty()) {
        Some(title) => format!("{}. {}", title.trim(), summary),
        None => summary,
    };
    Some(clean_passage(&passage)).filter(|p| !p.is_empty())
}

#[async_trait]
impl EvidenceSource for PaperSearchSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Papers
    }

    async fn fetch(&self, query: &str) -> AgentResult<Vec<String>> {
        let passages = fetch_with_retry(self.kind(), || self.fetch_once(query)).await?;
        debug!(count = passages.len(), "paper search returned passages");
        Ok(passages)
    }
}
