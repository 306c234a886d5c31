//! Web Search Adapter
//!
//! Tier-3 evidence source with pluggable providers: Tavily, Brave Search,
//! and DuckDuckGo. The last-resort, broadest tier; its passages are trusted
//! as-is by the engine and never graded.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use meetmind_core::{AgentResult, EvidenceSource, SourceKind};

use crate::passage::clean_passage;
use crate::retry::fetch_with_retry;

/// A search result entry
#[derive(Debug, Clone)]
struct SearchHit {
    title: String,
    url: String,
    snippet: String,
}

/// Trait for pluggable search providers
#[async_trait]
trait SearchProvider: Send + Sync {
    /// Provider name for display
    fn name(&self) -> &str;

    /// Execute a search query
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, String>;
}

/// Tavily search provider (requires API key)
struct TavilyProvider {
    client: reqwest::Client,
    api_key: String,
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "Tavily"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, String> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "include_answer": false,
        });

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Tavily request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), err_body));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("failed to parse Tavily response: {}", e))?;

        let hits = data
            .get("results")
            .and_then(|r| r.as_array())
            .map(|arr| {
                arr.iter()
                    .map(|item| SearchHit {
                        title: str_field(item, "title"),
                        url: str_field(item, "url"),
                        snippet: str_field(item, "content"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(hits)
    }
}

/// Brave Search provider (requires API key)
struct BraveSearchProvider {
    client: reqwest::Client,
    api_key: String,
}

#[async_trait]
impl SearchProvider for BraveSearchProvider {
    fn name(&self) -> &str {
        "Brave Search"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, String> {
        let response = self
            .client
            .get("https://api.search.brave.com/res/v1/web/search")
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", &max_results.to_string())])
            .send()
            .await
            .map_err(|e| format!("Brave Search request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), err_body));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("failed to parse Brave Search response: {}", e))?;

        let hits = data
            .get("web")
            .and_then(|w| w.get("results"))
            .and_then(|r| r.as_array())
            .map(|arr| {
                arr.iter()
                    .map(|item| SearchHit {
                        title: str_field(item, "title"),
                        url: str_field(item, "url"),
                        snippet: str_field(item, "description"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(hits)
    }
}

/// DuckDuckGo instant answer provider (no API key required, limited results)
struct DuckDuckGoProvider {
    client: reqwest::Client,
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, String> {
        let response = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|e| format!("DuckDuckGo request failed: {}", e))?;

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("failed to parse DuckDuckGo response: {}", e))?;

        let mut hits = Vec::new();

        // Abstract (main result)
        if let Some(abstract_text) = data.get("AbstractText").and_then(|t| t.as_str()) {
            if !abstract_text.is_empty() {
                hits.push(SearchHit {
                    title: data
                        .get("Heading")
                        .and_then(|h| h.as_str())
                        .unwrap_or("Result")
                        .to_string(),
                    url: str_field(&data, "AbstractURL"),
                    snippet: abstract_text.to_string(),
                });
            }
        }

        // Related topics
        if let Some(topics) = data.get("RelatedTopics").and_then(|r| r.as_array()) {
            for topic in topics {
                if hits.len() >= max_results as usize {
                    break;
                }
                if let Some(text) = topic.get("Text").and_then(|t| t.as_str()) {
                    hits.push(SearchHit {
                        title: text.chars().take(80).collect::<String>(),
                        url: str_field(topic, "FirstURL"),
                        snippet: text.to_string(),
                    });
                }
            }
        }

        Ok(hits)
    }
}

fn str_field(value: &serde_json::Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Configuration for the web search adapter
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    /// Provider name: "tavily", "brave", or "duckduckgo"
    pub provider: String,
    /// API key, required for Tavily and Brave
    pub api_key: Option<String>,
    /// How many results to request per query (capped at 10)
    pub max_results: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            provider: "duckduckgo".to_string(),
            api_key: None,
            max_results: 5,
            timeout_seconds: 15,
        }
    }
}

/// Tier-3 adapter over a web search provider
pub struct WebSearchSource {
    provider: Box<dyn SearchProvider>,
    max_results: u32,
}

impl WebSearchSource {
    /// Create a new adapter with the configured provider.
    ///
    /// - `"tavily"` requires an API key
    /// - `"brave"` requires an API key
    /// - `"duckduckgo"` works without an API key (limited results)
    pub fn new(config: WebSearchConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("meetmind/0.1")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let api_key = config.api_key.as_deref().filter(|k| !k.is_empty());

        let provider: Box<dyn SearchProvider> = match config.provider.to_lowercase().as_str() {
            "tavily" => {
                let key = api_key.ok_or_else(|| "Tavily requires an API key".to_string())?;
                Box::new(TavilyProvider {
                    client,
                    api_key: key.to_string(),
                })
            }
            "brave" | "brave_search" => {
                let key = api_key.ok_or_else(|| "Brave Search requires an API key".to_string())?;
                Box::new(BraveSearchProvider {
                    client,
                    api_key: key.to_string(),
                })
            }
            "duckduckgo" | "" => Box::new(DuckDuckGoProvider { client }),
            other => {
                return Err(format!(
                    "Unknown search provider: '{}'. Supported: tavily, brave, duckduckgo",
                    other
                ))
            }
        };

        Ok(Self {
            provider,
            max_results: config.max_results.min(10),
        })
    }

    /// Get the name of the underlying search provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

/// Render one search hit as a self-contained passage.
fn hit_to_passage(hit: &SearchHit) -> String {
    if hit.url.is_empty() {
        clean_passage(&format!("{}: {}", hit.title, hit.snippet))
    } else {
        clean_passage(&format!("{} ({}): {}", hit.title, hit.url, hit.snippet))
    }
}

#[async_trait]
impl EvidenceSource for WebSearchSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Web
    }

    async fn fetch(&self, query: &str) -> AgentResult<Vec<String>> {
        // Strip control characters before handing the query to a provider.
        let query: String = query
            .chars()
            .filter(|c| !c.is_control() || *c == ' ')
            .collect();

        let passages = fetch_with_retry(self.kind(), || async {
            let hits = self.provider.search(&query, self.max_results).await?;
            Ok(hits
                .iter()
                .map(hit_to_passage)
                .filter(|p| !p.is_empty())
                .collect())
        })
        .await?;

        debug!(
            provider = self.provider.name(),
            count = passages.len(),
            "web search returned passages"
        );
        Ok(passages)
    }
}
