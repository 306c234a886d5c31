//! LLM Relevance Grader
//!
//! Judges one (query, passage) pair per call with a fixed yes/no prompt.
//! Provider errors and unparseable output surface as `GradingFailed`; the
//! engine handles both fail-closed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use meetmind_core::{AgentError, AgentResult, RelevanceGrader, Verdict};
use meetmind_llm::CompletionProvider;

/// Prompt template for grading passage relevance.
const GRADER_PROMPT: &str = r#"You are a grader assessing whether a retrieved passage is relevant to a user's question. The passage does not need to answer the question completely; it is relevant if it contains information that helps answer it.

QUESTION:
{question}

PASSAGE:
{passage}

Respond in JSON with a single key "score" whose value is "yes" if the passage is relevant or "no" if it is not:
{"score": "yes"}

JSON OUTPUT:"#;

/// Grades passages by asking a completion provider for a yes/no score.
pub struct LlmRelevanceGrader {
    provider: Arc<dyn CompletionProvider>,
}

impl LlmRelevanceGrader {
    /// Create a new grader backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    async fn complete_with_retry(&self, prompt: &str) -> AgentResult<String> {
        match self.provider.complete(prompt).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_transient() => {
                warn!(error = %e, "grading call failed, retrying once");
                self.provider
                    .complete(prompt)
                    .await
                    .map_err(|e| AgentError::grading_failed(e.to_string()))
            }
            Err(e) => Err(AgentError::grading_failed(e.to_string())),
        }
    }
}

#[async_trait]
impl RelevanceGrader for LlmRelevanceGrader {
    async fn grade(&self, query: &str, passage: &str) -> AgentResult<Verdict> {
        let prompt = GRADER_PROMPT
            .replace("{question}", query)
            .replace("{passage}", passage);

        let response = self.complete_with_retry(&prompt).await?;
        parse_verdict(&response)
    }
}

/// Extract the `{"score": ...}` object from a model response that may wrap
/// it in prose or a markdown fence.
fn extract_json(response: &str) -> Option<&str> {
    let trimmed = response.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start <= end).then(|| &trimmed[start..=end])
}

/// Parse a grader response into a verdict. Anything that is not a clear
/// yes/no is a grading failure; the engine treats that as not relevant.
fn parse_verdict(response: &str) -> AgentResult<Verdict> {
    let json_str = extract_json(response)
        .ok_or_else(|| AgentError::grading_failed("no JSON object in grader response"))?;

    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| AgentError::grading_failed(format!("malformed grader JSON: {}", e)))?;

    let score = value
        .get("score")
        .and_then(|s| s.as_str())
        .ok_or_else(|| AgentError::grading_failed("grader JSON missing \"score\""))?;

    match score.to_lowercase().as_str() {
        "yes" => Ok(Verdict::Relevant),
        "no" => Ok(Verdict::NotRelevant),
        other => Err(AgentError::grading_failed(format!(
            "unexpected grader score: {:?}",
            other
        ))),
    }
}
