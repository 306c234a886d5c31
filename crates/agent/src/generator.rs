//! LLM Answer Generator
//!
//! Renders the accepted evidence as a numbered list, interpolates it into
//! a fixed instruction template together with the meeting transcript and
//! the question, and makes a single completion call. Never retried here;
//! retry policy, if any, belongs to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use meetmind_core::{AgentError, AgentResult, AnswerGenerator};
use meetmind_llm::CompletionProvider;

/// Prompt template for composing the final answer.
const GENERATE_PROMPT: &str = r#"You are a knowledgeable assistant that answers the user's question based on the evidence passages provided in the context and the transcript of the most recent meeting. Use both the evidence and the transcript to answer clearly and comprehensively. If neither contains enough information, say so instead of guessing.

Context:
Evidence passages:
{evidence}

Meeting transcript:
{transcript}

Question:
{question}

Answer:"#;

/// Placeholder rendered when a section has no content.
const EMPTY_SECTION: &str = "(none available)";

/// Composes answers with a single completion call.
pub struct LlmAnswerGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl LlmAnswerGenerator {
    /// Create a new generator backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

/// Render evidence as a 1-indexed numbered list, in the order given.
fn render_evidence(evidence: &[String]) -> String {
    if evidence.is_empty() {
        return EMPTY_SECTION.to_string();
    }
    evidence
        .iter()
        .enumerate()
        .map(|(index, passage)| format!("{}. {}", index + 1, passage))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(
        &self,
        query: &str,
        evidence: &[String],
        side_context: Option<&str>,
    ) -> AgentResult<String> {
        let prompt = GENERATE_PROMPT
            .replace("{evidence}", &render_evidence(evidence))
            .replace("{transcript}", side_context.unwrap_or(EMPTY_SECTION))
            .replace("{question}", query);

        debug!(
            evidence_count = evidence.len(),
            has_transcript = side_context.is_some(),
            "invoking answer generation"
        );

        let answer = self
            .provider
            .complete(&prompt)
            .await
            .map_err(|e| AgentError::generation_failed(e.to_string()))?;

        Ok(answer.trim().to_string())
    }
}
