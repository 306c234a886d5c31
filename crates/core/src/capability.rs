//! Capability Traits
//!
//! Small interfaces for the three external collaborators of the answering
//! pipeline:
//!
//! - `EvidenceSource` - one retrieval tier, `fetch(query) -> passages`
//! - `RelevanceGrader` - judges a single (query, passage) pair
//! - `AnswerGenerator` - composes the final answer from accepted evidence
//!
//! Every concrete provider (vector index, keyword search, hosted LLM) slots
//! in behind these traits, so the orchestration engine can be exercised with
//! deterministic stubs and no network access. Implementations are stateless
//! per call: they never touch the request context and carry their own
//! timeouts.

use async_trait::async_trait;

use crate::error::AgentResult;
use crate::source::{SourceKind, Verdict};

/// A single evidence tier.
///
/// `fetch` returns an ordered list of self-contained passages, already
/// truncated and cleaned by the adapter. Network or service errors surface
/// as `AgentError::SourceUnavailable`; the engine treats that as "zero
/// evidence, escalate" rather than aborting the request.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Which tier this adapter serves.
    fn kind(&self) -> SourceKind;

    /// Retrieve candidate passages for the query, best first.
    async fn fetch(&self, query: &str) -> AgentResult<Vec<String>>;
}

/// Judges whether one retrieved passage is relevant to the query.
///
/// Called once per passage, never batched: each passage is judged
/// independently so one irrelevant passage does not disqualify the rest.
/// Errors surface as `AgentError::GradingFailed` and are handled
/// fail-closed by the engine.
#[async_trait]
pub trait RelevanceGrader: Send + Sync {
    async fn grade(&self, query: &str, passage: &str) -> AgentResult<Verdict>;
}

/// Composes the final answer from the query, the accepted evidence in tier
/// order, and optional side context (the meeting transcript).
///
/// Must tolerate an empty evidence list: the pipeline still generates when
/// every tier came up empty, answering from side context alone or declaring
/// insufficient evidence. Errors surface as `AgentError::GenerationFailed`
/// and are fatal to the request.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        evidence: &[String],
        side_context: Option<&str>,
    ) -> AgentResult<String>;
}
