//! Request State Model
//!
//! One `RequestContext` per incoming question, threaded mutably through
//! the stage machine for exactly one traversal and then discarded. Every
//! field has a single write-owner:
//!
//! - `query` / `side_context` - the caller, immutable after creation
//! - `evidence` - retrieval/grading stages, replaced wholesale
//! - `accepted` - grading stages (and the terminal web tier), append-only
//! - `escalate` - grading stages, monotonic set-only
//! - `trace` / `sources_consulted` - the engine, append-only
//! - `answer` - the generate stage, set exactly once

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use meetmind_core::SourceKind;

/// Stage identifiers, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    RetrievePrimary,
    GradePrimary,
    RetrievePapers,
    GradePapers,
    RetrieveWeb,
    Generate,
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageId::RetrievePrimary => write!(f, "retrieve_primary"),
            StageId::GradePrimary => write!(f, "grade_primary"),
            StageId::RetrievePapers => write!(f, "retrieve_papers"),
            StageId::GradePapers => write!(f, "grade_papers"),
            StageId::RetrieveWeb => write!(f, "retrieve_web"),
            StageId::Generate => write!(f, "generate"),
        }
    }
}

impl StageId {
    /// Whether this stage consults an evidence source.
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            StageId::RetrievePrimary | StageId::RetrievePapers | StageId::RetrieveWeb
        )
    }
}

/// Escalation flags, set by grading and consumed by routing.
///
/// Monotonic by construction: the setters only flip flags on, and nothing
/// exposes a way to clear one within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationFlags {
    to_papers: bool,
    to_web: bool,
}

impl EscalationFlags {
    /// Request escalation to the paper tier.
    pub fn request_papers(&mut self) {
        self.to_papers = true;
    }

    /// Request escalation to the web tier.
    pub fn request_web(&mut self) {
        self.to_web = true;
    }

    pub fn to_papers(&self) -> bool {
        self.to_papers
    }

    pub fn to_web(&self) -> bool {
        self.to_web
    }
}

/// Mutable per-request state, owned by one pipeline traversal.
#[derive(Debug)]
pub struct RequestContext {
    query: String,
    side_context: Option<String>,
    /// Current tier's candidate pool; replaced wholesale by each retrieval
    /// stage and narrowed to survivors by each grading stage.
    evidence: Vec<String>,
    /// Cumulative accepted pool across tiers, in tier order.
    accepted: Vec<String>,
    escalate: EscalationFlags,
    trace: Vec<StageId>,
    answer: Option<String>,
    sources_consulted: BTreeSet<SourceKind>,
}

impl RequestContext {
    /// Create the context for one incoming question.
    pub fn new(query: impl Into<String>, side_context: Option<String>) -> Self {
        Self {
            query: query.into(),
            side_context: side_context.filter(|s| !s.trim().is_empty()),
            evidence: Vec::new(),
            accepted: Vec::new(),
            escalate: EscalationFlags::default(),
            trace: Vec::new(),
            answer: None,
            sources_consulted: BTreeSet::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn side_context(&self) -> Option<&str> {
        self.side_context.as_deref()
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    pub fn escalate(&self) -> &EscalationFlags {
        &self.escalate
    }

    pub fn escalate_mut(&mut self) -> &mut EscalationFlags {
        &mut self.escalate
    }

    pub fn trace(&self) -> &[StageId] {
        &self.trace
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Sources whose retrieve stage has run, in tier order.
    pub fn sources_consulted(&self) -> Vec<SourceKind> {
        self.sources_consulted.iter().copied().collect()
    }

    /// Append a stage to the execution trace. Retrieval stages also mark
    /// their tier as consulted, keeping `sources_consulted` derivable from
    /// the trace.
    pub fn record_stage(&mut self, stage: StageId) {
        if stage.is_retrieval() {
            let kind = match stage {
                StageId::RetrievePrimary => SourceKind::Primary,
                StageId::RetrievePapers => SourceKind::Papers,
                _ => SourceKind::Web,
            };
            self.sources_consulted.insert(kind);
        }
        self.trace.push(stage);
    }

    /// Whether any retrieval stage has executed.
    pub fn has_retrieved(&self) -> bool {
        self.trace.iter().any(StageId::is_retrieval)
    }

    /// Replace the candidate pool with a new tier's raw fetch.
    pub fn replace_evidence(&mut self, passages: Vec<String>) {
        self.evidence = passages;
    }

    /// Take the candidate pool for grading, leaving it empty.
    pub fn take_evidence(&mut self) -> Vec<String> {
        std::mem::take(&mut self.evidence)
    }

    /// Append a passage to the accepted pool.
    pub fn accept(&mut self, passage: String) {
        self.accepted.push(passage);
    }

    /// Record the terminal answer. The generate stage runs exactly once,
    /// so a second write is a bug in the engine.
    pub fn set_answer(&mut self, answer: String) {
        debug_assert!(self.answer.is_none(), "answer written twice");
        self.answer = Some(answer);
    }
}

/// What the pipeline hands back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutcome {
    /// The generated answer.
    pub answer: String,
    /// Stages executed, in order.
    pub trace: Vec<StageId>,
    /// Evidence tiers consulted, in tier order.
    pub sources_consulted: Vec<SourceKind>,
    /// The accepted passages the answer was generated from, in tier order.
    pub evidence: Vec<String>,
}
