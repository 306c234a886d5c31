//! Meetmind Agent
//!
//! The retrieval-escalation orchestration engine: a stateful pipeline that
//! decides, per question, which evidence tiers to consult, whether each
//! tier's evidence is good enough, and when to fall back to a broader
//! source, then invokes the answer generator exactly once.
//!
//! ## Module Organization
//!
//! - `context` - Per-request state (`RequestContext`, `StageId`, `AgentOutcome`)
//! - `pipeline` - The stage machine (`EscalationPipeline`, `QueryRequest`)
//! - `grader` - LLM-backed relevance grading (`LlmRelevanceGrader`)
//! - `generator` - LLM-backed answer composition (`LlmAnswerGenerator`)

pub mod context;
pub mod generator;
pub mod grader;
pub mod pipeline;

// Re-export main types
pub use context::{AgentOutcome, EscalationFlags, RequestContext, StageId};
pub use generator::LlmAnswerGenerator;
pub use grader::LlmRelevanceGrader;
pub use pipeline::{EscalationPipeline, QueryRequest};
