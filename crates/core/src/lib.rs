//! Meetmind Core
//!
//! Foundational traits, error types, and evidence vocabulary for the
//! meetmind workspace. This crate has zero dependencies on
//! application-level code (HTTP server, LLM providers, search adapters).
//!
//! ## Module Organization
//!
//! - `error` - Pipeline error taxonomy (`AgentError`, `AgentResult`)
//! - `source` - Evidence tier and verdict vocabulary (`SourceKind`, `Verdict`)
//! - `capability` - Collaborator interfaces (`EvidenceSource`, `RelevanceGrader`, `AnswerGenerator`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/async-trait/thiserror** - keeps build times minimal
//! 2. **Trait-based abstractions** - any concrete provider can be substituted via dependency injection
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod capability;
pub mod error;
pub mod source;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{AgentError, AgentResult};

// ── Evidence Vocabulary ────────────────────────────────────────────────
pub use source::{SourceKind, Verdict};

// ── Capability Traits ──────────────────────────────────────────────────
pub use capability::{AnswerGenerator, EvidenceSource, RelevanceGrader};
