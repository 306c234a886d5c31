//! Core Error Types
//!
//! Defines the error taxonomy shared by every stage of the answering
//! pipeline. These error types are dependency-free (only thiserror + std)
//! to keep the core crate lightweight.
//!
//! Only `GenerationFailed` and `InvalidState` are fatal to a request; the
//! orchestration engine absorbs `SourceUnavailable` and `GradingFailed`
//! locally and converts them into escalation decisions.

use thiserror::Error;

use crate::source::SourceKind;

/// Error type for the answering pipeline.
#[derive(Error, Debug)]
pub enum AgentError {
    /// An evidence source adapter failed or timed out. Recovered by the
    /// engine as "zero evidence, escalate to the next tier".
    #[error("{kind} evidence source unavailable: {message}")]
    SourceUnavailable { kind: SourceKind, message: String },

    /// The relevance grader failed or timed out for a single passage.
    /// Recovered fail-closed: the passage is treated as not relevant.
    #[error("relevance grading failed: {message}")]
    GradingFailed { message: String },

    /// The answer generator failed or timed out. Fatal to the request;
    /// no partial answer is returned.
    #[error("answer generation failed: {message}")]
    GenerationFailed { message: String },

    /// A programming-contract violation, e.g. generation attempted before
    /// any retrieval stage executed. Surfaced immediately, never retried.
    #[error("invalid pipeline state: {message}")]
    InvalidState { message: String },
}

/// Result type alias for pipeline errors
pub type AgentResult<T> = Result<T, AgentError>;

impl AgentError {
    /// Create a source-unavailable error for the given tier
    pub fn source_unavailable(source: SourceKind, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            kind: source,
            message: message.into(),
        }
    }

    /// Create a grading-failed error
    pub fn grading_failed(message: impl Into<String>) -> Self {
        Self::GradingFailed {
            message: message.into(),
        }
    }

    /// Create a generation-failed error
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Whether this error terminates the request. Tier-level failures are
    /// absorbed into escalation decisions and never reach the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AgentError::GenerationFailed { .. } | AgentError::InvalidState { .. }
        )
    }
}

/// Convert AgentError to a string
impl From<AgentError> for String {
    fn from(err: AgentError) -> String {
        err.to_string()
    }
}
