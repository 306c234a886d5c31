//! Evidence Vocabulary
//!
//! Identifiers for the three evidence tiers and the relevance verdict
//! produced by the grader. The `Ord` derive on `SourceKind` follows
//! escalation order (primary < papers < web), which keeps consulted-source
//! sets naturally sorted in tier order.

use serde::{Deserialize, Serialize};

/// One evidence source in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Tier 1: the private document index
    Primary,
    /// Tier 2: the academic paper index
    Papers,
    /// Tier 3: live web search (last resort, broadest)
    Web,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Primary => write!(f, "primary"),
            SourceKind::Papers => write!(f, "papers"),
            SourceKind::Web => write!(f, "web"),
        }
    }
}

/// Relevance verdict for a single (query, passage) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Relevant,
    NotRelevant,
}

impl Verdict {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Verdict::Relevant)
    }
}
