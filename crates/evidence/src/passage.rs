//! Passage cleanup
//!
//! Every adapter returns self-contained passages: whitespace collapsed,
//! length-bounded, never empty.

/// Upper bound on passage length in characters.
const MAX_PASSAGE_CHARS: usize = 1200;

/// Collapse whitespace runs and truncate to the passage budget.
pub(crate) fn clean_passage(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_PASSAGE_CHARS {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(MAX_PASSAGE_CHARS).collect();
    format!("{}...", truncated)
}
