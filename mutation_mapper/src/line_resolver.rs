use std::collections::BTreeSet;

use tracing::warn;

/// Outcome of resolving user-supplied line-name fragments against the
/// canonical tumor identifiers in the mutation table.
pub struct ResolvedLines {
    /// Canonical identifiers, in input fragment order.
    pub lines: Vec<String>,
    /// Fragments with no match in the canonical set.
    pub unmatched: Vec<String>,
}

/// Match each fragment (case-insensitively) as a substring of a canonical
/// tumor identifier. Ties go to the shortest identifier, then lexicographic,
/// so resolution is deterministic. Unmatched fragments are reported and
/// excluded; the rest of the run proceeds.
pub fn resolve_lines(fragments: &[String], tumors: &BTreeSet<String>) -> ResolvedLines {
    let mut lines = Vec::new();
    let mut unmatched = Vec::new();

    for fragment in fragments {
        let needle = fragment.to_uppercase();
        let hit = tumors
            .iter()
            .filter(|t| t.contains(needle.as_str()))
            .min_by_key(|t| (t.len(), t.as_str()));
        match hit {
            Some(t) => lines.push(t.clone()),
            None => unmatched.push(fragment.clone()),
        }
    }

    if !unmatched.is_empty() {
        warn!(
            "Lines {} not found in the mutation table",
            unmatched.join(", ")
        );
    }

    ResolvedLines { lines, unmatched }
}
