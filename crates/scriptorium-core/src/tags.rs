//! Tag set helpers.
//!
//! Document tags behave as an ordered set: duplicates collapse, insertion
//! order is preserved. AI-suggested tags arrive lowercase; caller tags are
//! kept verbatim.

use std::collections::HashSet;

/// Deduplicate tags, preserving first-seen order. Blank tags are dropped.
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Union of existing tags and newly suggested ones, existing first.
pub fn merge_tags(existing: &[String], incoming: Vec<String>) -> Vec<String> {
    dedup_tags(existing.iter().cloned().chain(incoming))
}
