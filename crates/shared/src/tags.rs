//! Tag derivation over a loaded session list.
//!
//! Tags are kept verbatim: no case folding and no whitespace trimming.

use crate::domain::Session;

/// Every tag of every session, in list order, duplicates included.
pub fn flatten_tags(sessions: &[Session]) -> Vec<&str> {
    sessions
        .iter()
        .flat_map(|session| session.tags.iter().map(String::as_str))
        .collect()
}

/// Sorts lexicographically (byte order) and drops duplicates.
pub fn sorted_distinct<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut out: Vec<String> = values.into_iter().map(|v| v.as_ref().to_owned()).collect();
    out.sort_unstable();
    out.dedup();
    out
}

pub fn derive_tags(sessions: &[Session]) -> Vec<String> {
    sorted_distinct(flatten_tags(sessions))
}
