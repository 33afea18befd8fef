// src/workers/node_list.rs

use std::collections::HashSet;

/// Result of probing the scheduler node file.
///
/// `Unavailable` is not an error: it selects the fallback branch of
/// worker-count resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeList {
    /// Number of distinct compute nodes listed (always >= 1).
    Available(usize),
    /// Why the node file could not be used.
    Unavailable(String),
}

/// Count distinct node identifiers in a node file.
///
/// PBS writes one line per allocated slot, so the same host usually appears
/// several times. Surrounding whitespace is ignored and blank lines are
/// skipped.
pub fn count_distinct_nodes(contents: &str) -> usize {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<HashSet<_>>()
        .len()
}
