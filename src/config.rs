//! Construction-time settings for [`Trie`](crate::Trie).

use std::fmt;
use std::str::FromStr;

use crate::error::TrieError;

/// Order of the outgoing edges of every node, and therefore the order in
/// which iteration visits keys that share a prefix.
///
/// Equality and hashing never depend on this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum EdgeOrder {
    /// Edges are appended as they are created. Removing an edge keeps the
    /// relative order of the remaining ones.
    Insertion,
    /// Edges are kept sorted by label and looked up by binary search.
    /// Iteration then yields keys in ascending `str` order.
    Lexicographic,
}

impl EdgeOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeOrder::Insertion => "insertion",
            EdgeOrder::Lexicographic => "lexicographic",
        }
    }
}

impl Default for EdgeOrder {
    fn default() -> Self {
        EdgeOrder::Insertion
    }
}

impl fmt::Display for EdgeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeOrder {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(EdgeOrder::Insertion),
            "lexicographic" => Ok(EdgeOrder::Lexicographic),
            _ => Err(TrieError::UnknownEdgeOrder(s.to_owned())),
        }
    }
}

/// Configuration for a [`Trie`](crate::Trie).
#[derive(Debug, Clone)]
pub struct TrieConfig {
    /// Sibling edge ordering
    pub edge_order: EdgeOrder,
    /// Initial capacity hint for the number of nodes (one per distinct key
    /// character position, plus the root)
    pub initial_capacity: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            edge_order: EdgeOrder::default(),
            initial_capacity: 16,
        }
    }
}
