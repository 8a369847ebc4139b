//! # chartrie
//!
//! A map from string keys to arbitrary values, stored as a prefix tree with
//! one node per character.
//!
//! Each node holds an optional payload (the key and its value) and a small
//! list of outgoing edges, each labeled with one `char`. Looking a key up
//! follows one edge per character; inserting creates the missing tail of the
//! path; removing a key prunes every node that no longer leads to a payload,
//! so the tree never keeps dead branches.
//!
//! ## Example
//!
//! ```rust
//! use chartrie::Trie;
//!
//! let mut trie: Trie<u32> = Trie::new();
//! assert_eq!(trie.insert("hello", 1), None);
//! assert_eq!(trie.insert("help", 2), None);
//! assert_eq!(trie.insert("hello", 3), Some(1));
//!
//! assert_eq!(trie.get("hello"), Some(&3));
//! assert_eq!(trie.get("hel"), None);
//! assert_eq!(trie.remove("help"), Some(2));
//! assert_eq!(trie.len(), 1);
//! ```
//!
//! ## Ordering
//!
//! Iteration is a depth-first preorder walk: a key comes before every key it
//! is a prefix of. Keys that share a prefix follow the edge order chosen in
//! [`TrieConfig::edge_order`]; by default that is the order in which the
//! branches were created. Equality and hashing never depend on it.
//!
//! ## Concurrency
//!
//! `Trie` has no internal synchronization. Share it across threads behind a
//! lock if it must be mutated concurrently.

mod cmp;
mod config;
mod error;
mod iter;
mod node;
mod utf16;

pub use config::{EdgeOrder, TrieConfig};
pub use error::{Result, TrieError};
pub use iter::{CursorMut, Entries, EntryMut, Iter, Keys, Values};

use std::fmt;

use tracing::{debug, trace};

use crate::node::{NodeArena, NodeId};

/// `tracing` target for events emitted by this crate.
pub const LOG_TARGET: &str = "chartrie";

// =============================================================================
// Trie
// =============================================================================

/// A map from `str` keys to values of type `V`, backed by a character trie.
///
/// Point operations (`insert`, `get`, `remove`, `contains_key`) take time
/// proportional to the key length times the cost of finding a label among a
/// node's edges. Full scans (`contains_value`, iteration, equality, hashing)
/// visit every node once.
#[derive(Clone)]
pub struct Trie<V> {
    nodes: NodeArena<V>,
    /// Number of payload-bearing nodes.
    count: usize,
    config: TrieConfig,
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            nodes: NodeArena::new(config.edge_order, config.initial_capacity),
            count: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of nodes in the tree, the root included. An empty map has one.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// Removes every entry, leaving a single empty root. The configuration
    /// is kept.
    pub fn clear(&mut self) {
        debug!(
            target: LOG_TARGET,
            entries = self.count,
            nodes = self.nodes.live(),
            "Clearing trie"
        );
        self.nodes.reset();
        self.count = 0;
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let node = self.nodes.find(key)?;
        self.nodes[node].payload.as_ref().map(|payload| &payload.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let node = self.nodes.find(key)?;
        self.nodes[node]
            .payload
            .as_mut()
            .map(|payload| &mut payload.value)
    }

    /// Returns the stored key along with the value.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        let node = self.nodes.find(key)?;
        self.nodes[node]
            .payload
            .as_ref()
            .map(|payload| (&*payload.key, &payload.value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Scans every entry for a value equal to `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|stored| stored == value)
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was present, its value is replaced (the stored key is
    /// kept) and the old value is returned.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = NodeId::ROOT;
        let mut chars = key.chars();
        while let Some(label) = chars.next() {
            match self.nodes.child(node, label) {
                Some(child) => node = child,
                None => {
                    // Everything left of the key is a new branch.
                    node = self.nodes.add_child(node, label);
                    let mut grown = 1usize;
                    for label in chars.by_ref() {
                        node = self.nodes.add_child(node, label);
                        grown += 1;
                    }
                    trace!(target: LOG_TARGET, key, nodes = grown, "Grew branch");
                }
            }
        }

        self.store(node, key, value)
    }

    /// Final step of an insertion: overwrite the payload at `node`, or
    /// create it and count the new entry.
    fn store(&mut self, node: NodeId, key: &str, value: V) -> Option<V> {
        match self.nodes.overwrite(node, value) {
            Ok(old) => Some(old),
            Err(value) => {
                self.nodes.occupy(node, key, value);
                self.count += 1;
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key, returning the stored key and its value.
    ///
    /// Nodes left without a payload and without children are unlinked from
    /// their parents, walking upwards until a node that still carries a
    /// payload, still has children, or is the root.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let node = self.nodes.find(key)?;
        let payload = self.nodes[node].payload.take()?;
        self.count -= 1;

        let pruned = self.nodes.prune_upwards(node);
        if pruned > 0 {
            trace!(target: LOG_TARGET, key, nodes = pruned, "Pruned branch");
        }

        Some((payload.key.into(), payload.value))
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Live view of the map's entries.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries::new(self)
    }

    /// Cursor over the entries that allows replacing their values.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, V> {
        CursorMut::new(self)
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for Trie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}


#[cfg(test)]
mod proptests;
