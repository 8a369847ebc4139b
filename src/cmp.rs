//! Map equality and order-independent hashing.
//!
//! Both are defined on the entries alone, so two maps holding the same
//! key/value pairs compare and hash equal whatever their insertion history,
//! removal history or edge order.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use crate::Trie;

impl<V: PartialEq> PartialEq for Trie<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq> Eq for Trie<V> {}

impl<V: PartialEq, S: BuildHasher> PartialEq<HashMap<String, V, S>> for Trie<V> {
    fn eq(&self, other: &HashMap<String, V, S>) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Hash> Trie<V> {
    /// XOR over all entries of `hash(key) ^ hash(value)`, using a fixed,
    /// unkeyed hasher so the result is stable across runs.
    pub fn hash_code(&self) -> u64 {
        self.hash_code_with(&BuildHasherDefault::<DefaultHasher>::default())
    }

    /// Like [`hash_code`](Self::hash_code) with a caller-chosen hasher.
    /// Keys are hashed as `str`.
    pub fn hash_code_with<S: BuildHasher>(&self, build: &S) -> u64 {
        self.iter()
            .fold(0, |acc, (key, value)| acc ^ build.hash_one(key) ^ build.hash_one(value))
    }
}

impl<V: Hash> Hash for Trie<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        state.write_u64(self.hash_code());
    }
}
