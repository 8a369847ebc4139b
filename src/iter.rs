//! Entry view and depth-first preorder iteration.
//!
//! Iteration keeps its position in an explicit stack of frames rather than on
//! the call stack, so a walk can stop at a payload and resume on the next
//! call. A node's own entry is produced before the entries below it; children
//! are visited in edge-list order (see [`EdgeOrder`](crate::EdgeOrder)).
//!
//! Every iterator and cursor borrows the map, so inserting or removing keys
//! while a walk is in progress does not compile. Removing entries through an
//! iterator is not supported.

use std::fmt;
use std::iter::FusedIterator;

use crate::node::{NodeArena, NodeId, Payload};
use crate::Trie;

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: NodeId,
    /// Index of the next unvisited edge of `node`.
    next_edge: usize,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self { node, next_edge: 0 }
    }
}

/// Resumable preorder walk over payload-bearing nodes.
///
/// The walk does not hold the arena; each step borrows it, which lets a
/// mutable cursor share the map with the entries it hands out.
#[derive(Clone, Debug)]
struct Walk {
    /// The top frame is the node to yield next. Empty once exhausted.
    stack: Vec<Frame>,
}

impl Walk {
    fn new<V>(nodes: &NodeArena<V>) -> Self {
        let mut walk = Self {
            stack: vec![Frame::new(NodeId::ROOT)],
        };
        // The root's own entry, if any, comes first.
        if nodes[NodeId::ROOT].payload.is_none() {
            walk.advance(nodes);
        }
        walk
    }

    /// Moves the top of the stack to the next payload-bearing node in
    /// preorder, or empties the stack.
    fn advance<V>(&mut self, nodes: &NodeArena<V>) {
        while let Some(top) = self.stack.last_mut() {
            match nodes[top.node].edges.get(top.next_edge) {
                Some(edge) => {
                    top.next_edge += 1;
                    let child = edge.to;
                    self.stack.push(Frame::new(child));
                    if nodes[child].payload.is_some() {
                        return;
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }

    fn next<V>(&mut self, nodes: &NodeArena<V>) -> Option<NodeId> {
        let node = self.stack.last()?.node;
        self.advance(nodes);
        Some(node)
    }
}

/// Iterator over `(key, value)` pairs of a [`Trie`], in preorder.
pub struct Iter<'a, V> {
    nodes: &'a NodeArena<V>,
    walk: Walk,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(trie: &'a Trie<V>) -> Self {
        Self {
            nodes: &trie.nodes,
            walk: Walk::new(&trie.nodes),
            remaining: trie.len(),
        }
    }
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = self.walk.next(nodes)?;
        let payload = nodes[node].payload.as_ref()?;
        self.remaining -= 1;
        Some((&payload.key, &payload.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over the keys of a [`Trie`].
#[derive(Clone)]
pub struct Keys<'a, V>(pub(crate) Iter<'a, V>);

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// Iterator over the values of a [`Trie`].
#[derive(Clone)]
pub struct Values<'a, V>(pub(crate) Iter<'a, V>);

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

/// Live view of the entries of a [`Trie`].
///
/// The view reads the map it was taken from on every call; its length is
/// always the map's length.
pub struct Entries<'a, V> {
    trie: &'a Trie<V>,
}

impl<'a, V> Entries<'a, V> {
    pub(crate) fn new(trie: &'a Trie<V>) -> Self {
        Self { trie }
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Whether the map holds `key` mapped to a value equal to `value`.
    pub fn contains(&self, key: &str, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.trie.get(key) == Some(value)
    }

    pub fn iter(&self) -> Iter<'a, V> {
        Iter::new(self.trie)
    }
}

impl<V> Clone for Entries<'_, V> {
    fn clone(&self) -> Self {
        Self { trie: self.trie }
    }
}

impl<'a, V> IntoIterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &Entries<'a, V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for Entries<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Preorder cursor handing out [`EntryMut`]s, one at a time.
///
/// ```rust
/// use chartrie::Trie;
///
/// let mut trie: Trie<u32> = ["one", "two", "three"].iter().zip(1..).collect();
/// let mut cursor = trie.cursor_mut();
/// while let Some(mut entry) = cursor.next_entry() {
///     let doubled = *entry.value() * 2;
///     entry.set_value(doubled);
/// }
/// assert_eq!(trie.get("three"), Some(&6));
/// ```
pub struct CursorMut<'a, V> {
    trie: &'a mut Trie<V>,
    walk: Walk,
    remaining: usize,
}

impl<'a, V> CursorMut<'a, V> {
    pub(crate) fn new(trie: &'a mut Trie<V>) -> Self {
        let walk = Walk::new(&trie.nodes);
        let remaining = trie.len();
        Self {
            trie,
            walk,
            remaining,
        }
    }

    pub fn next_entry(&mut self) -> Option<EntryMut<'_, V>> {
        let node = self.walk.next(&self.trie.nodes)?;
        let payload = self.trie.nodes[node].payload.as_mut()?;
        self.remaining -= 1;
        Some(EntryMut { payload })
    }

    /// Entries not yet handed out.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// A single occupied entry reached through a [`CursorMut`].
pub struct EntryMut<'a, V> {
    payload: &'a mut Payload<V>,
}

impl<'a, V> EntryMut<'a, V> {
    pub fn key(&self) -> &str {
        &self.payload.key
    }

    pub fn value(&self) -> &V {
        &self.payload.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.payload.value
    }

    pub fn into_mut(self) -> &'a mut V {
        &mut self.payload.value
    }

    /// Replaces the value, keeping the key, and returns the old value.
    ///
    /// This is the same overwrite [`Trie::insert`] performs for a key that
    /// is already present; the map's length does not change.
    pub fn set_value(&mut self, value: V) -> V {
        self.payload.replace(value)
    }
}

impl<V: fmt::Debug> fmt::Debug for EntryMut<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryMut")
            .field("key", &self.key())
            .field("value", self.value())
            .finish()
    }
}
