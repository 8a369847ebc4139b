//! Node arena for the character trie.
//!
//! Every node lives in a slot of [`NodeArena`] and is addressed by a
//! [`NodeId`]. Ownership is strictly parent to child: the only owning
//! reference to a node is the [`Edge`] in its parent's edge list. The
//! [`Link`] stored in a child points back at the parent by index and is used
//! only to find and unlink the child's edge while pruning.

use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

use crate::config::EdgeOrder;

/// Index of a node slot in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Labeled edge to an exclusively owned child.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Edge {
    pub(crate) label: char,
    pub(crate) to: NodeId,
}

/// Back-reference from a child to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) parent: NodeId,
    /// Label of the parent's edge that leads to this node.
    pub(crate) label: char,
}

/// Key/value stored at a node. The key is the concatenation of the labels
/// from the root, cached so entries can hand it out without a walk.
#[derive(Clone, Debug)]
pub(crate) struct Payload<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
}

impl<V> Payload<V> {
    fn new(key: &str, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Swaps in a new value. The key never changes once stored.
    #[inline]
    pub(crate) fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) edges: SmallVec<[Edge; 2]>,
    pub(crate) payload: Option<Payload<V>>,
    pub(crate) up: Option<Link>,
}

impl<V> Node<V> {
    fn new(up: Option<Link>) -> Self {
        Self {
            edges: SmallVec::new(),
            payload: None,
            up,
        }
    }

    /// Non-root, payload-less and childless.
    #[inline]
    fn is_dead(&self) -> bool {
        self.up.is_some() && self.payload.is_none() && self.edges.is_empty()
    }
}

/// Slot arena with a free list of released nodes.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Node<V>>,
    /// Released slots, reused before the arena grows.
    free: Vec<NodeId>,
    order: EdgeOrder,
}

impl<V> NodeArena<V> {
    pub(crate) fn new(order: EdgeOrder, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Node::new(None));
        Self {
            slots,
            free: Vec::new(),
            order,
        }
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> EdgeOrder {
        self.order
    }

    /// Number of nodes currently in the tree, the root included.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Drops every node and leaves a lone, empty root.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.slots.push(Node::new(None));
    }

    /// Position of the edge labeled `label` in the edge list of `id`.
    ///
    /// `Err` carries the insertion point that keeps a lexicographic list
    /// sorted; for insertion order it is always the end of the list.
    fn position(&self, id: NodeId, label: char) -> Result<usize, usize> {
        let edges = &self[id].edges;
        match self.order {
            EdgeOrder::Insertion => edges
                .iter()
                .position(|edge| edge.label == label)
                .ok_or(edges.len()),
            EdgeOrder::Lexicographic => edges.binary_search_by_key(&label, |edge| edge.label),
        }
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, label: char) -> Option<NodeId> {
        self.position(id, label).ok().map(|at| self[id].edges[at].to)
    }

    /// Follows one edge per character of `key`.
    pub(crate) fn find(&self, key: &str) -> Option<NodeId> {
        key.chars()
            .try_fold(NodeId::ROOT, |node, label| self.child(node, label))
    }

    /// Creates a new, empty child of `parent` under `label`.
    ///
    /// The caller guarantees that `parent` has no edge labeled `label` yet.
    pub(crate) fn add_child(&mut self, parent: NodeId, label: char) -> NodeId {
        let at = self.position(parent, label);
        debug_assert!(at.is_err(), "duplicate edge label {label:?}");
        let at = at.unwrap_or_else(|at| at);

        let node = Node::new(Some(Link { parent, label }));
        let id = match self.free.pop() {
            Some(id) => {
                self[id] = node;
                id
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(node);
                id
            }
        };
        self[parent].edges.insert(at, Edge { label, to: id });
        id
    }

    /// Replaces the value of an occupied node. A vacant node gives the value
    /// back untouched.
    #[inline]
    pub(crate) fn overwrite(&mut self, id: NodeId, value: V) -> Result<V, V> {
        match self[id].payload.as_mut() {
            Some(payload) => Ok(payload.replace(value)),
            None => Err(value),
        }
    }

    /// Installs a payload on a vacant node.
    #[inline]
    pub(crate) fn occupy(&mut self, id: NodeId, key: &str, value: V) {
        debug_assert!(self[id].payload.is_none());
        self[id].payload = Some(Payload::new(key, value));
    }

    /// Walks upwards from `id`, unlinking and releasing every dead node until
    /// reaching one that has a payload, has children, or is the root.
    /// Returns the number of nodes released.
    pub(crate) fn prune_upwards(&mut self, mut id: NodeId) -> usize {
        let mut pruned = 0;
        while self[id].is_dead() {
            let Some(Link { parent, label }) = self[id].up else {
                break;
            };
            match self.position(parent, label) {
                Ok(at) => {
                    debug_assert_eq!(self[parent].edges[at].to, id);
                    self[parent].edges.remove(at);
                }
                Err(_) => debug_assert!(false, "node {id:?} missing from its parent"),
            }
            self.release(id);
            pruned += 1;
            id = parent;
        }
        pruned
    }

    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, NodeId::ROOT);
        self[id] = Node::new(None);
        self.free.push(id);
    }
}

impl<V> Index<NodeId> for NodeArena<V> {
    type Output = Node<V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<V> {
        &self.slots[id.index()]
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.slots[id.index()]
    }
}
