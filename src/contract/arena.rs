//! Arena-backed tree of contracted ranges.
//!
//! Each contracted range is a [`Node`] holding the stored bits of the range
//! plus its own nested placeholders. Nodes refer to their children by index
//! into the owning arena, never by shared reference, so cloning a
//! [`Substitutions`] is a deep copy and no two sequences alias a node.
//!
//! Nodes are immutable once created; a node's logical length is computed at
//! insertion and cached.

use std::collections::BTreeMap;

use crate::bits::store::{BitBuffer, BitStore};
use crate::error::Result;

#[cfg(feature = "serde")]
use crate::error::BitError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`Substitutions`] arena.
pub(crate) type NodeId = usize;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct Node {
    store: BitStore,
    children: BTreeMap<usize, NodeId>,
    logical_len: usize,
}

/// Mapping from placeholder positions to the ranges they stand for.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawSubstitutions")
)]
pub struct Substitutions {
    entries: BTreeMap<usize, NodeId>,
    nodes: Vec<Node>,
}

impl Substitutions {
    /// Number of top-level placeholders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no placeholder is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether stored position `pos` is a placeholder.
    pub fn contains(&self, pos: usize) -> bool {
        self.entries.contains_key(&pos)
    }

    /// Placeholder positions in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Logical length of the range behind placeholder `pos`.
    pub fn weight(&self, pos: usize) -> Option<usize> {
        self.entries.get(&pos).map(|&id| self.nodes[id].logical_len)
    }

    /// Largest placeholder position.
    #[cfg(feature = "serde")]
    pub(crate) fn last_position(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Stored (still contracted) bits behind placeholder `pos`.
    pub fn stored_bits(&self, pos: usize) -> Option<&BitStore> {
        self.entries.get(&pos).map(|&id| &self.nodes[id].store)
    }

    /// Logical length of a sequence of `size` stored bits carrying these
    /// placeholders.
    pub fn logical_len(&self, size: usize) -> usize {
        size + self
            .entries
            .values()
            .map(|&id| self.nodes[id].logical_len - 1)
            .sum::<usize>()
    }

    /// Record the contraction of `[first, last)` of `store`.
    ///
    /// Placeholders inside the range move into the new node; those at or
    /// after `last` are rekeyed to the shrunk sequence.
    pub(crate) fn contract(&mut self, store: &BitStore, first: usize, last: usize) -> Result<()> {
        let range = store.slice(first, last)?;
        let removed = last - first - 1;

        let mut children = BTreeMap::new();
        let mut rest = BTreeMap::new();
        for (&key, &id) in &self.entries {
            if key < first {
                rest.insert(key, id);
            } else if key < last {
                children.insert(key - first, id);
            } else {
                rest.insert(key - removed, id);
            }
        }

        let logical_len = range.len()
            + children
                .values()
                .map(|&id| self.nodes[id].logical_len - 1)
                .sum::<usize>();
        let id = self.nodes.len();
        self.nodes.push(Node {
            store: range,
            children,
            logical_len,
        });
        rest.insert(first, id);
        self.entries = rest;
        Ok(())
    }

    /// Fully expand `store`, replacing each placeholder by its range
    /// (complemented when the placeholder bit is set).
    pub(crate) fn expand(&self, store: &BitStore) -> BitStore {
        let mut buf = BitBuffer::with_capacity(self.logical_len(store.len()));
        self.expand_into(store, &self.entries, false, &mut buf);
        buf.into_store()
    }

    fn expand_into(
        &self,
        store: &BitStore,
        children: &BTreeMap<usize, NodeId>,
        invert: bool,
        buf: &mut BitBuffer,
    ) {
        let mut cursor = 0;
        for (&key, &id) in children {
            for i in cursor..key {
                buf.push(store.bit(i) ^ invert);
            }
            let node = &self.nodes[id];
            let flipped = store.bit(key) ^ invert;
            self.expand_into(&node.store, &node.children, flipped, buf);
            cursor = key + 1;
        }
        for i in cursor..store.len() {
            buf.push(store.bit(i) ^ invert);
        }
    }

    /// Placeholders strictly inside `[first, last)`, rekeyed relative to
    /// `first`. Returns `None` when no placeholder falls in the range.
    pub(crate) fn slice(&self, first: usize, last: usize) -> Option<Self> {
        let mut out = Self::default();
        for (&key, &id) in self.entries.range(first..last) {
            let copied = self.copy_subtree(id, &mut out.nodes);
            out.entries.insert(key - first, copied);
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Append `other`'s placeholders with every key shifted by `offset`.
    pub(crate) fn append(&mut self, other: &Self, offset: usize) {
        for (&key, &id) in &other.entries {
            let copied = other.copy_subtree(id, &mut self.nodes);
            self.entries.insert(key + offset, copied);
        }
    }

    fn copy_subtree(&self, id: NodeId, into: &mut Vec<Node>) -> NodeId {
        let node = &self.nodes[id];
        let children = node
            .children
            .iter()
            .map(|(&key, &child)| (key, self.copy_subtree(child, into)))
            .collect();
        into.push(Node {
            store: node.store.clone(),
            children,
            logical_len: node.logical_len,
        });
        into.len() - 1
    }
}

/// Unchecked wire form of [`Substitutions`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSubstitutions {
    entries: BTreeMap<usize, NodeId>,
    nodes: Vec<Node>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSubstitutions> for Substitutions {
    type Error = BitError;

    /// Every referenced node exists and has a single owner, child positions
    /// lie inside their node, and cached logical lengths add up.
    fn try_from(raw: RawSubstitutions) -> Result<Self> {
        let count = raw.nodes.len();
        let mut owned = vec![false; count];
        let references = raw
            .entries
            .values()
            .chain(raw.nodes.iter().flat_map(|node| node.children.values()));
        for &id in references {
            if id >= count || std::mem::replace(&mut owned[id], true) {
                return Err(BitError::invalid(format!(
                    "node {} is missing or referenced twice",
                    id
                )));
            }
        }
        for node in &raw.nodes {
            if let Some(&key) = node.children.keys().next_back() {
                BitError::check_index(key, node.store.len())?;
            }
            let expected = node
                .children
                .values()
                .try_fold(node.store.len(), |acc, &child| {
                    raw.nodes[child]
                        .logical_len
                        .checked_sub(1)
                        .and_then(|extra| acc.checked_add(extra))
                });
            if expected != Some(node.logical_len) {
                return Err(BitError::invalid(format!(
                    "node records logical length {}, its range expands to {:?}",
                    node.logical_len, expected
                )));
            }
        }
        Ok(Self {
            entries: raw.entries,
            nodes: raw.nodes,
        })
    }
}
