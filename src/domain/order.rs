//! Sibling ordering strategies and the child container they parameterize.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use crate::domain::arena::NodeId;
use crate::domain::node::{SortedTreeNode, TreeNode};

/// Ordering strategy for children and forest top nodes.
pub trait SiblingOrder<N: TreeNode> {
    /// False when every pair compares `Equal`; new siblings are then appended.
    const ORDERED: bool = true;

    fn compare(a: &N, b: &N) -> Ordering;
}

/// Children keep the order in which they were attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionOrder;

impl<N: TreeNode> SiblingOrder<N> for InsertionOrder {
    const ORDERED: bool = false;

    fn compare(_: &N, _: &N) -> Ordering {
        Ordering::Equal
    }
}

/// Children are ordered by [`SortedTreeNode::compare`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<N: SortedTreeNode> SiblingOrder<N> for NaturalOrder {
    fn compare(a: &N, b: &N) -> Ordering {
        a.compare(b)
    }
}

/// Set of sibling handles, unique by node identifier.
///
/// Entries are positioned by a [`SiblingOrder`]; a new entry goes after every
/// sibling that does not compare greater, so equal siblings keep insertion order.
/// `keys` mirrors the identifiers of `ids`.
#[derive(Debug, Clone)]
pub struct ChildSet<K> {
    ids: Vec<NodeId>,
    keys: HashSet<K>,
}

impl<K> Default for ChildSet<K> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            keys: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> ChildSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Finds the slot for `new` (identified by `key`), or `None` if a sibling
    /// with the same identifier is already present.
    pub(crate) fn position_for<'a, N, O, F>(&self, key: &K, new: &N, value_of: F) -> Option<usize>
    where
        N: TreeNode<Id = K> + 'a,
        O: SiblingOrder<N>,
        F: Fn(NodeId) -> Option<&'a N>,
    {
        if self.keys.contains(key) {
            return None;
        }
        if !O::ORDERED {
            return Some(self.ids.len());
        }
        Some(self.ids.partition_point(|&sibling| {
            value_of(sibling).map_or(true, |v| O::compare(v, new) != Ordering::Greater)
        }))
    }

    pub(crate) fn insert_at(&mut self, index: usize, id: NodeId, key: K) {
        self.ids.insert(index, id);
        self.keys.insert(key);
    }

    /// Removes `id`, whose identifier is `key`.
    pub(crate) fn remove(&mut self, id: NodeId, key: &K) -> bool {
        if !self.keys.contains(key) {
            return false;
        }
        match self.ids.iter().position(|&c| c == id) {
            Some(index) => {
                self.ids.remove(index);
                self.keys.remove(key);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take(&mut self) -> Vec<NodeId> {
        self.keys.clear();
        std::mem::take(&mut self.ids)
    }
}
