//! Arena storage for treeized nodes: links, identifier index and layer memos.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::TreeNode;
use crate::domain::order::{ChildSet, InsertionOrder, SiblingOrder};
use crate::domain::TreeKind;

/// Handle to a node stored in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, generation) = self.0.into_raw_parts();
        write!(f, "{}#{}", index, generation)
    }
}

/// Arena slot: the node payload plus its links.
#[derive(Debug)]
pub(crate) struct Slot<N: TreeNode> {
    pub(crate) value: N,
    /// Non-owning back-reference, None for top nodes
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildSet<N::Id>,
    /// Memoized layer, cleared when the node moves
    pub(crate) layer: OnceLock<i32>,
}

/// Arena-backed tree or forest built from flat parent-referencing records.
///
/// Every input node is stored and indexed, including invalid ones and
/// discarded orphans, but only linked nodes are reachable from [`Tree::top_ids`]. Siblings are
/// kept in a [`ChildSet`] ordered by `O`.
#[derive(Debug)]
pub struct Tree<N: TreeNode, O = InsertionOrder> {
    pub(crate) kind: TreeKind,
    pub(crate) arena: Arena<Slot<N>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) top_nodes: ChildSet<N::Id>,
    /// Identifier index over every input node, last write wins
    pub(crate) index: HashMap<N::Id, NodeId>,
    pub(crate) size: usize,
    pub(crate) order: PhantomData<O>,
}

impl<N: TreeNode, O> Tree<N, O> {
    pub(crate) fn empty(kind: TreeKind) -> Self {
        Self {
            kind,
            arena: Arena::new(),
            root: None,
            top_nodes: ChildSet::new(),
            index: HashMap::new(),
            size: 0,
            order: PhantomData,
        }
    }

    pub(crate) fn insert_detached(&mut self, value: N) -> NodeId {
        NodeId(self.arena.insert(Slot {
            value,
            parent: None,
            children: ChildSet::new(),
            layer: OnceLock::new(),
        }))
    }

    pub(crate) fn slot(&self, id: NodeId) -> TreeResult<&Slot<N>> {
        self.arena
            .get(id.0)
            .ok_or_else(|| TreeError::UnknownNode(id.to_string()))
    }

    fn slot_mut(&mut self, id: NodeId) -> TreeResult<&mut Slot<N>> {
        self.arena
            .get_mut(id.0)
            .ok_or_else(|| TreeError::UnknownNode(id.to_string()))
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Root node; only set for [`TreeKind::Tree`].
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Top-level nodes; only populated for [`TreeKind::Forest`].
    pub fn top_nodes(&self) -> &[NodeId] {
        self.top_nodes.as_slice()
    }

    /// Default start set for traversals: the root or the forest's top nodes.
    pub fn top_ids(&self) -> &[NodeId] {
        match self.kind {
            TreeKind::Tree => self.root.as_slice(),
            TreeKind::Forest => self.top_nodes.as_slice(),
        }
    }

    /// Node count fixed at construction time.
    pub fn cached_size(&self) -> usize {
        self.size
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.arena.get(id.0).map(|slot| &slot.value)
    }

    pub fn value(&self, id: NodeId) -> TreeResult<&N> {
        self.slot(id).map(|slot| &slot.value)
    }

    /// Finds an input node by identifier, valid or not.
    pub fn lookup(&self, identifier: &N::Id) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id.0).and_then(|slot| slot.parent)
    }

    /// Children in sibling order; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena
            .get(id.0)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// True once linked without a parent.
    pub fn is_top(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Ancestors from the parent up to the top node.
    pub fn ancestors(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut visited = HashSet::from([id]);
        let mut chain = Vec::new();
        let mut current = self.slot(id)?.parent;
        while let Some(parent) = current {
            if !visited.insert(parent) {
                return Err(self.cycle_at(parent));
            }
            chain.push(parent);
            current = self.slot(parent)?.parent;
        }
        Ok(chain)
    }

    /// Distance from the nearest top-level ancestor.
    ///
    /// Top nodes are layer 0, invalid nodes -1. The result is memoized on the
    /// whole ancestor chain until the node is moved.
    #[instrument(level = "trace", skip(self))]
    pub fn layer(&self, id: NodeId) -> TreeResult<i32> {
        let slot = self.slot(id)?;
        if let Some(&layer) = slot.layer.get() {
            return Ok(layer);
        }
        if !slot.value.is_valid() {
            let _ = slot.layer.set(-1);
            return Ok(-1);
        }

        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        let mut current = id;
        let base = loop {
            if !visited.insert(current) {
                return Err(self.cycle_at(current));
            }
            let slot = self.slot(current)?;
            if let Some(&layer) = slot.layer.get() {
                break layer;
            }
            if !slot.value.is_valid() {
                let _ = slot.layer.set(-1);
                break -1;
            }
            chain.push(current);
            match slot.parent {
                Some(parent) => current = parent,
                None => break -1,
            }
        };

        let mut layer = base;
        for &node in chain.iter().rev() {
            layer += 1;
            let _ = self.slot(node)?.layer.set(layer);
        }
        Ok(layer)
    }

    /// Joins the names of every ancestor from the top down to `id`.
    pub fn path<F>(&self, id: NodeId, name: F, separator: &str) -> TreeResult<String>
    where
        F: Fn(&N) -> String,
    {
        let mut chain = self.ancestors(id)?;
        chain.reverse();
        chain.push(id);
        let names = chain
            .into_iter()
            .map(|node| self.value(node).map(&name))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(names.join(separator))
    }

    /// Detaches a node from its parent and from all of its children.
    ///
    /// The former children become parentless and are no longer reachable
    /// from the top nodes. Root and forest membership are left untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn isolate(&mut self, id: NodeId) -> TreeResult<()> {
        let slot = self.slot(id)?;
        let (parent, key) = (slot.parent, slot.value.identifier());
        if let Some(parent) = parent {
            self.slot_mut(parent)?.children.remove(id, &key);
        }
        let slot = self.slot_mut(id)?;
        slot.parent = None;
        let children = slot.children.take();
        self.forget_layers(id);
        for child in children {
            if let Some(slot) = self.arena.get_mut(child.0) {
                slot.parent = None;
            }
            self.forget_layers(child);
        }
        trace!("isolated {}", id);
        Ok(())
    }

    /// Clears memoized layers of `id` and its subtree.
    ///
    /// Layers are memoized along whole ancestor chains, so a node without a
    /// memo has no memoized descendant that depends on it.
    fn forget_layers(&mut self, id: NodeId) {
        if self.arena.get(id.0).map_or(true, |slot| slot.layer.get().is_none()) {
            return;
        }
        let mut stack = vec![id];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(slot) = self.arena.get_mut(current.0) {
                slot.layer.take();
                stack.extend_from_slice(slot.children.as_slice());
            }
        }
    }

    /// True if `candidate` is `id` or one of its ancestors.
    ///
    /// Links are acyclic once built, the step bound only guards the walk.
    fn is_on_chain(&self, candidate: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        for _ in 0..=self.arena.len() {
            match current {
                Some(node) if node == candidate => return true,
                Some(node) => current = self.parent(node),
                None => return false,
            }
        }
        true
    }

    fn cycle_at(&self, id: NodeId) -> TreeError {
        TreeError::CycleDetected {
            identifier: self
                .get(id)
                .map(|n| n.identifier().to_string())
                .unwrap_or_else(|| id.to_string()),
        }
    }
}

impl<N: TreeNode, O: SiblingOrder<N>> Tree<N, O> {
    /// Links `child` under `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` if `parent` already has a child with the same
    /// identifier; the child is then left where it was.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<bool> {
        let key = self.slot(child)?.value.identifier();
        self.slot(parent)?;
        // a leaf cannot be an ancestor of anything
        if parent == child || (!self.is_leaf(child) && self.is_on_chain(child, parent)) {
            return Err(self.cycle_at(child));
        }

        let position = {
            let arena = &self.arena;
            let new = &self.slot(child)?.value;
            self.slot(parent)?
                .children
                .position_for::<N, O, _>(&key, new, |id| arena.get(id.0).map(|s| &s.value))
        };
        let Some(position) = position else {
            return Ok(false);
        };

        if let Some(previous) = self.slot(child)?.parent {
            self.slot_mut(previous)?.children.remove(child, &key);
        }
        self.top_nodes.remove(child, &key);
        self.slot_mut(parent)?.children.insert_at(position, child, key);
        self.slot_mut(child)?.parent = Some(parent);
        self.forget_layers(child);
        Ok(true)
    }

    /// Adds a node to the forest's top set. Returns `false` on a duplicate identifier.
    pub(crate) fn insert_top(&mut self, id: NodeId) -> TreeResult<bool> {
        let new = &self.slot(id)?.value;
        let key = new.identifier();
        let arena = &self.arena;
        let position = self
            .top_nodes
            .position_for::<N, O, _>(&key, new, |n| arena.get(n.0).map(|s| &s.value));
        match position {
            Some(position) => {
                self.top_nodes.insert_at(position, id, key);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
