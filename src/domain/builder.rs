//! Tree builder: turns flat parent-referencing records into a linked tree or forest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{SortedTreeNode, TreeNode};
use crate::domain::order::{InsertionOrder, NaturalOrder, SiblingOrder};

/// Single-rooted tree or multi-rooted forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TreeKind {
    #[default]
    Tree,
    Forest,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Tree => write!(f, "tree"),
            TreeKind::Forest => write!(f, "forest"),
        }
    }
}

/// What to do with a node whose parent identifier does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Drop the node silently
    #[default]
    Discard,
    /// Promote the node to the top level (forest) or under the root (tree)
    Top,
    /// Fail the whole construction
    Reject,
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanPolicy::Discard => write!(f, "discard"),
            OrphanPolicy::Top => write!(f, "top"),
            OrphanPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for OrphanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(OrphanPolicy::Discard),
            "top" => Ok(OrphanPolicy::Top),
            "reject" => Ok(OrphanPolicy::Reject),
            other => Err(format!(
                "unknown orphan policy '{}' (expected discard, top or reject)",
                other
            )),
        }
    }
}

/// Constructs trees and forests from untreeized nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeBuilder {
    kind: TreeKind,
    orphan_policy: Option<OrphanPolicy>,
}

impl TreeBuilder {
    pub fn new(kind: TreeKind) -> Self {
        Self {
            kind,
            orphan_policy: None,
        }
    }

    pub fn tree() -> Self {
        Self::new(TreeKind::Tree)
    }

    pub fn forest() -> Self {
        Self::new(TreeKind::Forest)
    }

    /// Orphan policy; `None` behaves like [`OrphanPolicy::Discard`].
    pub fn orphan_policy(mut self, policy: impl Into<Option<OrphanPolicy>>) -> Self {
        self.orphan_policy = policy.into();
        self
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn build<N, I>(&self, nodes: I) -> TreeResult<Tree<N>>
    where
        N: TreeNode,
        I: IntoIterator<Item = N>,
    {
        self.build_ordered::<N, InsertionOrder, I>(nodes)
    }

    /// Builds the sorted variant: siblings ordered by [`SortedTreeNode::compare`].
    pub fn build_sorted<N, I>(&self, nodes: I) -> TreeResult<Tree<N, NaturalOrder>>
    where
        N: SortedTreeNode,
        I: IntoIterator<Item = N>,
    {
        self.build_ordered::<N, NaturalOrder, I>(nodes)
    }

    /// Treeizes `nodes` with siblings ordered by `O`.
    ///
    /// Construction is atomic: the tree is only returned if every step succeeds.
    #[instrument(level = "debug", skip_all, fields(kind = %self.kind, policy = ?self.orphan_policy))]
    pub fn build_ordered<N, O, I>(&self, nodes: I) -> TreeResult<Tree<N, O>>
    where
        N: TreeNode,
        O: SiblingOrder<N>,
        I: IntoIterator<Item = N>,
    {
        let mut tree = Tree::<N, O>::empty(self.kind);
        let ids: Vec<NodeId> = nodes
            .into_iter()
            .map(|node| tree.insert_detached(node))
            .collect();
        if ids.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        // Index every node, invalid ones included (duplicates: last write wins).
        // A child of an invalid node links under it and stays unreachable.
        for &id in &ids {
            let key = tree.value(id)?.identifier();
            tree.index.insert(key, id);
        }

        let policy = self.orphan_policy.unwrap_or_default();
        let mut orphans = Vec::new();
        let mut has_top_container = false;
        let mut size = 0;

        for &id in &ids {
            let node = tree.value(id)?;
            if !node.is_valid() {
                trace!("skipping invalid node {}", node.identifier());
                continue;
            }
            let identifier = node.identifier();

            if node.is_top_level() {
                match self.kind {
                    TreeKind::Forest => {
                        has_top_container = true;
                        if tree.insert_top(id)? {
                            size += 1;
                        }
                    }
                    TreeKind::Tree => {
                        if tree.root.is_some() {
                            return Err(TreeError::DuplicateRoot {
                                identifier: identifier.to_string(),
                            });
                        }
                        tree.root = Some(id);
                        size += 1;
                    }
                }
                trace!("top node {}", identifier);
                continue;
            }

            let parent_identifier = node.parent_identifier();
            let parent = parent_identifier
                .as_ref()
                .and_then(|key| tree.lookup(key));

            match (parent, policy) {
                (Some(parent), _) => {
                    if tree.add_child(parent, id)? {
                        size += 1;
                    }
                }
                (None, OrphanPolicy::Discard) => {
                    trace!("discarding orphan {}", identifier);
                }
                (None, OrphanPolicy::Reject) => {
                    return Err(TreeError::MissingParent {
                        parent: parent_identifier
                            .map(|p| p.to_string())
                            .unwrap_or_default(),
                        node: identifier.to_string(),
                    });
                }
                (None, OrphanPolicy::Top) => {
                    trace!("deferring orphan {}", identifier);
                    orphans.push(id);
                }
            }
        }

        if !orphans.is_empty() {
            match self.kind {
                TreeKind::Forest => {
                    if !has_top_container {
                        return Err(TreeError::NoTopContainer { kind: self.kind });
                    }
                    for orphan in orphans {
                        if tree.insert_top(orphan)? {
                            size += 1;
                        }
                    }
                }
                TreeKind::Tree => {
                    let root = tree
                        .root
                        .ok_or(TreeError::NoTopContainer { kind: self.kind })?;
                    for orphan in orphans {
                        if tree.add_child(root, orphan)? {
                            size += 1;
                        }
                    }
                }
            }
        }

        if self.kind == TreeKind::Tree && tree.root.is_none() {
            return Err(TreeError::NoRoot);
        }

        tree.size = size;
        debug!(
            "built {} with {} of {} input nodes",
            self.kind,
            size,
            ids.len()
        );
        Ok(tree)
    }
}

impl<N: TreeNode> Tree<N> {
    /// Builds a tree (`forest == false`) or forest with insertion-ordered siblings.
    pub fn build<I>(nodes: I, forest: bool, orphan_policy: Option<OrphanPolicy>) -> TreeResult<Self>
    where
        I: IntoIterator<Item = N>,
    {
        builder_for(forest, orphan_policy).build(nodes)
    }
}

impl<N: SortedTreeNode> Tree<N, NaturalOrder> {
    /// Builds a tree or forest whose siblings follow the node order.
    pub fn build_sorted<I>(
        nodes: I,
        forest: bool,
        orphan_policy: Option<OrphanPolicy>,
    ) -> TreeResult<Self>
    where
        I: IntoIterator<Item = N>,
    {
        builder_for(forest, orphan_policy).build_sorted(nodes)
    }
}

fn builder_for(forest: bool, orphan_policy: Option<OrphanPolicy>) -> TreeBuilder {
    let kind = if forest {
        TreeKind::Forest
    } else {
        TreeKind::Tree
    };
    TreeBuilder::new(kind).orphan_policy(orphan_policy)
}
