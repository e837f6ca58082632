//! Depth-first traversal and the queries built on it.
//!
//! Every query is a call site over [`Tree::walk`], which keeps an explicit
//! worklist instead of recursing, so stack use does not grow with tree depth.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::TreeNode;

/// Control signal returned by a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversingAction {
    /// Visit this node's children next
    Continue,
    /// Halt the whole traversal
    Stop,
    /// Do not descend into this node's children
    Skip,
}

impl<N: TreeNode, O> Tree<N, O> {
    /// Pre-order depth-first walk starting at `start`, in order.
    ///
    /// A node's subtree is fully visited before its next sibling.
    pub fn walk<F>(&self, start: &[NodeId], mut visit: F)
    where
        F: FnMut(NodeId, &N) -> TraversingAction,
    {
        let mut queue: VecDeque<NodeId> = start.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            let Ok(slot) = self.slot(current) else {
                continue;
            };
            match visit(current, &slot.value) {
                TraversingAction::Stop => break,
                TraversingAction::Skip => continue,
                TraversingAction::Continue => {
                    for &child in slot.children.as_slice().iter().rev() {
                        queue.push_front(child);
                    }
                }
            }
        }
    }

    /// Walks the whole tree or forest.
    pub fn walk_all<F>(&self, visit: F)
    where
        F: FnMut(NodeId, &N) -> TraversingAction,
    {
        self.walk(self.top_ids(), visit)
    }

    /// Visits every node below `start`, never skipping or stopping.
    pub fn for_each_from<F>(&self, start: &[NodeId], mut consumer: F)
    where
        F: FnMut(NodeId, &N),
    {
        self.walk(start, |id, node| {
            consumer(id, node);
            TraversingAction::Continue
        })
    }

    pub fn for_each<F>(&self, consumer: F)
    where
        F: FnMut(NodeId, &N),
    {
        self.for_each_from(self.top_ids(), consumer)
    }

    /// Nodes below `start` that satisfy `predicate`, in visiting order.
    pub fn flatten_from<P>(&self, start: &[NodeId], predicate: P) -> Vec<NodeId>
    where
        P: Fn(&N) -> bool,
    {
        let mut list = Vec::new();
        self.for_each_from(start, |id, node| {
            if predicate(node) {
                list.push(id);
            }
        });
        list
    }

    pub fn flatten_filtered<P>(&self, predicate: P) -> Vec<NodeId>
    where
        P: Fn(&N) -> bool,
    {
        self.flatten_from(self.top_ids(), predicate)
    }

    /// Every reachable node in visiting order.
    pub fn flatten(&self) -> Vec<NodeId> {
        self.flatten_filtered(|_| true)
    }

    /// First node below `start` matching `predicate`; stops as soon as it is found.
    pub fn find_from<P>(&self, start: &[NodeId], predicate: P) -> Option<NodeId>
    where
        P: Fn(&N) -> bool,
    {
        let mut found = None;
        self.walk(start, |id, node| {
            if predicate(node) {
                found = Some(id);
                TraversingAction::Stop
            } else {
                TraversingAction::Continue
            }
        });
        found
    }

    pub fn find<P>(&self, predicate: P) -> Option<NodeId>
    where
        P: Fn(&N) -> bool,
    {
        self.find_from(self.top_ids(), predicate)
    }

    /// Maps matching nodes by `key`, in visiting order. Later visits
    /// overwrite earlier ones on key collision.
    pub fn map_by_filtered<K, F, P>(&self, key: F, predicate: P) -> IndexMap<K, NodeId>
    where
        K: Hash + Eq,
        F: Fn(&N) -> K,
        P: Fn(&N) -> bool,
    {
        let mut map = IndexMap::new();
        self.for_each(|id, node| {
            if predicate(node) {
                map.insert(key(node), id);
            }
        });
        map
    }

    pub fn map_by<K, F>(&self, key: F) -> IndexMap<K, NodeId>
    where
        K: Hash + Eq,
        F: Fn(&N) -> K,
    {
        self.map_by_filtered(key, |_| true)
    }

    /// Live node count, recomputed by walking; use after mutating the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.for_each(|_, _| count += 1);
        count
    }

    /// Reachable nodes without children.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.for_each(|id, _| {
            if self.is_leaf(id) {
                leaves.push(id);
            }
        });
        leaves
    }

    /// Number of layers below the top, 0 for an empty forest.
    pub fn depth(&self) -> TreeResult<usize> {
        let mut depth = 0;
        let mut failure = None;
        self.walk_all(|id, _| match self.layer(id) {
            Ok(layer) => {
                depth = depth.max(layer.max(0) as usize + 1);
                TraversingAction::Continue
            }
            Err(e) => {
                failure = Some(e);
                TraversingAction::Stop
            }
        });
        failure.map_or(Ok(depth), Err)
    }

    /// Emits one line per node, indented by its layer.
    ///
    /// The first indent repetition uses `first_prefix` when given, every
    /// further one `other_prefix`.
    #[instrument(level = "debug", skip_all)]
    pub fn render<E, F>(
        &self,
        mut emit: E,
        format_line: F,
        first_prefix: Option<&str>,
        other_prefix: &str,
    ) -> TreeResult<()>
    where
        E: FnMut(String),
        F: Fn(&N) -> String,
    {
        let mut failure: Option<TreeError> = None;
        self.walk_all(|id, node| {
            let layer = match self.layer(id) {
                Ok(layer) => layer,
                Err(e) => {
                    failure = Some(e);
                    return TraversingAction::Stop;
                }
            };
            let mut line = String::new();
            if layer > 0 {
                line.push_str(first_prefix.unwrap_or(other_prefix));
                for _ in 1..layer {
                    line.push_str(other_prefix);
                }
            }
            line.push_str(&format_line(node));
            emit(line);
            TraversingAction::Continue
        });
        failure.map_or(Ok(()), Err)
    }

    pub fn render_to_string<F>(
        &self,
        format_line: F,
        first_prefix: Option<&str>,
        other_prefix: &str,
    ) -> TreeResult<String>
    where
        F: Fn(&N) -> String,
    {
        let mut lines = Vec::new();
        self.render(|line| lines.push(line), format_line, first_prefix, other_prefix)?;
        Ok(lines.join("\n"))
    }
}

impl<N: TreeNode, O> fmt::Display for Tree<N, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tree[kind={}, size={}]", self.kind(), self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrphanPolicy;

    #[derive(Debug)]
    struct Item(&'static str, Option<&'static str>);

    impl TreeNode for Item {
        type Id = &'static str;

        fn is_top_level(&self) -> bool {
            self.1.is_none()
        }

        fn identifier(&self) -> Self::Id {
            self.0
        }

        fn parent_identifier(&self) -> Option<Self::Id> {
            self.1
        }
    }

    fn forest() -> Tree<Item> {
        Tree::build(
            vec![
                Item("a", None),
                Item("b", None),
                Item("a1", Some("a")),
                Item("a2", Some("a")),
                Item("a11", Some("a1")),
                Item("b1", Some("b")),
            ],
            true,
            Some(OrphanPolicy::Reject),
        )
        .unwrap()
    }

    fn names(tree: &Tree<Item>, ids: &[NodeId]) -> Vec<&'static str> {
        ids.iter().map(|&id| tree.value(id).unwrap().0).collect()
    }

    #[test]
    fn walk_is_preorder_depth_first() {
        let tree = forest();
        assert_eq!(
            names(&tree, &tree.flatten()),
            vec!["a", "a1", "a11", "a2", "b", "b1"]
        );
    }

    #[test]
    fn skip_prunes_subtree_only() {
        let tree = forest();
        let mut seen = Vec::new();
        tree.walk_all(|_, node| {
            seen.push(node.0);
            if node.0 == "a1" {
                TraversingAction::Skip
            } else {
                TraversingAction::Continue
            }
        });
        assert_eq!(seen, vec!["a", "a1", "a2", "b", "b1"]);
    }

    #[test]
    fn render_indents_by_layer() {
        let tree = forest();
        let out = tree
            .render_to_string(|n| n.0.to_string(), Some("+-"), "--")
            .unwrap();
        assert_eq!(out, "a\n+-a1\n+---a11\n+-a2\nb\n+-b1");
    }

    #[test]
    fn render_without_first_prefix_repeats_other_prefix() {
        let tree = forest();
        let mut lines = Vec::new();
        tree.render(|l| lines.push(l), |n| n.0.to_string(), None, "  ")
            .unwrap();
        assert_eq!(lines[2], "    a11");
    }

    #[test]
    fn leaves_and_depth() {
        let tree = forest();
        assert_eq!(names(&tree, &tree.leaves()), vec!["a11", "a2", "b1"]);
        assert_eq!(tree.depth().unwrap(), 3);
    }

    #[test]
    fn display_reports_kind_and_live_size() {
        assert_eq!(forest().to_string(), "Tree[kind=forest, size=6]");
    }
}
