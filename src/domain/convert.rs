//! Conversion of built trees into `termtree` for box-drawing output.

use std::collections::HashMap;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};
use crate::domain::node::TreeNode;

pub trait TreeConvert<N> {
    /// One `termtree` per top node, labelled by `label`.
    fn to_termtree<F>(&self, label: F) -> Vec<TermTree<String>>
    where
        F: Fn(&N) -> String;
}

impl<N: TreeNode, O> TreeConvert<N> for Tree<N, O> {
    #[instrument(level = "debug", skip_all)]
    fn to_termtree<F>(&self, label: F) -> Vec<TermTree<String>>
    where
        F: Fn(&N) -> String,
    {
        // Assemble bottom-up: in reverse pre-order every child is built before its parent.
        let order = self.flatten();
        let mut built: HashMap<NodeId, TermTree<String>> = HashMap::with_capacity(order.len());
        for &id in order.iter().rev() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let mut tree = TermTree::new(label(node));
            for child in self.children(id) {
                if let Some(leaf) = built.remove(child) {
                    tree.push(leaf);
                }
            }
            built.insert(id, tree);
        }

        self.top_ids()
            .iter()
            .filter_map(|id| built.remove(id))
            .collect()
    }
}
