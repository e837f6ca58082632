//! Sorted variant: siblings and forest top nodes follow the node order.

use crate::domain::arena::Tree;
use crate::domain::order::NaturalOrder;

/// Tree whose children and top nodes are kept in [`SortedTreeNode`] order.
///
/// [`SortedTreeNode`]: crate::domain::SortedTreeNode
pub type SortedTree<N> = Tree<N, NaturalOrder>;
