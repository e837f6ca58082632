//! Node contract implemented by application records.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// A hierarchical element that knows its own identifier and its parent's.
///
/// Node identity is the identifier: two nodes with equal identifiers are the
/// same logical node, whatever their payload.
pub trait TreeNode {
    /// Identifier type, unique across one input collection.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Invalid nodes are excluded from treeization without raising an error.
    fn is_valid(&self) -> bool {
        true
    }

    /// True if this record has no parent conceptually.
    fn is_top_level(&self) -> bool;

    fn identifier(&self) -> Self::Id;

    /// Identifier of the parent record. Ignored for top-level nodes.
    fn parent_identifier(&self) -> Option<Self::Id>;
}

/// A node with a total order over its siblings.
///
/// The order must be a strict weak ordering among siblings. Siblings that
/// compare `Equal` but carry different identifiers remain distinct entries.
pub trait SortedTreeNode: TreeNode {
    fn compare(&self, other: &Self) -> Ordering;
}
