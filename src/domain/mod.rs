//! Domain layer: node contract, treeization and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod convert;
pub mod error;
pub mod node;
pub mod order;
pub mod sorted;
pub mod traversal;

pub use arena::{NodeId, Tree};
pub use builder::{OrphanPolicy, TreeBuilder, TreeKind};
pub use convert::TreeConvert;
pub use error::{TreeError, TreeResult};
pub use node::{SortedTreeNode, TreeNode};
pub use order::{ChildSet, InsertionOrder, NaturalOrder, SiblingOrder};
pub use sorted::SortedTree;
pub use traversal::TraversingAction;
