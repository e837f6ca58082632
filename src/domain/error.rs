//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::TreeKind;

/// Errors raised while treeizing a node collection or mutating a built tree.
///
/// Identifiers are carried in their rendered (`Display`) form so the error
/// stays independent of the node type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("nodes can not be empty")]
    EmptyInput,

    #[error("found replicated root node: {identifier}")]
    DuplicateRoot { identifier: String },

    #[error("cannot find parent node '{parent}' for node '{node}'")]
    MissingParent { parent: String, node: String },

    #[error("cannot place orphan nodes: {kind} has no top container")]
    NoTopContainer { kind: TreeKind },

    #[error("tree has no root node")]
    NoRoot,

    #[error("cycle detected in hierarchy at node: {identifier}")]
    CycleDetected { identifier: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
