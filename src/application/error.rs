//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TreeError;

/// Application errors wrap domain errors and add loading and config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid department table {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("node not found: {0}")]
    NotFound(String),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
