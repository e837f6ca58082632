//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<TreeError> for CliError {
    fn from(e: TreeError) -> Self {
        CliError::Application(ApplicationError::Tree(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Tree(_) => crate::exitcode::DATAERR,
                ApplicationError::Load { .. } => crate::exitcode::DATAERR,
                ApplicationError::NotFound(_) => crate::exitcode::NOTFOUND,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_error_when_mapping_then_is_data_error() {
        let err: CliError = TreeError::EmptyInput.into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(err.to_string(), "nodes can not be empty");
    }

    #[test]
    fn given_usage_error_when_mapping_then_is_usage() {
        assert_eq!(CliError::Usage("no command".into()).exit_code(), crate::exitcode::USAGE);
    }
}
