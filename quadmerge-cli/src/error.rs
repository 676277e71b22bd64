//! CLI error types.

use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line arguments.
    #[error("invalid arguments: {0}")]
    Args(String),

    /// The merge job failed.
    #[error(transparent)]
    Merge(#[from] quadmerge::JobError),
}
