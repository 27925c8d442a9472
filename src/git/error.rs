//! Repository backend errors

use thiserror::Error;

/// A failed repository call
///
/// These are never fatal to the dashboard: they are reported on the status
/// line and in the log, and the mutation lock is released.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Git(#[from] git2::Error),

    #[error("{command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("repository has no working directory")]
    NoWorkdir,

    /// The background task running the call panicked or was aborted
    #[error("operation task failed: {0}")]
    TaskFailed(String),
}
