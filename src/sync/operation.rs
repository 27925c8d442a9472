//! Repository operations
//!
//! An `Operation` is one unit of work against the repository client. The
//! engine runs it off the event loop and receives a `Completion` back.

use std::fmt;

use crate::file_tree::FileTreeNode;
use crate::git::{BackendError, RepoClient, StatusSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Commit { message: String },
    CreateBranch(String),
    SwitchBranch(String),
    Stage(String),
    Unstage(String),
    Push,
    Pull,
    RefreshStatus,
    LoadTree,
}

/// Value produced by a successful operation
#[derive(Debug)]
pub enum OperationOutput {
    Done,
    Status(StatusSnapshot),
    Tree(FileTreeNode),
}

/// A finished operation, delivered back to the event loop
#[derive(Debug)]
pub struct Completion {
    pub operation: Operation,
    /// Issue order of a RefreshStatus; 0 for other operations
    pub seq: u64,
    pub result: Result<OperationOutput, BackendError>,
}

impl Operation {
    /// Whether the operation changes repository or working-tree state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Operation::RefreshStatus | Operation::LoadTree)
    }

    /// Spinner text while the operation runs
    pub fn running_label(&self) -> String {
        match self {
            Operation::Commit { .. } => "Committing changes...".to_string(),
            Operation::CreateBranch(name) => format!("Creating branch {}...", name),
            Operation::SwitchBranch(name) => format!("Switching to branch {}...", name),
            Operation::Stage(path) => format!("Staging {}...", path),
            Operation::Unstage(path) => format!("Unstaging {}...", path),
            Operation::Push => "Pushing...".to_string(),
            Operation::Pull => "Pulling...".to_string(),
            Operation::RefreshStatus => "Fetching Git status...".to_string(),
            Operation::LoadTree => "Loading file tree...".to_string(),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Operation::Commit { .. } => "Changes committed".to_string(),
            Operation::CreateBranch(name) => format!("Branch {} created", name),
            Operation::SwitchBranch(name) => format!("Switched to branch {}", name),
            Operation::Stage(path) => format!("Staged {}", path),
            Operation::Unstage(path) => format!("Unstaged {}", path),
            Operation::Push => "Pushed".to_string(),
            Operation::Pull => "Pulled".to_string(),
            Operation::RefreshStatus => "Git status fetched".to_string(),
            Operation::LoadTree => "File tree loaded".to_string(),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Commit { .. } => "Commit failed",
            Operation::CreateBranch(_) => "Branch creation failed",
            Operation::SwitchBranch(_) => "Branch switch failed",
            Operation::Stage(_) => "Failed to stage file",
            Operation::Unstage(_) => "Failed to unstage file",
            Operation::Push => "Push failed",
            Operation::Pull => "Pull failed",
            Operation::RefreshStatus => "Failed to fetch Git status",
            Operation::LoadTree => "Failed to load file tree",
        }
    }

    /// Execute against the repository. Blocking.
    pub fn run(&self, repo: &dyn RepoClient) -> Result<OperationOutput, BackendError> {
        match self {
            Operation::Commit { message } => repo.commit(message).map(|_| OperationOutput::Done),
            Operation::CreateBranch(name) => {
                repo.create_branch(name).map(|_| OperationOutput::Done)
            }
            Operation::SwitchBranch(name) => {
                repo.switch_branch(name).map(|_| OperationOutput::Done)
            }
            Operation::Stage(path) => repo.stage(path).map(|_| OperationOutput::Done),
            Operation::Unstage(path) => repo.unstage(path).map(|_| OperationOutput::Done),
            Operation::Push => repo.push().map(|_| OperationOutput::Done),
            Operation::Pull => repo.pull().map(|_| OperationOutput::Done),
            Operation::RefreshStatus => repo.status().map(OperationOutput::Status),
            Operation::LoadTree => FileTreeNode::build(&repo.workdir())
                .map(OperationOutput::Tree)
                .map_err(BackendError::from),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Commit { .. } => write!(f, "commit"),
            Operation::CreateBranch(name) => write!(f, "create-branch {}", name),
            Operation::SwitchBranch(name) => write!(f, "switch-branch {}", name),
            Operation::Stage(path) => write!(f, "stage {}", path),
            Operation::Unstage(path) => write!(f, "unstage {}", path),
            Operation::Push => write!(f, "push"),
            Operation::Pull => write!(f, "pull"),
            Operation::RefreshStatus => write!(f, "refresh-status"),
            Operation::LoadTree => write!(f, "load-tree"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutating_classification() {
        let mutating = [
            Operation::Commit {
                message: "m".to_string(),
            },
            Operation::CreateBranch("b".to_string()),
            Operation::SwitchBranch("b".to_string()),
            Operation::Stage("a".to_string()),
            Operation::Unstage("a".to_string()),
            Operation::Push,
            Operation::Pull,
        ];
        assert!(mutating.iter().all(Operation::is_mutating));
        assert!(!Operation::RefreshStatus.is_mutating());
        assert!(!Operation::LoadTree.is_mutating());
    }

    #[test]
    fn test_messages_name_the_target() {
        let op = Operation::Stage("src/lib.rs".to_string());
        assert_eq!(op.running_label(), "Staging src/lib.rs...");
        assert_eq!(op.success_message(), "Staged src/lib.rs");
        assert_eq!(op.to_string(), "stage src/lib.rs");
    }
}
