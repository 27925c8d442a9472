//! Repository backend
//!
//! `RepoClient` is the capability surface the synchronization engine talks
//! to. `GitRepo` implements it with git2 for local index and ref operations
//! and the git CLI for network operations.

mod error;

pub use error::BackendError;

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, ObjectType, Reference, Repository, Status, StatusOptions};

/// Wholesale copy of the repository status at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Untracked paths followed by modified paths, in backend order
    pub unstaged: Vec<String>,
    /// Paths with changes recorded in the index
    pub staged: Vec<String>,
}

impl StatusSnapshot {
    pub fn new(unstaged: Vec<String>, staged: Vec<String>) -> Self {
        Self { unstaged, staged }
    }
}

/// Capability to query and mutate version-control state
///
/// Calls are blocking; the engine runs them on the blocking thread pool so
/// they never stall the event loop.
pub trait RepoClient: Send + Sync + 'static {
    /// Root of the working tree
    fn workdir(&self) -> PathBuf;

    fn status(&self) -> Result<StatusSnapshot, BackendError>;

    /// Add a path to the index (removes it from the index if deleted on disk)
    fn stage(&self, path: &str) -> Result<(), BackendError>;

    /// Reset a path's index entry to HEAD, leaving the working tree untouched
    fn unstage(&self, path: &str) -> Result<(), BackendError>;

    fn commit(&self, message: &str) -> Result<(), BackendError>;

    /// Create a local branch at HEAD and check it out
    fn create_branch(&self, name: &str) -> Result<(), BackendError>;

    fn switch_branch(&self, name: &str) -> Result<(), BackendError>;

    fn push(&self) -> Result<(), BackendError>;

    fn pull(&self) -> Result<(), BackendError>;
}

/// git-backed repository client
///
/// Holds only the working directory; each call opens the repository afresh
/// so the client can be shared across threads.
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Locate the repository containing `path`
    ///
    /// If no repository is found the path is used as-is; every call will
    /// then fail and be reported rather than aborting startup.
    pub fn new(path: &Path) -> Self {
        let workdir = match Repository::discover(path) {
            Ok(repo) => repo
                .workdir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| path.to_path_buf()),
            Err(e) => {
                tracing::warn!("No git repository found from {:?}: {}", path, e);
                path.to_path_buf()
            }
        };
        Self { workdir }
    }

    fn open(&self) -> Result<Repository, BackendError> {
        let repo = Repository::open(&self.workdir)?;
        if repo.is_bare() {
            return Err(BackendError::NoWorkdir);
        }
        Ok(repo)
    }

    /// Run a git CLI command in the working directory
    ///
    /// Network operations go through the CLI so the user's SSH agent and
    /// credential helpers apply.
    fn run_git(&self, args: &[&str]) -> Result<(), BackendError> {
        tracing::debug!("Running git {:?} in {:?}", args, self.workdir);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            return Err(BackendError::Command {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

const UNSTAGED_MODIFIED: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_TYPECHANGE)
    .union(Status::WT_RENAMED);

const STAGED: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

/// HEAD's commit, or None on an unborn branch
fn head_commit(repo: &Repository) -> Result<Option<git2::Commit<'_>>, BackendError> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl RepoClient for GitRepo {
    fn workdir(&self) -> PathBuf {
        self.workdir.clone()
    }

    fn status(&self) -> Result<StatusSnapshot, BackendError> {
        let repo = self.open()?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = repo.statuses(Some(&mut opts))?;

        let mut untracked = Vec::new();
        let mut modified = Vec::new();
        let mut staged = Vec::new();

        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                tracing::debug!("Skipping status entry with non-UTF-8 path");
                continue;
            };
            let status = entry.status();
            if status.contains(Status::WT_NEW) {
                untracked.push(path.to_string());
            } else if status.intersects(UNSTAGED_MODIFIED) {
                modified.push(path.to_string());
            }
            if status.intersects(STAGED) {
                staged.push(path.to_string());
            }
        }

        untracked.extend(modified);
        Ok(StatusSnapshot::new(untracked, staged))
    }

    fn stage(&self, path: &str) -> Result<(), BackendError> {
        let repo = self.open()?;
        let mut index = repo.index()?;
        let rel = Path::new(path);
        if self.workdir.join(rel).symlink_metadata().is_ok() {
            index.add_path(rel)?;
        } else {
            index.remove_path(rel)?;
        }
        index.write()?;
        Ok(())
    }

    fn unstage(&self, path: &str) -> Result<(), BackendError> {
        let repo = self.open()?;
        match head_commit(&repo)? {
            Some(commit) => {
                repo.reset_default(Some(commit.as_object()), [path])?;
            }
            None => {
                // Nothing to reset to on an unborn branch: drop the entry
                let mut index = repo.index()?;
                index.remove_path(Path::new(path))?;
                index.write()?;
            }
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), BackendError> {
        let repo = self.open()?;
        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let parent = head_commit(&repo)?;

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree.len() == 0,
        };
        if unchanged {
            return Err(BackendError::NothingToCommit);
        }

        let signature = repo.signature()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        tracing::info!("Created commit {}", oid);
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<(), BackendError> {
        let repo = self.open()?;
        let refname = format!("refs/heads/{}", name);
        if !Reference::is_valid_name(&refname) {
            return Err(BackendError::InvalidBranchName(name.to_string()));
        }

        match head_commit(&repo)? {
            Some(commit) => {
                // Branch points at HEAD, so the working tree already matches
                repo.branch(name, &commit, false)?;
                repo.set_head(&refname)?;
            }
            None => {
                repo.set_head(&refname)?;
            }
        }
        Ok(())
    }

    fn switch_branch(&self, name: &str) -> Result<(), BackendError> {
        let repo = self.open()?;
        let branch = match repo.find_branch(name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(BackendError::BranchNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let reference = branch.into_reference();
        let refname = reference
            .name()
            .ok_or_else(|| BackendError::InvalidBranchName(name.to_string()))?
            .to_string();
        let target = reference.peel(ObjectType::Commit)?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(&target, Some(&mut checkout))?;
        repo.set_head(&refname)?;
        Ok(())
    }

    fn push(&self) -> Result<(), BackendError> {
        self.run_git(&["push"])
    }

    fn pull(&self) -> Result<(), BackendError> {
        self.run_git(&["pull"])
    }
}
