//! Synchronization engine
//!
//! Turns keystrokes into view-state transitions and repository operations.
//! Owns the serialization discipline for mutating operations and the
//! refresh protocol that keeps the file lists in step with the repository.
//!
//! All methods run on the event loop. Operations run on the blocking pool
//! and report back through a channel that the loop drains, so the view
//! state only ever has one writer.

mod operation;

pub use operation::{Completion, Operation, OperationOutput};

use std::sync::Arc;

use crossterm::event::{KeyEvent, KeyEventKind};
use thiserror::Error;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};

use crate::app::{Direction, Focus, PromptPurpose, ViewState};
use crate::git::{BackendError, RepoClient};
use crate::input::{Command, PromptKey};

/// A command that had nothing to act on
///
/// Never reported to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalStateError {
    #[error("no item selected in the {0:?} list")]
    NoSelection(Focus),
}

/// Dispatches keys and runs operations against one repository
pub struct SyncEngine {
    repo: Arc<dyn RepoClient>,
    commit_message: String,
    /// One permit: held while a mutating operation is in flight
    mutation_permit: Arc<Semaphore>,
    in_flight: Option<OwnedSemaphorePermit>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Sequence number of the last RefreshStatus issued
    refresh_issued: u64,
    /// Sequence number of the snapshot currently in the view state
    refresh_applied: u64,
}

impl SyncEngine {
    pub fn new(repo: Arc<dyn RepoClient>, commit_message: impl Into<String>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            repo,
            commit_message: commit_message.into(),
            mutation_permit: Arc::new(Semaphore::new(1)),
            in_flight: None,
            completion_tx,
            completion_rx,
            refresh_issued: 0,
            refresh_applied: 0,
        }
    }

    /// Whether a mutating operation has been launched and not yet finished
    pub fn is_mutation_in_flight(&self) -> bool {
        self.mutation_permit.available_permits() == 0
    }

    /// Launch the two read-only startup loads concurrently
    pub fn start_initial_load(&mut self) {
        tracing::debug!("Starting initial load");
        self.launch(Operation::LoadTree);
        self.refresh_status();
    }

    /// Issue a RefreshStatus
    pub fn refresh_status(&mut self) {
        self.launch(Operation::RefreshStatus);
    }

    /// Handle one keystroke
    pub fn dispatch(&mut self, state: &mut ViewState, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if !state.is_ready() {
            tracing::trace!("Ignoring {:?} before the readiness gate opened", key.code);
            return;
        }
        if state.prompt().is_some() {
            self.handle_prompt_key(state, &key);
            return;
        }

        let Some(command) = Command::from_key(&key) else {
            return;
        };
        match command {
            Command::Quit => state.request_quit(),
            Command::SwitchFocus => state.toggle_focus(),
            Command::Commit => {
                let message = self.commit_message.clone();
                self.submit(state, Operation::Commit { message });
            }
            Command::OpenBranchPrompt => state.open_prompt(PromptPurpose::CreateBranch),
            Command::OpenSwitchPrompt => state.open_prompt(PromptPurpose::SwitchBranch),
            Command::Push => {
                self.submit(state, Operation::Push);
            }
            Command::Pull => {
                self.submit(state, Operation::Pull);
            }
            Command::ToggleStage => match toggle_stage_operation(state) {
                Ok(operation) => {
                    self.submit(state, operation);
                }
                Err(e) => tracing::trace!("Toggle-stage ignored: {}", e),
            },
            Command::MoveDown => state.move_selection(Direction::Down),
            Command::MoveUp => state.move_selection(Direction::Up),
        }
    }

    fn handle_prompt_key(&mut self, state: &mut ViewState, key: &KeyEvent) {
        match PromptKey::from_key(key) {
            PromptKey::Edit(edit) => state.edit_prompt(edit),
            PromptKey::Cancel => {
                state.close_prompt();
            }
            PromptKey::Submit => {
                let Some(prompt) = state.close_prompt() else {
                    return;
                };
                let name = prompt.buffer.trim();
                if name.is_empty() {
                    tracing::debug!("Blank prompt submitted, nothing to do");
                    return;
                }
                let operation = match prompt.purpose {
                    PromptPurpose::CreateBranch => Operation::CreateBranch(name.to_string()),
                    PromptPurpose::SwitchBranch => Operation::SwitchBranch(name.to_string()),
                };
                self.submit(state, operation);
            }
            PromptKey::Ignored => {}
        }
    }

    /// Launch a mutating operation unless one is already in flight
    ///
    /// Returns false when the request was dropped.
    fn submit(&mut self, state: &mut ViewState, operation: Operation) -> bool {
        let Ok(permit) = Arc::clone(&self.mutation_permit).try_acquire_owned() else {
            tracing::debug!("Dropping {}: another operation is in flight", operation);
            return false;
        };
        tracing::info!("Starting {}", operation);
        state.status.begin(operation.running_label());
        state.needs_render = true;
        self.in_flight = Some(permit);
        self.launch(operation);
        true
    }

    /// Run an operation on the blocking pool and report back over the channel
    ///
    /// A panic in the client still produces a completion, so the mutation
    /// lock is always released.
    fn launch(&mut self, operation: Operation) {
        let seq = if operation == Operation::RefreshStatus {
            self.refresh_issued += 1;
            self.refresh_issued
        } else {
            0
        };
        let repo = Arc::clone(&self.repo);
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let task_operation = operation.clone();
            let result =
                match tokio::task::spawn_blocking(move || task_operation.run(repo.as_ref())).await {
                    Ok(result) => result,
                    Err(e) => Err(BackendError::TaskFailed(e.to_string())),
                };
            // The receiver only goes away at shutdown
            let _ = tx.send(Completion {
                operation,
                seq,
                result,
            });
        });
    }

    /// Next finished operation, if one is waiting
    pub fn try_next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.try_recv().ok()
    }

    /// Wait for the next finished operation
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Fold a finished operation into the view state
    ///
    /// Releases the mutation lock when a mutating operation finishes.
    /// Returns the operation so the caller can track startup progress.
    pub fn handle_completion(&mut self, state: &mut ViewState, completion: Completion) -> Operation {
        let Completion {
            operation,
            seq,
            result,
        } = completion;

        if operation.is_mutating() {
            self.in_flight = None;
        }

        match result {
            Ok(OperationOutput::Status(snapshot)) => {
                if seq > self.refresh_applied {
                    self.refresh_applied = seq;
                    tracing::debug!(
                        "Applied status #{}: {} unstaged, {} staged",
                        seq,
                        snapshot.unstaged.len(),
                        snapshot.staged.len()
                    );
                    state.apply_snapshot(snapshot);
                } else {
                    tracing::debug!(
                        "Discarding status #{} older than applied #{}",
                        seq,
                        self.refresh_applied
                    );
                }
            }
            Ok(OperationOutput::Tree(tree)) => {
                tracing::debug!("File tree loaded with {} nodes", tree.node_count());
                state.apply_tree(tree);
            }
            Ok(OperationOutput::Done) => {
                tracing::info!("Finished {}", operation);
                state.status.succeed(operation.success_message());
                state.needs_render = true;
                if operation.is_mutating() {
                    self.refresh_status();
                }
            }
            Err(e) => {
                tracing::warn!("{} ({}): {}", operation.failure_message(), operation, e);
                let message = format!("{}: {}", operation.failure_message(), e);
                // Only the mutating operation owns the spinner
                if operation.is_mutating() {
                    state.status.fail(message);
                } else {
                    state.status.report_failure(message);
                }
                state.needs_render = true;
            }
        }

        operation
    }
}

/// Stage or unstage the focused list's selected path
///
/// The path is read from the snapshot currently in the view state, which is
/// what the user sees on screen.
fn toggle_stage_operation(state: &ViewState) -> Result<Operation, LocalStateError> {
    let focus = state.focus();
    let path = state
        .selected_path()
        .ok_or(LocalStateError::NoSelection(focus))?
        .to_string();
    Ok(match focus {
        Focus::Unstaged => Operation::Stage(path),
        Focus::Staged => Operation::Unstage(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StatusSnapshot;

    fn snapshot(unstaged: &[&str], staged: &[&str]) -> StatusSnapshot {
        StatusSnapshot::new(
            unstaged.iter().map(|s| s.to_string()).collect(),
            staged.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_toggle_stage_from_unstaged() {
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot(&["a.txt", "b.txt"], &[]));
        assert_eq!(
            toggle_stage_operation(&state),
            Ok(Operation::Stage("a.txt".to_string()))
        );
    }

    #[test]
    fn test_toggle_stage_from_staged() {
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot(&[], &["a.txt"]));
        state.set_focus(Focus::Staged);
        assert_eq!(
            toggle_stage_operation(&state),
            Ok(Operation::Unstage("a.txt".to_string()))
        );
    }

    #[test]
    fn test_toggle_stage_empty_list() {
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot(&["a.txt"], &[]));
        state.set_focus(Focus::Staged);
        assert_eq!(
            toggle_stage_operation(&state),
            Err(LocalStateError::NoSelection(Focus::Staged))
        );
    }
}
