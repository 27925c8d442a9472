//! Shared fixtures for engine tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use gitlith::app::{Focus, ViewState};
use gitlith::git::{BackendError, RepoClient, StatusSnapshot};
use gitlith::sync::{Operation, SyncEngine};

#[derive(Default)]
struct MockState {
    unstaged: Vec<String>,
    staged: Vec<String>,
    /// Every call made, in order, e.g. "stage b.txt"
    calls: Vec<String>,
    active_mutations: usize,
    max_concurrent_mutations: usize,
    /// Name of the next mutating call to fail
    fail_next: Option<&'static str>,
    /// Name of the next mutating call to panic
    panic_next: Option<&'static str>,
}

/// In-memory repository client
///
/// Stage and unstage move paths between the two lists. Mutating calls can be
/// held until released to simulate slow operations.
pub struct MockRepo {
    dir: TempDir,
    state: Mutex<MockState>,
    held: Mutex<bool>,
    released: Condvar,
}

impl MockRepo {
    pub fn new(unstaged: &[&str], staged: &[&str]) -> Arc<Self> {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "hello").unwrap();
        Arc::new(Self {
            dir,
            state: Mutex::new(MockState {
                unstaged: unstaged.iter().map(|s| s.to_string()).collect(),
                staged: staged.iter().map(|s| s.to_string()).collect(),
                ..MockState::default()
            }),
            held: Mutex::new(false),
            released: Condvar::new(),
        })
    }

    /// Block mutating calls until `release`
    pub fn hold(&self) {
        *self.held.lock().unwrap() = true;
    }

    pub fn release(&self) {
        *self.held.lock().unwrap() = false;
        self.released.notify_all();
    }

    pub fn fail_next(&self, call: &'static str) {
        self.state.lock().unwrap().fail_next = Some(call);
    }

    pub fn panic_next(&self, call: &'static str) {
        self.state.lock().unwrap().panic_next = Some(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than status queries
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "status")
            .collect()
    }

    pub fn max_concurrent_mutations(&self) -> usize {
        self.state.lock().unwrap().max_concurrent_mutations
    }

    pub fn lists(&self) -> (Vec<String>, Vec<String>) {
        let state = self.state.lock().unwrap();
        (state.unstaged.clone(), state.staged.clone())
    }

    fn mutate(
        &self,
        name: &'static str,
        call: String,
        apply: impl FnOnce(&mut MockState),
    ) -> Result<(), BackendError> {
        let (fail, panic) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            state.active_mutations += 1;
            state.max_concurrent_mutations =
                state.max_concurrent_mutations.max(state.active_mutations);
            let fail = state.fail_next == Some(name);
            let panic = state.panic_next == Some(name);
            if fail {
                state.fail_next = None;
            }
            if panic {
                state.panic_next = None;
                state.active_mutations -= 1;
            }
            (fail, panic)
        };
        if panic {
            panic!("mock {} panicked", name);
        }

        let mut held = self.held.lock().unwrap();
        while *held {
            held = self.released.wait(held).unwrap();
        }
        drop(held);

        let mut state = self.state.lock().unwrap();
        state.active_mutations -= 1;
        if fail {
            return Err(BackendError::Command {
                command: format!("git {}", name),
                stderr: "mock failure".to_string(),
            });
        }
        apply(&mut state);
        Ok(())
    }
}

impl RepoClient for MockRepo {
    fn workdir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    fn status(&self) -> Result<StatusSnapshot, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("status".to_string());
        Ok(StatusSnapshot::new(
            state.unstaged.clone(),
            state.staged.clone(),
        ))
    }

    fn stage(&self, path: &str) -> Result<(), BackendError> {
        let path = path.to_string();
        self.mutate("stage", format!("stage {}", path), |state| {
            state.unstaged.retain(|p| *p != path);
            state.staged.push(path);
        })
    }

    fn unstage(&self, path: &str) -> Result<(), BackendError> {
        let path = path.to_string();
        self.mutate("unstage", format!("unstage {}", path), |state| {
            state.staged.retain(|p| *p != path);
            state.unstaged.push(path);
        })
    }

    fn commit(&self, message: &str) -> Result<(), BackendError> {
        self.mutate("commit", format!("commit {}", message), |state| {
            state.staged.clear();
        })
    }

    fn create_branch(&self, name: &str) -> Result<(), BackendError> {
        self.mutate("create_branch", format!("create_branch {}", name), |_| {})
    }

    fn switch_branch(&self, name: &str) -> Result<(), BackendError> {
        self.mutate("switch_branch", format!("switch_branch {}", name), |_| {})
    }

    fn push(&self) -> Result<(), BackendError> {
        self.mutate("push", "push".to_string(), |_| {})
    }

    fn pull(&self) -> Result<(), BackendError> {
        self.mutate("pull", "pull".to_string(), |_| {})
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn type_text(engine: &mut SyncEngine, state: &mut ViewState, text: &str) {
    for c in text.chars() {
        engine.dispatch(state, char_key(c));
    }
}

/// Wait for the next completion and fold it into the view state
pub async fn complete_next(engine: &mut SyncEngine, state: &mut ViewState) -> Operation {
    let completion = tokio::time::timeout(Duration::from_secs(5), engine.next_completion())
        .await
        .expect("timed out waiting for an operation")
        .expect("completion channel closed");
    engine.handle_completion(state, completion)
}

/// Engine and view state after the initial load with the gate open
pub async fn ready_engine(repo: Arc<MockRepo>) -> (SyncEngine, ViewState) {
    let mut engine = SyncEngine::new(repo, "CLI Commit");
    let mut state = ViewState::default();
    engine.start_initial_load();
    complete_next(&mut engine, &mut state).await;
    complete_next(&mut engine, &mut state).await;
    state.set_focus(Focus::Unstaged);
    assert!(state.open_gate());
    (engine, state)
}
