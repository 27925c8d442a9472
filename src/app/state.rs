//! View state store
//!
//! The single owned projection of repository state that the dashboard
//! renders. Every write goes through a method here; none of them perform I/O.

use std::time::Duration;

use crate::file_tree::FileTreeNode;
use crate::git::StatusSnapshot;

use super::status::StatusLine;

/// Which file list has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Unstaged files list
    #[default]
    Unstaged,
    /// Staged files list
    Staged,
}

impl Focus {
    pub fn other(self) -> Self {
        match self {
            Focus::Unstaged => Focus::Staged,
            Focus::Staged => Focus::Unstaged,
        }
    }
}

/// Selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a submitted prompt does with its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    CreateBranch,
    SwitchBranch,
}

impl PromptPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            PromptPurpose::CreateBranch => " Branch Name ",
            PromptPurpose::SwitchBranch => " Switch Branch ",
        }
    }
}

/// An open single-line prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub purpose: PromptPurpose,
    pub buffer: String,
}

/// An edit applied to the open prompt's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEdit {
    Insert(char),
    Backspace,
}

/// Clamp a selection to a list of `len` items
fn clamp_selection(selection: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selection.unwrap_or(0).min(len - 1))
    }
}

/// UI-visible state
#[derive(Debug, Default)]
pub struct ViewState {
    snapshot: StatusSnapshot,
    tree: Option<FileTreeNode>,
    focus: Focus,
    unstaged_selection: Option<usize>,
    staged_selection: Option<usize>,
    prompt: Option<PromptState>,
    ready: bool,
    /// Spinner and completion notices for operations
    pub status: StatusLine,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Whether the UI needs to be re-rendered
    pub needs_render: bool,
}

impl ViewState {
    pub fn new(notice_duration: Duration) -> Self {
        Self {
            status: StatusLine::new(notice_duration),
            ..Self::default()
        }
    }

    /// Replace both file lists and reclamp their selections
    pub fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        self.snapshot = snapshot;
        self.unstaged_selection =
            clamp_selection(self.unstaged_selection, self.snapshot.unstaged.len());
        self.staged_selection = clamp_selection(self.staged_selection, self.snapshot.staged.len());
        self.needs_render = true;
    }

    /// Replace the file tree
    pub fn apply_tree(&mut self, tree: FileTreeNode) {
        self.tree = Some(tree);
        self.needs_render = true;
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.needs_render = true;
    }

    pub fn toggle_focus(&mut self) {
        self.set_focus(self.focus.other());
    }

    /// Move the focused list's selection one step, clamped to its bounds
    pub fn move_selection(&mut self, direction: Direction) {
        let len = self.items(self.focus).len();
        if len == 0 {
            return;
        }
        let selection = match self.focus {
            Focus::Unstaged => &mut self.unstaged_selection,
            Focus::Staged => &mut self.staged_selection,
        };
        let current = selection.unwrap_or(0);
        let next = match direction {
            Direction::Up => current.saturating_sub(1),
            Direction::Down => (current + 1).min(len - 1),
        };
        *selection = Some(next);
        self.needs_render = true;
    }

    /// Open a prompt, replacing any prompt already open
    pub fn open_prompt(&mut self, purpose: PromptPurpose) {
        self.prompt = Some(PromptState {
            purpose,
            buffer: String::new(),
        });
        self.needs_render = true;
    }

    /// Edit the open prompt's buffer; no-op without a prompt
    pub fn edit_prompt(&mut self, edit: PromptEdit) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match edit {
            PromptEdit::Insert(c) => prompt.buffer.push(c),
            PromptEdit::Backspace => {
                prompt.buffer.pop();
            }
        }
        self.needs_render = true;
    }

    /// Close the prompt, returning its final state
    pub fn close_prompt(&mut self) -> Option<PromptState> {
        let prompt = self.prompt.take();
        if prompt.is_some() {
            self.needs_render = true;
        }
        prompt
    }

    /// Open the readiness gate. Returns true only on the call that opened it.
    pub fn open_gate(&mut self) -> bool {
        if self.ready {
            return false;
        }
        self.ready = true;
        self.needs_render = true;
        true
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn prompt(&self) -> Option<&PromptState> {
        self.prompt.as_ref()
    }

    pub fn tree(&self) -> Option<&FileTreeNode> {
        self.tree.as_ref()
    }

    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    pub fn items(&self, list: Focus) -> &[String] {
        match list {
            Focus::Unstaged => &self.snapshot.unstaged,
            Focus::Staged => &self.snapshot.staged,
        }
    }

    pub fn selection(&self, list: Focus) -> Option<usize> {
        match list {
            Focus::Unstaged => self.unstaged_selection,
            Focus::Staged => self.staged_selection,
        }
    }

    /// Path under the focused list's selection
    pub fn selected_path(&self) -> Option<&str> {
        let index = self.selection(self.focus)?;
        self.items(self.focus).get(index).map(String::as_str)
    }
}
