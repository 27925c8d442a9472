//! Command key table
//!
//! Fixed single-key bindings for normal (non-prompt) mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A dashboard command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    SwitchFocus,
    Commit,
    OpenBranchPrompt,
    OpenSwitchPrompt,
    Push,
    Pull,
    ToggleStage,
    MoveDown,
    MoveUp,
}

/// Key bindings as shown in the command panel
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("c", "Commit"),
    ("b", "Create Branch"),
    ("s", "Switch Branch"),
    ("p", "Push"),
    ("l", "Pull"),
    ("u", "Stage/Unstage Selected"),
    ("j/k", "Move Selection"),
    ("Tab", "Switch Focus"),
    ("q", "Quit"),
];

impl Command {
    /// Look up the command bound to a key; unmapped keys return None
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        let command = match key.code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Tab => Command::SwitchFocus,
            KeyCode::Char('c') => Command::Commit,
            KeyCode::Char('b') => Command::OpenBranchPrompt,
            KeyCode::Char('s') => Command::OpenSwitchPrompt,
            KeyCode::Char('p') => Command::Push,
            KeyCode::Char('l') => Command::Pull,
            KeyCode::Char('u') => Command::ToggleStage,
            KeyCode::Char('j') => Command::MoveDown,
            KeyCode::Char('k') => Command::MoveUp,
            _ => return None,
        };
        Some(command)
    }
}
