//! Prompt key handling
//!
//! Maps keys to edits of the open single-line prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::PromptEdit;

/// What a key does while a prompt is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Edit(PromptEdit),
    Submit,
    Cancel,
    Ignored,
}

impl PromptKey {
    pub fn from_key(key: &KeyEvent) -> Self {
        match key.code {
            KeyCode::Enter => PromptKey::Submit,
            KeyCode::Esc => PromptKey::Cancel,
            KeyCode::Backspace => PromptKey::Edit(PromptEdit::Backspace),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !c.is_control() =>
            {
                PromptKey::Edit(PromptEdit::Insert(c))
            }
            _ => PromptKey::Ignored,
        }
    }
}
