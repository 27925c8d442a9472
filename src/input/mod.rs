//! Input handling module
//!
//! Key tables for normal mode and for the open prompt.

pub mod keymap;
pub mod prompt;

pub use keymap::{Command, COMMAND_HELP};
pub use prompt::PromptKey;
