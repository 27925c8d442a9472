//! Startup sequencing
//!
//! Tracks the two initial loads and the grace period that follows them
//! before keystrokes are accepted.

use std::time::{Duration, Instant};

use crate::sync::Operation;

#[derive(Debug)]
pub struct Startup {
    grace: Duration,
    tree_loaded: bool,
    status_loaded: bool,
    /// When both initial loads finished
    loaded_at: Option<Instant>,
}

impl Startup {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            tree_loaded: false,
            status_loaded: false,
            loaded_at: None,
        }
    }

    /// Record a finished operation (successful or not)
    ///
    /// Returns true on the completion that finishes the initial load.
    pub fn record(&mut self, operation: &Operation) -> bool {
        if self.loaded_at.is_some() {
            return false;
        }
        match operation {
            Operation::LoadTree => self.tree_loaded = true,
            Operation::RefreshStatus => self.status_loaded = true,
            _ => return false,
        }
        if self.tree_loaded && self.status_loaded {
            self.loaded_at = Some(Instant::now());
            return true;
        }
        false
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    /// Whether the grace period after the initial load has elapsed
    pub fn gate_due(&self) -> bool {
        self.loaded_at
            .is_some_and(|loaded_at| loaded_at.elapsed() >= self.grace)
    }

    /// Text for the loading indicator
    pub fn loading_message(&self) -> String {
        match self.loaded_at {
            None => "Loading... Please wait".to_string(),
            Some(loaded_at) => {
                let remaining = self.grace.saturating_sub(loaded_at.elapsed());
                let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
                format!(
                    "Loading... Please wait {} seconds before using keyboard",
                    secs
                )
            }
        }
    }
}
