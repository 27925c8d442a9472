//! Configuration management for gitlith

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Delay after the initial load before keystrokes are accepted (default: 10000 ms)
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,

    /// Message used by the commit command
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Event loop tick in milliseconds (default: 16 = ~60fps)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How long an operation result stays on the status line (default: 5 seconds)
    #[serde(default = "default_status_display_secs")]
    pub status_display_secs: u64,

    /// Repository to open (None = current directory)
    #[serde(default)]
    pub repo_path: Option<PathBuf>,
}

fn default_grace_period_ms() -> u64 {
    10_000
}

fn default_commit_message() -> String {
    "CLI Commit".to_string()
}

fn default_tick_rate_ms() -> u64 {
    16
}

fn default_status_display_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grace_period_ms: default_grace_period_ms(),
            commit_message: default_commit_message(),
            tick_rate_ms: default_tick_rate_ms(),
            status_display_secs: default_status_display_secs(),
            repo_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn status_display(&self) -> Duration {
        Duration::from_secs(self.status_display_secs)
    }

    /// Resolve the repository directory, falling back to the current directory
    pub fn resolve_repo_path(&self) -> Result<PathBuf> {
        match &self.repo_path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }
}

/// Get the base configuration directory (~/.gitlith)
/// Falls back to ./.gitlith if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".gitlith")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gitlith"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure all required directories exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    std::fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}
