//! Logging system for gitlith
//!
//! File-based `tracing` output with age-based retention.

mod file_writer;
mod retention;

pub use file_writer::{init_file_logging, LogFileInfo, LoggingGuard};
pub use retention::cleanup_old_logs;
