//! Log file retention
//!
//! Removes gitlith log files older than the retention window.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use super::file_writer::LOG_FILE_PREFIX;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up log files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    cleanup_logs_older_than(
        logs_dir,
        Duration::from_secs(DEFAULT_RETENTION_DAYS * 24 * 60 * 60),
    )
}

/// Clean up log files whose modification time is older than `max_age`
pub fn cleanup_logs_older_than(logs_dir: &Path, max_age: Duration) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted = 0;
    let entries = fs::read_dir(logs_dir)
        .with_context(|| format!("Failed to read logs directory {:?}", logs_dir))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !is_log_file(&path) {
            continue;
        }

        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|modified| modified < cutoff)
            .unwrap_or(false);

        if expired && fs::remove_file(&path).is_ok() {
            deleted += 1;
        }
    }

    Ok(deleted)
}

fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let count = cleanup_old_logs(Path::new("/nonexistent/gitlith/logs")).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file(Path::new("/x/gitlith-2026-01-01_00-00-00.log")));
        assert!(!is_log_file(Path::new("/x/gitlith-notes.txt")));
        assert!(!is_log_file(Path::new("/x/other-2026-01-01_00-00-00.log")));
    }

    #[test]
    fn test_cleanup_keeps_recent_and_foreign_files() {
        let temp_dir = TempDir::new().unwrap();

        let recent = temp_dir.path().join("gitlith-2026-01-21_14-30-45.log");
        File::create(&recent).unwrap().write_all(b"log").unwrap();
        let foreign = temp_dir.path().join("notes.txt");
        File::create(&foreign).unwrap().write_all(b"keep").unwrap();

        let count = cleanup_old_logs(temp_dir.path()).unwrap();
        assert_eq!(count, 0);
        assert!(recent.exists());
        assert!(foreign.exists());
    }
}
