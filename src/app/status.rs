//! Operation status line
//!
//! Shows a spinner while a mutating operation is in flight and a transient
//! success or failure notice once it completes.

use std::time::{Duration, Instant};

/// Default time a completion notice stays visible
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A completion message that expires
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notice {
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Status line state
#[derive(Debug, Clone)]
pub struct StatusLine {
    running: Option<(String, Instant)>,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl StatusLine {
    pub fn new(notice_duration: Duration) -> Self {
        Self {
            running: None,
            notice: None,
            notice_duration,
        }
    }

    /// Start the spinner for an operation
    pub fn begin(&mut self, label: impl Into<String>) {
        self.running = Some((label.into(), Instant::now()));
        self.notice = None;
    }

    /// Stop the spinner and show a success notice
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.finish(NoticeKind::Success, message.into());
    }

    /// Stop the spinner and show a failure notice
    pub fn fail(&mut self, message: impl Into<String>) {
        self.finish(NoticeKind::Failure, message.into());
    }

    /// Show a failure notice without stopping the spinner
    ///
    /// For background work that fails while another operation is running.
    pub fn report_failure(&mut self, message: impl Into<String>) {
        self.set_notice(NoticeKind::Failure, message.into());
    }

    fn finish(&mut self, kind: NoticeKind, message: String) {
        self.running = None;
        self.set_notice(kind, message);
    }

    fn set_notice(&mut self, kind: NoticeKind, message: String) {
        self.notice = Some(Notice {
            kind,
            message,
            created_at: Instant::now(),
            duration: self.notice_duration,
        });
    }

    /// Drop an expired notice. Returns true if the line changed.
    pub fn tick(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Label and spinner frame of the running operation
    pub fn running(&self) -> Option<(&str, &'static str)> {
        self.running.as_ref().map(|(label, started)| {
            let frame = (started.elapsed().as_millis() / SPINNER_FRAME_MS) as usize;
            (label.as_str(), SPINNER_FRAMES[frame % SPINNER_FRAMES.len()])
        })
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_succeed() {
        let mut line = StatusLine::default();
        line.begin("Committing changes...");
        assert!(line.is_running());
        assert_eq!(line.running().unwrap().0, "Committing changes...");

        line.succeed("Changes committed");
        assert!(!line.is_running());
        let notice = line.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Changes committed");
    }

    #[test]
    fn test_fail_records_failure() {
        let mut line = StatusLine::default();
        line.begin("Pushing...");
        line.fail("Push failed: no upstream");
        assert_eq!(line.notice().unwrap().kind, NoticeKind::Failure);
    }

    #[test]
    fn test_report_failure_keeps_spinner() {
        let mut line = StatusLine::default();
        line.begin("Pushing...");
        line.report_failure("Failed to fetch Git status: locked");
        assert!(line.is_running());
        assert_eq!(line.notice().unwrap().kind, NoticeKind::Failure);

        line.succeed("Pushed");
        assert!(!line.is_running());
        assert_eq!(line.notice().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_begin_clears_previous_notice() {
        let mut line = StatusLine::default();
        line.fail("boom");
        line.begin("Pulling...");
        assert!(line.notice().is_none());
    }

    #[test]
    fn test_notice_expires() {
        let mut line = StatusLine::new(Duration::ZERO);
        line.succeed("done");
        assert!(line.tick());
        assert!(line.notice().is_none());
        assert!(!line.tick());
    }
}
