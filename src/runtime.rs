//! Tokio runtime lifecycle
//!
//! Repository calls run on the blocking pool and cannot be cancelled, so the
//! runtime is torn down with a bounded wait instead of joining every
//! blocking thread. A hung `git push` must not keep the process alive after
//! the user quits.

use std::io;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

/// How long shutdown waits for in-flight tasks before abandoning them
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(250);

/// Build the multi-threaded runtime the dashboard runs on
pub fn build() -> io::Result<Runtime> {
    Builder::new_multi_thread()
        .enable_all()
        .thread_name("gitlith-worker")
        .build()
}

/// Shut the runtime down without waiting on blocking calls still running
pub fn shutdown(runtime: Runtime) {
    tracing::debug!("Stopping runtime");
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
}
