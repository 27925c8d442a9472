//! Process interruption signals
//!
//! SIGINT, SIGTERM and SIGHUP set a shared flag that the event loop checks
//! every tick. The flag only ever goes from false to true.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the process as interrupted. Returns true on the first call.
    pub fn set(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Spawn a task that sets `flag` when an interruption signal arrives
///
/// Must be called from within a tokio runtime. Failing to register a handler
/// is logged and otherwise ignored.
pub fn listen_for_interrupts(flag: InterruptFlag) {
    tokio::spawn(async move {
        let name = wait_for_signal().await;
        tracing::info!("Received {}, shutting down", name);
        flag.set();
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut term, mut hup) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    ) {
        (Ok(term), Ok(hup)) => (term, hup),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Failed to register signal handlers: {}", e);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        name = wait_for_ctrl_c() => name,
        _ = term.recv() => "SIGTERM",
        _ = hup.recv() => "SIGHUP",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "SIGINT",
        Err(e) => {
            tracing::warn!("Failed to listen for SIGINT: {}", e);
            std::future::pending().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_sets_once() {
        let flag = InterruptFlag::new();
        assert!(!flag.is_set());
        assert!(flag.set());
        assert!(!flag.set());
        assert!(flag.is_set());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = InterruptFlag::new();
        let other = flag.clone();
        other.set();
        assert!(flag.is_set());
    }
}
