//! SIGINT / SIGTERM listener.
//!
//! The handlers are registered synchronously by [`listen_for_signals`], so
//! the default "terminate the process" action is replaced before `main`
//! does any slow startup work.  The wait itself runs as a spawned task; on a
//! multi-threaded runtime it keeps running on a worker thread while the
//! dispatcher thread is busy inside a Lua handler.

use std::io;

use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::shutdown::ShutdownToken;

/// Registers SIGINT and SIGTERM handlers and trips `shutdown` on the first
/// one received.
///
/// Must be called from inside a Tokio runtime.
///
/// # Errors
///
/// Returns the OS error if either handler cannot be registered.
pub fn listen_for_signals(shutdown: ShutdownToken) -> io::Result<JoinHandle<()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("interrupt received, shutting down"),
            _ = terminate.recv() => info!("terminate received, shutting down"),
        }
        shutdown.trigger();
    }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Without the handler in place SIGTERM would kill the test binary.
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sigterm_trips_the_token_instead_of_killing_the_process() {
        // Arrange
        let shutdown = ShutdownToken::new();
        let listener = listen_for_signals(shutdown.clone()).unwrap();

        // Act
        let status = std::process::Command::new("kill")
            .arg("-TERM")
            .arg(std::process::id().to_string())
            .status()
            .unwrap();
        let woke = tokio::time::timeout(Duration::from_secs(5), shutdown.cancelled()).await;

        // Assert
        assert!(status.success());
        assert!(woke.is_ok(), "SIGTERM must trip the shutdown token");
        assert!(shutdown.is_triggered());
        listener.await.unwrap();
    }
}
