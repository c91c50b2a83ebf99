//! Process-wide shutdown request.
//!
//! A [`ShutdownToken`] is a shared flag plus a wake-up.  The signal listener
//! trips it from its own task; everything else observes it in one of two
//! ways:
//!
//! - **async** – [`ShutdownToken::cancelled`] completes once the token is
//!   tripped.  The dispatcher races this against the device read.
//! - **sync** – [`ShutdownToken::is_triggered`] is a single atomic load, cheap
//!   enough to poll from inside the Lua VM while a handler is running.
//!
//! # Why both? (for beginners)
//!
//! A Lua handler runs on the dispatcher thread and never yields to the async
//! runtime, so a future alone cannot interrupt it.  The interpreter instead
//! checks the flag every few thousand instructions and aborts the handler,
//! after which the dispatcher sees the completed future and stops.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    triggered: AtomicBool,
    notify: Notify,
}

/// Cloneable handle to the shutdown request.  All clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown.  Idempotent.
    pub fn trigger(&self) {
        self.inner.triggered.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Completes once [`trigger`](Self::trigger) has been called, immediately
    /// if it already was.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a trigger in between is not lost.
            let notified = self.inner.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_token_is_not_triggered() {
        let token = ShutdownToken::new();

        assert!(!token.is_triggered());
    }

    #[test]
    fn test_trigger_is_visible_through_every_clone() {
        let token = ShutdownToken::new();
        let other = token.clone();

        other.trigger();
        other.trigger();

        assert!(token.is_triggered());
    }

    #[tokio::test]
    async fn test_cancelled_completes_immediately_when_already_triggered() {
        let token = ShutdownToken::new();
        token.trigger();

        let result = tokio::time::timeout(Duration::from_secs(1), token.cancelled()).await;

        assert!(result.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_wakes_when_triggered_from_another_task() {
        // Arrange
        let token = ShutdownToken::new();
        let trigger = token.clone();

        // Act
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.trigger();
        });
        let result = tokio::time::timeout(Duration::from_secs(5), token.cancelled()).await;

        // Assert
        assert!(result.is_ok(), "cancelled() must wake after trigger()");
    }
}
