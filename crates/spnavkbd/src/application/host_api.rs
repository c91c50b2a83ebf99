//! The host functions a configuration script may call.
//!
//! The surface is deliberately closed: a clock and key injection.  The
//! scripting engine registers exactly these calls and nothing else from the
//! host process is reachable from Lua.

use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};

use spnav_core::{KeyCode, ModifierMask};
use tracing::warn;

use crate::application::inject_key::KeyInjector;

/// Host calls exposed to scripts.
pub trait HostApi {
    /// Wall-clock seconds since the Unix epoch, with sub-second precision.
    ///
    /// Not monotonic: follows the system real-time clock, including
    /// adjustments.  Meant for rate limiting inside scripts.
    fn current_time(&self) -> f64;

    /// Injects a press + release of `code` into the focused window.
    ///
    /// Fire-and-forget: failures are logged here and never reach the script.
    fn send_key(&self, code: KeyCode, modifiers: ModifierMask);
}

/// Reads the system real-time clock as fractional seconds.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// [`HostApi`] backed by a live [`KeyInjector`].
pub struct DesktopHost {
    injector: RefCell<KeyInjector>,
}

impl DesktopHost {
    pub fn new(injector: KeyInjector) -> Self {
        Self {
            injector: RefCell::new(injector),
        }
    }
}

impl HostApi for DesktopHost {
    fn current_time(&self) -> f64 {
        wall_clock_seconds()
    }

    fn send_key(&self, code: KeyCode, modifiers: ModifierMask) {
        if let Err(e) = self.injector.borrow_mut().inject_key(code, modifiers) {
            warn!("send_key({code}, {}) dropped: {e}", modifiers.0);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
