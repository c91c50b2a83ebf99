//! Recording display backend for tests.
//!
//! # Why a recording display?
//!
//! The Xlib backend needs a running X server and would type into whatever
//! window is focused on the test machine.  `RecordingDisplay` keeps every
//! event it is asked to send in a `Mutex<Vec<...>>` so tests can assert on
//! exactly what was sent, to which window, and in what order.
//!
//! Focus is a settable field: tests move it between injections to check
//! that the injector never reuses a stale target.  With no focus set,
//! `focused_window` fails, which exercises the error path.

use std::sync::Mutex;

use spnav_core::KeyCode;

use crate::application::inject_key::{
    DisplayBackend, InjectionError, KeyEventKind, KeyEventTemplate, WindowId,
};

/// Root window reported by every [`RecordingDisplay`].
pub const MOCK_ROOT: WindowId = WindowId(0x100);

/// Window focused by [`RecordingDisplay::new`].
pub const MOCK_FOCUS: WindowId = WindowId(0x200);

/// A display that records every event instead of talking to a server.
pub struct RecordingDisplay {
    /// Window returned by `focused_window`; `None` makes the query fail.
    pub focus: Mutex<Option<WindowId>>,
    /// Every event passed to `send_key_event`, in order.
    pub sent: Mutex<Vec<KeyEventTemplate>>,
    /// Number of `focused_window` calls.
    pub focus_queries: Mutex<usize>,
    /// Number of `flush` calls.
    pub flushes: Mutex<usize>,
}

impl RecordingDisplay {
    /// Creates a display focused on [`MOCK_FOCUS`].
    pub fn new() -> Self {
        Self::with_focus(MOCK_FOCUS)
    }

    /// Creates a display focused on `window`.
    pub fn with_focus(window: WindowId) -> Self {
        Self {
            focus: Mutex::new(Some(window)),
            sent: Mutex::new(Vec::new()),
            focus_queries: Mutex::new(0),
            flushes: Mutex::new(0),
        }
    }

    /// Creates a display whose focus query always fails.
    pub fn unfocused() -> Self {
        let display = Self::new();
        *display.focus.lock().unwrap() = None;
        display
    }

    /// Moves focus to `window`.
    pub fn set_focus(&self, window: WindowId) {
        *self.focus.lock().unwrap() = Some(window);
    }

    /// `(key, target)` for every press sent so far.
    pub fn presses(&self) -> Vec<(KeyCode, WindowId)> {
        self.of_kind(KeyEventKind::Press)
    }

    /// `(key, target)` for every release sent so far.
    pub fn releases(&self) -> Vec<(KeyCode, WindowId)> {
        self.of_kind(KeyEventKind::Release)
    }

    fn of_kind(&self, kind: KeyEventKind) -> Vec<(KeyCode, WindowId)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.key_code, e.target))
            .collect()
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBackend for RecordingDisplay {
    fn root_window(&self) -> WindowId {
        MOCK_ROOT
    }

    fn focused_window(&self) -> Result<WindowId, InjectionError> {
        *self.focus_queries.lock().unwrap() += 1;
        self.focus
            .lock()
            .unwrap()
            .ok_or_else(|| InjectionError::FocusQuery("mock display has no focus".into()))
    }

    fn send_key_event(&self, event: &KeyEventTemplate) -> Result<(), InjectionError> {
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn flush(&self) -> Result<(), InjectionError> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}
