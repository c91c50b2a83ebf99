//! Linux X11 display backend via Xlib.
//!
//! Sends synthetic `KeyPress` / `KeyRelease` events with `XSendEvent`,
//! addressed to whichever window `XGetInputFocus` reports.
//!
//! # XSendEvent vs. XTest (for beginners)
//!
//! XTest fakes input at the server level, as if a physical key were hit, and
//! the server routes it through the normal focus machinery.  `XSendEvent`
//! instead writes an event straight into one window's queue, with the
//! `send_event` flag set.  spnavkbd uses `XSendEvent` so that the target is
//! exactly the window that was focused when the script asked for the key,
//! and so that no extension beyond core Xlib is required.  The trade-off:
//! some applications ignore events with `send_event` set.
//!
//! # Protocol errors
//!
//! Focus can move, and windows can be destroyed, between the focus query
//! and the send.  The server then answers with `BadWindow`, which Xlib
//! reports asynchronously through the error handler.  The default handler
//! prints the error and *exits the process*; this backend installs a handler
//! that logs a warning instead, so a vanished window costs one dropped key.

use std::os::raw::c_int;

use tracing::{info, warn};
use x11::xlib;

use super::DisplayError;
use crate::application::inject_key::{
    DisplayBackend, InjectionError, KeyEventKind, KeyEventTemplate, WindowId,
};

/// `CurrentTime`: let the server stamp the event.
const CURRENT_TIME: xlib::Time = 0;

/// `None` as a window id.
const NO_WINDOW: xlib::Window = 0;

/// An open Xlib connection.
///
/// Owns the `Display*` for its whole lifetime and closes it on drop.  The
/// pointer is not `Send`; the connection is only used from the thread that
/// opened it.
pub struct X11Display {
    display: *mut xlib::Display,
    root: xlib::Window,
}

impl X11Display {
    /// Connects to the display named by `$DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::ConnectFailed`] if `XOpenDisplay` fails.
    pub fn open() -> Result<Self, DisplayError> {
        // SAFETY: a null name makes Xlib read $DISPLAY.  The result is checked
        // for null before use and closed in Drop.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let name = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(DisplayError::ConnectFailed(name));
        }

        // SAFETY: installing a handler is process-global and takes a plain
        // function pointer; `log_x_error` never calls back into Xlib.
        unsafe { xlib::XSetErrorHandler(Some(log_x_error)) };

        // SAFETY: `display` is a valid, open connection.
        let root = unsafe { xlib::XDefaultRootWindow(display) };
        info!(root, "connected to X server");

        Ok(Self { display, root })
    }

    fn to_xkey(&self, event: &KeyEventTemplate) -> xlib::XKeyEvent {
        xlib::XKeyEvent {
            type_: match event.kind {
                KeyEventKind::Press => xlib::KeyPress,
                KeyEventKind::Release => xlib::KeyRelease,
            },
            serial: 0,
            send_event: xlib::True,
            display: self.display,
            window: event.target.0 as xlib::Window,
            root: event.root.0 as xlib::Window,
            subwindow: NO_WINDOW,
            time: CURRENT_TIME,
            x: event.pointer.x,
            y: event.pointer.y,
            x_root: event.pointer.x_root,
            y_root: event.pointer.y_root,
            state: event.modifiers.bits(),
            keycode: event.key_code.0,
            same_screen: if event.same_screen {
                xlib::True
            } else {
                xlib::False
            },
        }
    }
}

impl DisplayBackend for X11Display {
    fn root_window(&self) -> WindowId {
        WindowId(self.root as u64)
    }

    fn focused_window(&self) -> Result<WindowId, InjectionError> {
        let mut focus: xlib::Window = NO_WINDOW;
        let mut revert_to: c_int = 0;
        // SAFETY: both out-pointers reference live stack locals.
        unsafe { xlib::XGetInputFocus(self.display, &mut focus, &mut revert_to) };
        Ok(WindowId(focus as u64))
    }

    fn send_key_event(&self, event: &KeyEventTemplate) -> Result<(), InjectionError> {
        let key = self.to_xkey(event);
        let target = key.window;
        // SAFETY: XEvent is a C union; every variant is plain data, so a
        // zeroed value is valid before the key variant is written.
        let mut xevent: xlib::XEvent = unsafe { std::mem::zeroed() };
        xevent.key = key;

        // Propagate=True lets ancestors handle keys the focused child ignores.
        // SAFETY: `xevent` is a fully initialised key event on our stack.
        let status = unsafe {
            xlib::XSendEvent(
                self.display,
                target,
                xlib::True,
                xlib::KeyPressMask,
                &mut xevent,
            )
        };
        if status == 0 {
            return Err(InjectionError::SendRejected {
                kind: event.kind,
                code: event.key_code,
            });
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), InjectionError> {
        // SAFETY: `display` is open for the lifetime of self.
        unsafe { xlib::XFlush(self.display) };
        Ok(())
    }
}

impl Drop for X11Display {
    fn drop(&mut self) {
        // SAFETY: `display` was opened in `open` and is not used after this.
        unsafe { xlib::XCloseDisplay(self.display) };
    }
}

/// Logs asynchronous X protocol errors instead of aborting.
unsafe extern "C" fn log_x_error(
    _display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    // SAFETY: Xlib passes a valid event for the duration of the call.
    if let Some(event) = event.as_ref() {
        warn!(
            error_code = event.error_code,
            request_code = event.request_code,
            resource = event.resourceid,
            "X protocol error; synthetic key event dropped"
        );
    }
    0
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// If a DISPLAY is available the connection must open and report a
    /// non-zero root window.  Without one, opening must fail cleanly.
    #[test]
    fn test_x11_display_open_smoke() {
        let result = X11Display::open();

        if std::env::var("DISPLAY").is_ok() {
            if let Ok(display) = result {
                assert_ne!(display.root_window(), WindowId(0));
            }
        } else {
            assert!(matches!(result, Err(DisplayError::ConnectFailed(_))));
        }
    }
}
