//! Display backends for synthetic key injection.
//!
//! Each backend implements
//! [`DisplayBackend`](crate::application::inject_key::DisplayBackend); the
//! native one is selected at compile time and re-exported as `NativeDisplay`:
//!
//! | Module  | OS    | API used                                          |
//! |---------|-------|---------------------------------------------------|
//! | `linux` | Linux | Xlib `XGetInputFocus` + `XSendEvent` + `XFlush`   |
//! | `mock`  | any   | records every event in memory                     |

use thiserror::Error;

/// Error type for opening a display connection.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The X server could not be reached.
    #[error("failed to connect to the X server (DISPLAY={0})")]
    ConnectFailed(String),
    /// No display backend exists for this platform.
    #[error("no display backend available on this platform")]
    Unsupported,
}

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the Xlib backend as `NativeDisplay` on Linux.
#[cfg(target_os = "linux")]
pub use linux::X11Display as NativeDisplay;
