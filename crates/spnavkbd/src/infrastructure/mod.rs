//! Infrastructure layer.
//!
//! Contains the OS-facing adapters behind the application-layer ports.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `spnav_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.
//!
//! # Sub-modules
//!
//! - **`device`** – `DeviceChannel` over the spacenavd UNIX socket, plus a
//!   scripted channel for tests.
//!
//! - **`display`** – `DisplayBackend` over Xlib (Linux), plus a recording
//!   display for tests.
//!
//! - **`scripting`** – The embedded Lua interpreter that loads the user's
//!   configuration script and runs its handlers.
//!
//! - **`signals`** – SIGINT / SIGTERM listener that trips the shutdown token.
//!
//! - **`storage`** – Runtime settings read from `spnavkbd.toml`.

pub mod device;
pub mod display;
pub mod scripting;
#[cfg(unix)]
pub mod signals;
pub mod storage;
