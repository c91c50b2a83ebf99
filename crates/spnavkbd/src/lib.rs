//! spnavkbd library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does spnavkbd do? (for beginners)
//!
//! spnavkbd turns a 3D mouse (a "space navigator") into a programmable
//! keyboard.  It:
//!
//! 1. Connects to the X server and to the `spacenavd` device daemon.
//! 2. Loads `spnavkbd.lua`, a user script that may define
//!    `motion_event(x, y, z, rx, ry, rz)` and `button_event(state, id)`.
//! 3. Waits for device events and calls the matching Lua function for each.
//! 4. Lets the script call `send_key(code, modifiers)`, which sends a key
//!    press and release to whichever window has keyboard focus right now.
//!
//! Everything runs on one thread.  The only place the program waits is the
//! read from the device daemon; an interrupt (Ctrl-C) cancels that wait,
//! closes the device connection, and exits cleanly.

/// Application layer: key injection, host API, and the dispatch loop.
pub mod application;

/// Infrastructure layer: device socket, X11 display, Lua engine, settings.
pub mod infrastructure;
