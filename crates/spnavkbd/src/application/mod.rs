//! Application layer use cases.
//!
//! # What lives here?
//!
//! - **`inject_key`** – Builds a press + release pair from the owned key
//!   event template and hands it to a `DisplayBackend`, re-reading the
//!   input focus every time.
//!
//! - **`host_api`** – The closed set of calls a configuration script may
//!   make into the host: `current_time` and `send_key`.
//!
//! - **`dispatch`** – The main loop: waits on a `DeviceChannel`, converts
//!   each event into handler arguments, and calls the handler through a
//!   `ScriptEngine`.
//!
//! - **`shutdown`** – The shared shutdown request tripped by the signal
//!   listener and observed by the dispatcher and the script engine.
//!
//! Nothing in this layer touches Xlib, sockets, or Lua directly; those are
//! injected from `infrastructure`.

pub mod dispatch;
pub mod host_api;
pub mod inject_key;
pub mod shutdown;
