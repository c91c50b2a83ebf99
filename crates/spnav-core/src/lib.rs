//! # spnav-core
//!
//! Shared foundation for spnavkbd: the device event data model, the
//! spacenavd wire codec, and the key code / modifier types used when
//! synthesizing keyboard input.
//!
//! This crate has zero dependencies on OS APIs, display servers, or sockets.
//!
//! # Architecture overview (for beginners)
//!
//! A 6-degree-of-freedom "space navigator" is a puck you can push, pull,
//! tilt, and twist.  The `spacenavd` daemon owns the USB device and streams
//! its samples to clients over a UNIX socket.  spnavkbd reads that stream,
//! hands every sample to a user-written Lua function, and lets the script
//! press keys in whatever window currently has keyboard focus.
//!
//! This crate defines:
//!
//! - **`event`** – What a device sample looks like once decoded: a motion
//!   sample with six signed deltas, or a single button transition.
//!
//! - **`protocol`** – How those samples travel over the spacenavd socket:
//!   fixed 32-byte packets of eight native-endian integers.
//!
//! - **`keys`** – The X11 key code and modifier mask a script asks the
//!   host to inject.

pub mod event;
pub mod keys;
pub mod protocol;

pub use event::{ButtonEvent, DeviceEvent, MotionEvent};
pub use keys::{KeyCode, ModifierMask};
pub use protocol::codec::{decode_packet, encode_packet, ProtocolError};
