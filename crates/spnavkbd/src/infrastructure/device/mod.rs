//! Device channel implementations.
//!
//! | Module   | Transport                                   |
//! |----------|---------------------------------------------|
//! | `socket` | spacenavd AF_UNIX socket (`/var/run/spnav.sock`) |
//! | `mock`   | In-memory list of events, for tests          |

pub mod mock;

#[cfg(unix)]
pub mod socket;

#[cfg(unix)]
pub use socket::{SpnavSocket, DEFAULT_SOCKET_PATH};
