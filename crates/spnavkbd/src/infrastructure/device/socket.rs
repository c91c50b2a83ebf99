//! spacenavd client over its AF_UNIX socket.
//!
//! The daemon accepts any number of clients on a stream socket and writes
//! one 32-byte packet per device event to each of them.  Clients never send
//! anything back for plain event delivery, so this channel only reads.
//!
//! # Packet alignment
//!
//! Packets have a fixed size and no header, so a packet that fails to decode
//! (an event type this build does not know, a nonsense button number) can be
//! skipped without losing sync with the stream.  A short read at the end of
//! the stream means the daemon went away mid-packet; it is reported as a
//! clean end-of-stream like any other disconnect.

use std::path::Path;

use async_trait::async_trait;
use spnav_core::{decode_packet, protocol::PACKET_SIZE, DeviceEvent};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::{debug, info, warn};

use crate::application::dispatch::{DeviceChannel, DeviceError};

/// Where spacenavd listens unless configured otherwise.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/spnav.sock";

/// Connected spacenavd client.
#[derive(Debug)]
pub struct SpnavSocket {
    stream: Option<UnixStream>,
    skipped: u64,
}

impl SpnavSocket {
    /// Connects to the daemon socket at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ConnectFailed`] if the socket does not exist or
    /// refuses the connection (daemon not running, wrong permissions).
    pub async fn connect(path: &Path) -> Result<Self, DeviceError> {
        let stream = UnixStream::connect(path)
            .await
            .map_err(|source| DeviceError::ConnectFailed {
                path: path.display().to_string(),
                source,
            })?;
        info!("connected to spacenavd at {}", path.display());
        Ok(Self::from_stream(stream))
    }

    /// Wraps an already connected stream.
    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            stream: Some(stream),
            skipped: 0,
        }
    }

    /// Packets dropped because they could not be decoded.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[async_trait]
impl DeviceChannel for SpnavSocket {
    async fn next_event(&mut self) -> Result<Option<DeviceEvent>, DeviceError> {
        loop {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(None);
            };

            let mut packet = [0u8; PACKET_SIZE];
            match stream.read_exact(&mut packet).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("spacenavd closed the connection");
                    self.stream = None;
                    return Ok(None);
                }
                Err(e) => return Err(DeviceError::Io(e)),
            }

            match decode_packet(&packet) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => {
                    self.skipped += 1;
                    warn!("skipping spacenavd packet: {e}");
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("socket shutdown: {e}");
            }
            info!("closed spacenavd connection");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
