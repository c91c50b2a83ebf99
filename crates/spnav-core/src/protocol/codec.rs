//! Packet codec for the spacenavd UNIX-socket protocol.
//!
//! Wire format (one packet per event, no header, no framing):
//! ```text
//! [type:4][w1:4][w2:4][w3:4][w4:4][w5:4][w6:4][w7:4]
//! ```
//! Eight `i32` words, 32 bytes total, in the *native* byte order of the
//! host: the daemon and its clients always share a machine.
//!
//! | type | meaning        | w1..w6                 | w7          |
//! |------|----------------|------------------------|-------------|
//! | 0    | motion         | x, y, z, rx, ry, rz    | period (ms) |
//! | 1    | button press   | w1 = button number     | unused      |
//! | 2    | button release | w1 = button number     | unused      |

use thiserror::Error;
use tracing::trace;

use crate::event::{ButtonEvent, DeviceEvent, MotionEvent};

/// Number of `i32` words in one packet.
pub const PACKET_WORDS: usize = 8;

/// Size in bytes of one packet.
pub const PACKET_SIZE: usize = PACKET_WORDS * 4;

const EVENT_MOTION: i32 = 0;
const EVENT_PRESS: i32 = 1;
const EVENT_RELEASE: i32 = 2;

/// Errors that can occur while decoding a packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than one packet.
    #[error("insufficient data: need {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The type word is not a known event type.
    #[error("unknown event type: {0}")]
    UnknownEventType(i32),

    /// A field value is out of range for its event type.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes one [`DeviceEvent`] from the first [`PACKET_SIZE`] bytes of `bytes`.
///
/// Trailing bytes are ignored; the caller reads exactly one packet at a time.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the input is short, the type word is unknown,
/// or a button packet carries a negative button number.
///
/// # Examples
///
/// ```rust
/// use spnav_core::{decode_packet, encode_packet, ButtonEvent, DeviceEvent};
///
/// let event = DeviceEvent::Button(ButtonEvent { id: 3, pressed: true });
/// let bytes = encode_packet(&event);
/// assert_eq!(decode_packet(&bytes).unwrap(), event);
/// ```
pub fn decode_packet(bytes: &[u8]) -> Result<DeviceEvent, ProtocolError> {
    if bytes.len() < PACKET_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: PACKET_SIZE,
            available: bytes.len(),
        });
    }

    let mut words = [0i32; PACKET_WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes[..PACKET_SIZE].chunks_exact(4)) {
        *word = i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let event = match words[0] {
        EVENT_MOTION => DeviceEvent::Motion(MotionEvent {
            x: words[1],
            y: words[2],
            z: words[3],
            rx: words[4],
            ry: words[5],
            rz: words[6],
            // A negative period only shows up from a confused daemon; clamp it.
            period_ms: words[7].max(0) as u32,
        }),
        kind @ (EVENT_PRESS | EVENT_RELEASE) => {
            let id = u32::try_from(words[1]).map_err(|_| {
                ProtocolError::MalformedPacket(format!("negative button number {}", words[1]))
            })?;
            DeviceEvent::Button(ButtonEvent {
                id,
                pressed: kind == EVENT_PRESS,
            })
        }
        other => return Err(ProtocolError::UnknownEventType(other)),
    };

    trace!(?event, "decoded spacenavd packet");
    Ok(event)
}

/// Encodes a [`DeviceEvent`] into one wire packet.
///
/// spnavkbd itself never writes events; this exists so tests and benchmarks
/// can stand in for the daemon.
pub fn encode_packet(event: &DeviceEvent) -> [u8; PACKET_SIZE] {
    let mut words = [0i32; PACKET_WORDS];
    match event {
        DeviceEvent::Motion(m) => {
            words[0] = EVENT_MOTION;
            words[1..7].copy_from_slice(&m.axes());
            words[7] = i32::try_from(m.period_ms).unwrap_or(i32::MAX);
        }
        DeviceEvent::Button(b) => {
            words[0] = if b.pressed { EVENT_PRESS } else { EVENT_RELEASE };
            words[1] = i32::try_from(b.id).unwrap_or(i32::MAX);
        }
    }

    let mut buf = [0u8; PACKET_SIZE];
    for (chunk, word) in buf.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_ne_bytes());
    }
    buf
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_packet(words: [i32; PACKET_WORDS]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_ne_bytes()).collect()
    }

    #[test]
    fn test_decode_motion_packet_maps_words_to_axes() {
        // Arrange
        let bytes = raw_packet([0, 150, -20, 3, -4, 5, -600, 16]);

        // Act
        let event = decode_packet(&bytes).unwrap();

        // Assert
        assert_eq!(
            event,
            DeviceEvent::Motion(MotionEvent {
                x: 150,
                y: -20,
                z: 3,
                rx: -4,
                ry: 5,
                rz: -600,
                period_ms: 16,
            })
        );
    }

    #[test]
    fn test_decode_press_and_release_packets() {
        let press = decode_packet(&raw_packet([1, 7, 0, 0, 0, 0, 0, 0])).unwrap();
        let release = decode_packet(&raw_packet([2, 7, 0, 0, 0, 0, 0, 0])).unwrap();

        assert_eq!(press, DeviceEvent::Button(ButtonEvent { id: 7, pressed: true }));
        assert_eq!(release, DeviceEvent::Button(ButtonEvent { id: 7, pressed: false }));
    }

    #[test]
    fn test_decode_rejects_short_input() {
        let result = decode_packet(&[0u8; 12]);

        assert_eq!(
            result,
            Err(ProtocolError::InsufficientData {
                needed: PACKET_SIZE,
                available: 12
            })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_event_type() {
        let result = decode_packet(&raw_packet([9, 0, 0, 0, 0, 0, 0, 0]));

        assert_eq!(result, Err(ProtocolError::UnknownEventType(9)));
    }

    #[test]
    fn test_decode_rejects_negative_button_number() {
        let result = decode_packet(&raw_packet([1, -1, 0, 0, 0, 0, 0, 0]));

        assert!(matches!(result, Err(ProtocolError::MalformedPacket(_))));
    }

    #[test]
    fn test_decode_clamps_negative_period_to_zero() {
        let event = decode_packet(&raw_packet([0, 0, 0, 0, 0, 0, 0, -5])).unwrap();

        match event {
            DeviceEvent::Motion(m) => assert_eq!(m.period_ms, 0),
            other => panic!("expected motion, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bytes = raw_packet([1, 2, 0, 0, 0, 0, 0, 0]);
        bytes.extend_from_slice(&[0xFF; 5]);

        let event = decode_packet(&bytes).unwrap();

        assert_eq!(event, DeviceEvent::Button(ButtonEvent { id: 2, pressed: true }));
    }

    #[test]
    fn test_encode_button_release_writes_type_two() {
        let bytes = encode_packet(&DeviceEvent::Button(ButtonEvent {
            id: 4,
            pressed: false,
        }));

        assert_eq!(&bytes[0..4], &2i32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &4i32.to_ne_bytes());
    }
}
