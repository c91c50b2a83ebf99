//! Integration tests for decoding a recorded stream of spacenavd packets.

use spnav_core::protocol::PACKET_SIZE;
use spnav_core::{decode_packet, encode_packet, ButtonEvent, DeviceEvent, MotionEvent, ProtocolError};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_consecutive_packets_decode_in_order() {
    // Arrange – a push, a button tap, and a twist, back to back on the wire
    let events = [
        DeviceEvent::Motion(MotionEvent { x: 200, period_ms: 8, ..Default::default() }),
        DeviceEvent::Button(ButtonEvent { id: 0, pressed: true }),
        DeviceEvent::Button(ButtonEvent { id: 0, pressed: false }),
        DeviceEvent::Motion(MotionEvent { rz: -90, period_ms: 8, ..Default::default() }),
    ];
    let stream: Vec<u8> = events.iter().flat_map(encode_packet).collect();

    // Act
    let decoded: Vec<DeviceEvent> = stream
        .chunks_exact(PACKET_SIZE)
        .map(|packet| decode_packet(packet).expect("packet must decode"))
        .collect();

    // Assert
    assert_eq!(decoded, events);
}

#[test]
fn test_truncated_final_packet_is_reported_not_guessed() {
    let mut stream = encode_packet(&DeviceEvent::Button(ButtonEvent { id: 1, pressed: true })).to_vec();
    stream.truncate(PACKET_SIZE - 1);

    let result = decode_packet(&stream);

    assert_eq!(
        result,
        Err(ProtocolError::InsufficientData {
            needed: PACKET_SIZE,
            available: PACKET_SIZE - 1
        })
    );
}
