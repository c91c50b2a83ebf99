//! spacenavd wire protocol.

pub mod codec;

pub use codec::{decode_packet, encode_packet, ProtocolError, PACKET_SIZE};
