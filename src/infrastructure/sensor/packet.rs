use crate::domain::error::{BridgeError, BridgeResult};

// Frame layout
// Name       Length   Description
// ===========================================================================
// Start      2 bytes  Fixed 0xEF01, high byte first.
// Address    4 bytes  Module address, default 0xFFFFFFFF, high byte first.
// PID        1 byte   01 command, 02 data, 07 acknowledge, 08 end of data.
// Length     2 bytes  Payload length plus the 2 checksum bytes, high byte first.
// Payload    -        Instruction and parameters, or confirmation code and data.
// Checksum   2 bytes  Sum of PID, length and payload bytes; overflow dropped.

pub const START_CODE: u16 = 0xEF01;
pub const DEFAULT_ADDRESS: u32 = 0xFFFF_FFFF;

const HEADER_LEN: usize = 9;
const CHECKSUM_LEN: usize = 2;

/// Packet identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketKind {
    Command = 0x01,
    Data = 0x02,
    Ack = 0x07,
    EndData = 0x08,
}

/// Instruction codes used by the bridge.
pub mod instruction {
    pub const GET_IMAGE: u8 = 0x01;
    pub const IMAGE_2_TZ: u8 = 0x02;
    pub const REG_MODEL: u8 = 0x05;
    pub const STORE: u8 = 0x06;
    pub const DELETE: u8 = 0x0C;
    pub const READ_SYS_PARA: u8 = 0x0F;
    pub const VERIFY_PASSWORD: u8 = 0x13;
    pub const HI_SPEED_SEARCH: u8 = 0x1B;
    pub const TEMPLATE_READ: u8 = 0x1F;
    pub const SET_AURA: u8 = 0x35;
}

/// Size of an acknowledge frame carrying `payload_len` payload bytes.
pub const fn ack_frame_len(payload_len: usize) -> usize {
    HEADER_LEN + payload_len + CHECKSUM_LEN
}

pub fn checksum(kind: u8, length: u16, payload: &[u8]) -> u16 {
    let [len_hi, len_lo] = length.to_be_bytes();
    payload
        .iter()
        .fold(u16::from(kind), |sum, &byte| sum.wrapping_add(u16::from(byte)))
        .wrapping_add(u16::from(len_hi))
        .wrapping_add(u16::from(len_lo))
}

/// Build a complete frame around `payload`.
pub fn encode(address: u32, kind: PacketKind, payload: &[u8]) -> BridgeResult<Vec<u8>> {
    let length = u16::try_from(payload.len() + CHECKSUM_LEN)
        .map_err(|_| BridgeError::Protocol(format!("payload of {} bytes is too long", payload.len())))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    frame.extend_from_slice(&START_CODE.to_be_bytes());
    frame.extend_from_slice(&address.to_be_bytes());
    frame.push(kind as u8);
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&checksum(kind as u8, length, payload).to_be_bytes());
    Ok(frame)
}

/// Validate an acknowledge frame and return its payload.
///
/// The first payload byte is the confirmation code; it is always present in
/// a returned payload.
pub fn decode_ack(frame: &[u8], address: u32) -> BridgeResult<Vec<u8>> {
    if frame.len() < HEADER_LEN + 1 + CHECKSUM_LEN {
        return Err(BridgeError::Protocol(format!("frame too short ({} bytes)", frame.len())));
    }

    let start = u16::from_be_bytes([frame[0], frame[1]]);
    if start != START_CODE {
        return Err(BridgeError::Protocol(format!("bad start code {:#06x}", start)));
    }

    let from = u32::from_be_bytes([frame[2], frame[3], frame[4], frame[5]]);
    if from != address {
        return Err(BridgeError::Protocol(format!(
            "reply from address {:#010x}, expected {:#010x}",
            from, address
        )));
    }

    let kind = frame[6];
    if kind != PacketKind::Ack as u8 {
        return Err(BridgeError::Protocol(format!("expected acknowledge packet, got {:#04x}", kind)));
    }

    let length = u16::from_be_bytes([frame[7], frame[8]]);
    let declared = usize::from(length);
    if declared < 1 + CHECKSUM_LEN || HEADER_LEN + declared > frame.len() {
        return Err(BridgeError::Protocol(format!(
            "declared length {} does not match {} received bytes",
            declared,
            frame.len()
        )));
    }

    let payload_end = HEADER_LEN + declared - CHECKSUM_LEN;
    let payload = &frame[HEADER_LEN..payload_end];
    let received = u16::from_be_bytes([frame[payload_end], frame[payload_end + 1]]);
    let expected = checksum(kind, length, payload);
    if received != expected {
        return Err(BridgeError::Protocol(format!(
            "checksum mismatch: got {:#06x}, computed {:#06x}",
            received, expected
        )));
    }

    Ok(payload.to_vec())
}
