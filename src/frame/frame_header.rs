use crate::constants::{
    ACK_FRAME_FLAGS, ACK_FRAME_ID_LENGTH, FRAME_FLAGS_OFFSET, FRAME_HEADER_SIZE, FRAME_ID_LENGTH_OFFSET,
    FRAME_ID_OFFSET, FRAME_PAYLOAD_LENGTH_OFFSET, FRAME_TYPE_LENGTH_OFFSET,
};
use crate::frame::{AckStatus, FrameDecodeError};

/// The fixed 6 byte header that starts every frame.
///
/// Field names follow the record header the pipe wraps: a flags byte that
/// marks the start of a frame, three length fields and a two byte id.
/// Only `payload_length` drives the link layer; the other fields are carried
/// through untouched for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameHeader {
    /// Frame-start marker and record flags.
    pub flags: u8,

    pub type_length: u8,

    /// Number of payload bytes between the header and the footer.
    pub payload_length: u8,

    pub id_length: u8,

    /// Reserved / id bytes. In acknowledgment frames the second byte holds
    /// the ACK/NACK status.
    pub id: [u8; 2],
}

impl FrameHeader {
    /// Header of an acknowledgment frame reporting `status`.
    pub fn ack(status: AckStatus) -> Self {
        Self {
            flags: ACK_FRAME_FLAGS,
            type_length: 0,
            payload_length: 0,
            id_length: ACK_FRAME_ID_LENGTH,
            id: [0, status.as_byte()],
        }
    }

    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[FRAME_FLAGS_OFFSET] = self.flags;
        bytes[FRAME_TYPE_LENGTH_OFFSET] = self.type_length;
        bytes[FRAME_PAYLOAD_LENGTH_OFFSET] = self.payload_length;
        bytes[FRAME_ID_LENGTH_OFFSET] = self.id_length;
        bytes[FRAME_ID_OFFSET..FRAME_HEADER_SIZE].copy_from_slice(&self.id);
        bytes
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, FrameDecodeError> {
        let header = buf
            .get(..FRAME_HEADER_SIZE)
            .ok_or(FrameDecodeError::IncompleteHeader)?;

        Ok(Self {
            flags: header[FRAME_FLAGS_OFFSET],
            type_length: header[FRAME_TYPE_LENGTH_OFFSET],
            payload_length: header[FRAME_PAYLOAD_LENGTH_OFFSET],
            id_length: header[FRAME_ID_LENGTH_OFFSET],
            id: [header[FRAME_ID_OFFSET], header[FRAME_ID_OFFSET + 1]],
        })
    }

    /// Status carried by an acknowledgment header.
    pub fn ack_status(&self) -> AckStatus {
        AckStatus::from(self.id[1])
    }
}
