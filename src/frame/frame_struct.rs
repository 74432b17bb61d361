use crate::constants::{FRAME_DEFAULT_FLAGS, FRAME_MAX_PAYLOAD_SIZE};
use crate::frame::{FrameEncodeError, FrameHeader};

/// An outgoing frame before its footer is attached.
///
/// The sequence number and checksum are not part of this value: they belong
/// to the link and are appended by the pipe at send time, so the same frame
/// can be retransmitted without being rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: FrameHeader,

    /// Application bytes, at most 255.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Builds a frame around `payload`, keeping the header's length field in
    /// step with the payload.
    pub fn new(mut header: FrameHeader, payload: Vec<u8>) -> Result<Self, FrameEncodeError> {
        if payload.len() > FRAME_MAX_PAYLOAD_SIZE {
            return Err(FrameEncodeError::PayloadTooLarge(payload.len()));
        }

        header.payload_length = payload.len() as u8;

        Ok(Self { header, payload })
    }

    /// A plain data frame with default record flags.
    pub fn data(payload: &[u8]) -> Result<Self, FrameEncodeError> {
        let header = FrameHeader {
            flags: FRAME_DEFAULT_FLAGS,
            ..FrameHeader::default()
        };

        Self::new(header, payload.to_vec())
    }
}

/// A verified frame as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub payload: Vec<u8>,

    /// The sender's sequence number from the footer.
    pub sequence: u16,
}
