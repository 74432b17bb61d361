// Frame related constants
pub const FRAME_FLAGS_OFFSET: usize = 0;
pub const FRAME_TYPE_LENGTH_OFFSET: usize = 1;
pub const FRAME_PAYLOAD_LENGTH_OFFSET: usize = 2;
pub const FRAME_ID_LENGTH_OFFSET: usize = 3;
pub const FRAME_ID_OFFSET: usize = 4;
pub const FRAME_HEADER_SIZE: usize = 6;

/// Size in bytes of the trailing sequence number (u16, big-endian).
pub const FRAME_SEQUENCE_SIZE: usize = 2;

/// Size in bytes of the trailing checksum (u16, big-endian).
pub const FRAME_CHECKSUM_SIZE: usize = 2;

/// Sequence number plus checksum.
pub const FRAME_FOOTER_SIZE: usize = FRAME_SEQUENCE_SIZE + FRAME_CHECKSUM_SIZE;

/// The payload length field is a single byte.
pub const FRAME_MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;

/// Smallest complete frame: a header with an empty payload and a footer.
pub const FRAME_MIN_SIZE: usize = FRAME_HEADER_SIZE + FRAME_FOOTER_SIZE; // 6 + 4 = 10

/// Largest complete frame the link can carry.
pub const FRAME_MAX_SIZE: usize = FRAME_MIN_SIZE + FRAME_MAX_PAYLOAD_SIZE; // 10 + 255 = 265

/// Number of bytes captured before a frame's true length is known.
///
/// Large enough to hold the header and to cover the smallest possible
/// frame in one read.
pub const FRAME_PREFIX_SIZE: usize = FRAME_MIN_SIZE;

/// Record flags of a single, self-contained message.
pub const FRAME_DEFAULT_FLAGS: u8 = 0xDD;

// Acknowledgment frame constants

/// Header flags byte carried by every acknowledgment frame.
pub const ACK_FRAME_FLAGS: u8 = FRAME_DEFAULT_FLAGS;

/// Acknowledgments carry a two byte id field and no payload.
pub const ACK_FRAME_ID_LENGTH: u8 = 2;

/// Byte offset of the ACK/NACK status within an acknowledgment frame.
pub const ACK_STATUS_OFFSET: usize = 5;

/// Status byte reporting a frame that passed its checksum.
pub const ACK_STATUS_ACK: u8 = 0x00;

/// Status byte reporting a frame that failed its checksum.
pub const ACK_STATUS_NACK: u8 = 0x7F;

/// Total size of an acknowledgment frame on the wire.
pub const ACK_FRAME_SIZE: usize = FRAME_MIN_SIZE;
