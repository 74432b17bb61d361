use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEncodeError {
    /// The buffer is shorter than a frame header.
    IncompleteHeader,

    /// The header announces more payload bytes than the buffer holds.
    PayloadTruncated { expected: usize, available: usize },

    /// Payloads are limited to what the one byte length field can express.
    PayloadTooLarge(usize),

    /// The destination cannot hold the frame plus its footer.
    BufferTooSmall { required: usize, available: usize },
}

impl fmt::Display for FrameEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameEncodeError::IncompleteHeader => write!(f, "buffer does not hold a frame header"),
            FrameEncodeError::PayloadTruncated {
                expected,
                available,
            } => write!(
                f,
                "header announces {} payload bytes but only {} are present",
                expected, available
            ),
            FrameEncodeError::PayloadTooLarge(len) => {
                write!(f, "payload of {} bytes exceeds the 255 byte limit", len)
            }
            FrameEncodeError::BufferTooSmall {
                required,
                available,
            } => write!(
                f,
                "frame needs {} bytes but the buffer holds {}",
                required, available
            ),
        }
    }
}

impl std::error::Error for FrameEncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecodeError {
    /// Fewer bytes than a frame header.
    IncompleteHeader,

    /// The header was read but the rest of the frame is missing.
    IncompleteFrame { expected: usize, available: usize },

    /// The checksum over the complete frame was not zero.
    ChecksumMismatch(u16),
}

impl fmt::Display for FrameDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameDecodeError::IncompleteHeader => write!(f, "incomplete frame header"),
            FrameDecodeError::IncompleteFrame {
                expected,
                available,
            } => write!(
                f,
                "incomplete frame: expected {} bytes, got {}",
                expected, available
            ),
            FrameDecodeError::ChecksumMismatch(residue) => {
                write!(f, "checksum mismatch (residue {:#06x})", residue)
            }
        }
    }
}

impl std::error::Error for FrameDecodeError {}
