use crate::frame::FrameEncodeError;
use crate::mpipe::MpipeState;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum MpipeError {
    /// A data transfer is already outstanding. Try again once the pipe is
    /// idle. The rejected buffer is handed back untouched.
    Busy(Vec<u8>),

    /// The buffer does not hold a well-formed frame.
    Encode(FrameEncodeError),

    /// A blocking wait was left in the given state because the link reported
    /// that no further event will arrive.
    Stalled(MpipeState),
}

impl fmt::Display for MpipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpipeError::Busy(_) => write!(f, "pipe is busy with another transfer"),
            MpipeError::Encode(e) => write!(f, "cannot frame buffer: {}", e),
            MpipeError::Stalled(state) => {
                write!(f, "link went quiet while the pipe was in {:?}", state)
            }
        }
    }
}

impl std::error::Error for MpipeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MpipeError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameEncodeError> for MpipeError {
    fn from(e: FrameEncodeError) -> Self {
        MpipeError::Encode(e)
    }
}
