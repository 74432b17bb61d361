mod frame_ack_status;
mod frame_codec;
mod frame_error;
mod frame_header;
mod frame_struct;

pub use frame_ack_status::AckStatus;
pub use frame_codec::FrameCodec;
pub use frame_error::{FrameDecodeError, FrameEncodeError};
pub use frame_header::FrameHeader;
pub use frame_struct::{DecodedFrame, Frame};
