use crate::{
    checksum::Checksum,
    constants::{
        ACK_FRAME_SIZE, FRAME_FOOTER_SIZE, FRAME_HEADER_SIZE, FRAME_PAYLOAD_LENGTH_OFFSET,
        FRAME_MAX_PAYLOAD_SIZE, FRAME_PREFIX_SIZE, FRAME_SEQUENCE_SIZE,
    },
    frame::{AckStatus, DecodedFrame, Frame, FrameDecodeError, FrameEncodeError, FrameHeader},
};

/// Layout rules for frames on the pipe.
///
/// Wire layout:
///
/// ```text
/// [ header: 6 ] [ payload: 0..=255 ] [ sequence: 2 ] [ checksum: 2 ]
/// ```
///
/// The sequence number and checksum are big-endian. The checksum covers the
/// header, payload and sequence number, so running the checksum over a whole
/// frame yields zero when the frame is intact.
pub struct FrameCodec;

impl FrameCodec {
    /// Number of bytes the footer adds to a frame.
    pub const fn footer_bytes() -> usize {
        FRAME_FOOTER_SIZE
    }

    /// Bytes to capture before the true frame length can be determined.
    ///
    /// This also covers a complete zero-payload frame such as an
    /// acknowledgment.
    pub const fn minimal_prefix_size() -> usize {
        FRAME_PREFIX_SIZE
    }

    /// Total on-wire length of the frame whose header starts `buf`.
    pub fn frame_total_length(buf: &[u8]) -> Result<usize, FrameDecodeError> {
        Ok(FRAME_HEADER_SIZE + Self::remaining_after_prefix(buf)?)
    }

    /// Number of bytes that follow the 6 byte header: the payload plus the
    /// footer.
    ///
    /// Part of this range already sits in a captured prefix (everything up to
    /// [`FrameCodec::minimal_prefix_size`]); callers pulling the rest of a
    /// frame off the wire subtract what they already hold.
    pub fn remaining_after_prefix(buf: &[u8]) -> Result<usize, FrameDecodeError> {
        let payload_length = *buf
            .get(FRAME_PAYLOAD_LENGTH_OFFSET)
            .ok_or(FrameDecodeError::IncompleteHeader)? as usize;

        Ok(payload_length + FRAME_FOOTER_SIZE)
    }

    /// Length of the header plus payload held at the start of `buf`, checked
    /// against what the buffer actually contains.
    pub fn body_length(buf: &[u8]) -> Result<usize, FrameEncodeError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameEncodeError::IncompleteHeader);
        }

        let payload_length = buf[FRAME_PAYLOAD_LENGTH_OFFSET] as usize;
        let body_length = FRAME_HEADER_SIZE + payload_length;

        if buf.len() < body_length {
            return Err(FrameEncodeError::PayloadTruncated {
                expected: payload_length,
                available: buf.len() - FRAME_HEADER_SIZE,
            });
        }

        Ok(body_length)
    }

    /// Writes `sequence` and then the checksum of everything up to and
    /// including it at `buf[length..length + 4]`.
    ///
    /// Returns the new frame length, `length + 4`.
    pub fn append_footer<C: Checksum>(
        buf: &mut [u8],
        length: usize,
        sequence: u16,
        checksum: &C,
    ) -> Result<usize, FrameEncodeError> {
        let required = length + FRAME_FOOTER_SIZE;

        if buf.len() < required {
            return Err(FrameEncodeError::BufferTooSmall {
                required,
                available: buf.len(),
            });
        }

        let sequence_end = length + FRAME_SEQUENCE_SIZE;
        buf[length..sequence_end].copy_from_slice(&sequence.to_be_bytes());

        let crc = checksum.checksum(&buf[..sequence_end]);
        buf[sequence_end..required].copy_from_slice(&crc.to_be_bytes());

        Ok(required)
    }

    /// Reads the sequence number out of the footer of a complete frame.
    pub fn footer_sequence(frame: &[u8]) -> Result<u16, FrameDecodeError> {
        let total = Self::frame_total_length(frame)?;

        let sequence = frame
            .get(total - FRAME_FOOTER_SIZE..total - FRAME_FOOTER_SIZE + FRAME_SEQUENCE_SIZE)
            .ok_or(FrameDecodeError::IncompleteFrame {
                expected: total,
                available: frame.len(),
            })?;

        Ok(u16::from_be_bytes([sequence[0], sequence[1]]))
    }

    /// Serializes the header and payload of `frame`, leaving capacity for the
    /// footer the pipe appends at send time.
    ///
    /// The header's length field is taken from the payload, which must fit
    /// in it.
    pub fn encode(frame: &Frame) -> Result<Vec<u8>, FrameEncodeError> {
        if frame.payload.len() > FRAME_MAX_PAYLOAD_SIZE {
            return Err(FrameEncodeError::PayloadTooLarge(frame.payload.len()));
        }

        let mut buf =
            Vec::with_capacity(FRAME_HEADER_SIZE + frame.payload.len() + FRAME_FOOTER_SIZE);

        let mut header = frame.header.to_bytes();
        header[FRAME_PAYLOAD_LENGTH_OFFSET] = frame.payload.len() as u8;

        buf.extend(&header);
        buf.extend(&frame.payload);

        Ok(buf)
    }

    /// Serializes `frame` complete with footer, as it appears on the wire.
    pub fn encode_complete<C: Checksum>(
        frame: &Frame,
        sequence: u16,
        checksum: &C,
    ) -> Result<Vec<u8>, FrameEncodeError> {
        let mut buf = Self::encode(frame)?;
        let length = buf.len();

        buf.resize(length + FRAME_FOOTER_SIZE, 0);
        Self::append_footer(&mut buf, length, sequence, checksum)?;

        Ok(buf)
    }

    /// Verifies and splits a complete frame.
    pub fn decode<C: Checksum>(buf: &[u8], checksum: &C) -> Result<DecodedFrame, FrameDecodeError> {
        let header = FrameHeader::from_bytes(buf)?;
        let total = Self::frame_total_length(buf)?;

        if buf.len() < total {
            return Err(FrameDecodeError::IncompleteFrame {
                expected: total,
                available: buf.len(),
            });
        }

        let residue = checksum.checksum(&buf[..total]);
        if residue != 0 {
            return Err(FrameDecodeError::ChecksumMismatch(residue));
        }

        Ok(DecodedFrame {
            header,
            payload: buf[FRAME_HEADER_SIZE..total - FRAME_FOOTER_SIZE].to_vec(),
            sequence: Self::footer_sequence(&buf[..total])?,
        })
    }

    /// Writes the header of an acknowledgment frame into `buf`.
    ///
    /// The footer is left to the sender; the frame is complete once it is
    /// appended.
    pub fn write_ack_header(buf: &mut [u8; ACK_FRAME_SIZE], status: AckStatus) {
        buf[..FRAME_HEADER_SIZE].copy_from_slice(&FrameHeader::ack(status).to_bytes());
    }
}
