use crate::constants::ACK_FRAME_SIZE;
use crate::link::TransferDirection;
use crate::mpipe::{MpipePriority, MpipeState};

/// Which of the session's two buffers a transfer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    /// The owner's data frame.
    Pending,

    /// The session's own acknowledgment frame.
    Ack,
}

/// The one bulk transfer the hardware has armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTransfer {
    pub direction: TransferDirection,
    pub role: BufferRole,

    /// Where in the target buffer the transfer starts.
    pub offset: usize,

    pub length: usize,
}

/// State of the single physical link.
///
/// Two buffers are kept apart on purpose: acknowledgments are built and
/// captured in `ack_buffer` while a data transfer is still in flight, so they
/// must never touch `pending`, `pending_length` or `priority`.
#[derive(Debug, Default)]
pub struct MpipeSession {
    pub state: MpipeState,

    /// Incremented once per completed data send, wrapping. A receiver copies
    /// the sender's value out of every acknowledged frame.
    pub sequence: u16,

    /// Kind of the main (data) transfer.
    pub priority: MpipePriority,

    /// The in-flight data frame, moved in from the owner for the duration of
    /// the transfer.
    pub pending: Vec<u8>,

    /// Bytes of `pending` that belong to the frame.
    pub pending_length: usize,

    pub ack_buffer: [u8; ACK_FRAME_SIZE],

    pub armed: Option<ArmedTransfer>,
}

impl MpipeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, role: BufferRole) -> &[u8] {
        match role {
            BufferRole::Pending => &self.pending,
            BufferRole::Ack => &self.ack_buffer,
        }
    }

    pub fn buffer_mut(&mut self, role: BufferRole) -> &mut [u8] {
        match role {
            BufferRole::Pending => &mut self.pending,
            BufferRole::Ack => &mut self.ack_buffer,
        }
    }

    /// The bytes of the in-flight data frame.
    pub fn pending_frame(&self) -> &[u8] {
        let end = self.pending_length.min(self.pending.len());
        &self.pending[..end]
    }

    /// Makes sure `pending` can hold `len` bytes.
    pub fn reserve_pending(&mut self, len: usize) {
        if self.pending.len() < len {
            self.pending.resize(len, 0);
        }
    }
}
