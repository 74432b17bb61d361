/// Kind of a transfer handed to the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpipePriority {
    /// Ordinary data, acknowledged by the peer.
    #[default]
    Low,

    /// Acknowledged data the owner considers urgent. The link treats it the
    /// same as `Low`.
    High,

    /// Data sent or expected without any acknowledgment exchange.
    Broadcast,

    /// An acknowledgment frame. Issued by the pipe itself while a data
    /// transfer is in progress, so it never counts as the main transfer.
    Ack,
}

impl MpipePriority {
    pub fn is_data(self) -> bool {
        self != MpipePriority::Ack
    }

    pub fn is_broadcast(self) -> bool {
        self == MpipePriority::Broadcast
    }
}
