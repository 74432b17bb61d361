/// Hardware notifications that drive the pipe forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The transceiver finished shifting out everything it was handed.
    ///
    /// Raised by the transceiver's own interrupt while the send interrupt is
    /// enabled. It is level triggered: it keeps firing until disabled.
    TransferFinished,

    /// The block-transfer engine moved the full armed length.
    BulkComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Send,
    Receive,
}
