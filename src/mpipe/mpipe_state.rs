/// Protocol phase of the pipe.
///
/// `Idle` is both the initial state and where every transfer cycle ends,
/// successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpipeState {
    #[default]
    Idle,
    RxHeader,
    RxPayload,
    TxAckWait,
    TxAckDone,
    TxWait,
    TxDone,
    RxAck,
}

impl MpipeState {
    /// Phase reached when the transceiver reports that it finished flushing,
    /// if this phase is waiting on that.
    pub fn after_transfer_finished(self) -> Option<MpipeState> {
        match self {
            MpipeState::TxWait => Some(MpipeState::TxDone),
            MpipeState::TxAckWait => Some(MpipeState::TxAckDone),
            _ => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == MpipeState::Idle
    }
}
