/// Owner notifications raised by the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpipeSignal {
    /// A receive cycle finished; carries the received frame.
    ReceiveComplete,

    /// A send cycle finished; carries the frame that was sent.
    SendComplete,

    /// The first bytes of an unsolicited frame arrived; carries the captured
    /// prefix.
    ReceiveDetected,
}

pub trait MpipeSignalHandler: FnMut(&[u8]) {}
impl<T: FnMut(&[u8])> MpipeSignalHandler for T {}

/// Handler slots for the three signals. Empty slots do nothing.
#[derive(Default)]
pub struct MpipeSignals<'a> {
    receive_complete: Option<Box<dyn MpipeSignalHandler + 'a>>,
    send_complete: Option<Box<dyn MpipeSignalHandler + 'a>>,
    receive_detected: Option<Box<dyn MpipeSignalHandler + 'a>>,
}

impl<'a> MpipeSignals<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<H>(&mut self, signal: MpipeSignal, handler: H)
    where
        H: MpipeSignalHandler + 'a,
    {
        *self.slot(signal) = Some(Box::new(handler));
    }

    pub fn clear(&mut self, signal: MpipeSignal) {
        *self.slot(signal) = None;
    }

    pub fn is_set(&self, signal: MpipeSignal) -> bool {
        match signal {
            MpipeSignal::ReceiveComplete => self.receive_complete.is_some(),
            MpipeSignal::SendComplete => self.send_complete.is_some(),
            MpipeSignal::ReceiveDetected => self.receive_detected.is_some(),
        }
    }

    pub fn fire(&mut self, signal: MpipeSignal, bytes: &[u8]) {
        if let Some(handler) = self.slot(signal) {
            handler(bytes);
        }
    }

    fn slot(&mut self, signal: MpipeSignal) -> &mut Option<Box<dyn MpipeSignalHandler + 'a>> {
        match signal {
            MpipeSignal::ReceiveComplete => &mut self.receive_complete,
            MpipeSignal::SendComplete => &mut self.send_complete,
            MpipeSignal::ReceiveDetected => &mut self.receive_detected,
        }
    }
}
