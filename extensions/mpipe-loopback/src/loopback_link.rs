use crate::loopback_wire::WireState;
use crate::WireSide;
use mpipe::link::{BulkTransfer, LinkEvent, MpipeSpeed, Transceiver};
use std::cell::RefCell;
use std::rc::Rc;

/// One side's transceiver and block-transfer engine.
///
/// Events come out of [`Transceiver::wait_for_event`] in hardware order: a
/// finished bulk send first, then the send-finished interrupt for as long as
/// it is enabled, then a bulk receive once the armed length is waiting.
#[derive(Debug)]
pub struct LoopbackLink {
    side: WireSide,
    wire: Rc<RefCell<WireState>>,
    is_open: bool,
    send_interrupt_enabled: bool,
    speed: MpipeSpeed,

    /// A bulk send whose completion has not been reported yet.
    sending: bool,

    /// The device has shifted out everything it was handed.
    flushed: bool,

    receive_armed: Option<usize>,
}

impl LoopbackLink {
    pub(crate) fn new(side: WireSide, wire: Rc<RefCell<WireState>>) -> Self {
        Self {
            side,
            wire,
            is_open: false,
            send_interrupt_enabled: false,
            speed: MpipeSpeed::default(),
            sending: false,
            flushed: true,
            receive_armed: None,
        }
    }

    pub fn side(&self) -> WireSide {
        self.side
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn speed(&self) -> MpipeSpeed {
        self.speed
    }

    /// Length of the receive currently armed, if any.
    pub fn receive_armed(&self) -> Option<usize> {
        self.receive_armed
    }
}

impl Transceiver for LoopbackLink {
    fn open(&mut self) {
        self.is_open = true;
    }

    fn close(&mut self) {
        self.is_open = false;
    }

    fn enable_send_interrupt(&mut self) {
        self.send_interrupt_enabled = true;
    }

    fn disable_send_interrupt(&mut self) {
        self.send_interrupt_enabled = false;
    }

    fn set_speed(&mut self, speed: MpipeSpeed) {
        self.speed = speed;
    }

    fn wait_for_event(&mut self) -> Option<LinkEvent> {
        if self.sending {
            self.sending = false;
            self.flushed = true;
            return Some(LinkEvent::BulkComplete);
        }

        if self.send_interrupt_enabled && self.flushed {
            return Some(LinkEvent::TransferFinished);
        }

        if let Some(length) = self.receive_armed {
            let waiting = self.wire.borrow().lane(self.side).inbound.len();
            if self.is_open && waiting >= length {
                self.receive_armed = None;
                return Some(LinkEvent::BulkComplete);
            }
        }

        None
    }
}

impl BulkTransfer for LoopbackLink {
    fn begin_send(&mut self, bytes: &[u8]) {
        let mut frame = bytes.to_vec();

        let mut wire = self.wire.borrow_mut();
        if let Some(fault) = wire.lane_mut(self.side).faults.pop_front() {
            tracing::warn!(
                "Applying {:?} to {} byte frame from side {:?}",
                fault,
                frame.len(),
                self.side
            );
            fault.apply(&mut frame);
        }
        wire.lane_mut(self.side.peer()).inbound.extend(frame);

        self.receive_armed = None;
        self.sending = true;
        self.flushed = false;
    }

    fn begin_receive(&mut self, length: usize) {
        self.sending = false;
        self.receive_armed = Some(length);
    }

    fn complete_receive(&mut self, dest: &mut [u8]) {
        let mut wire = self.wire.borrow_mut();
        let inbound = &mut wire.lane_mut(self.side).inbound;

        for byte in dest.iter_mut() {
            match inbound.pop_front() {
                Some(value) => *byte = value,
                None => break,
            }
        }
    }
}
