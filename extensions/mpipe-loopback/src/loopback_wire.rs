use crate::{LoopbackLink, WireFault};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One end of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireSide {
    A,
    B,
}

impl WireSide {
    pub fn peer(self) -> WireSide {
        match self {
            WireSide::A => WireSide::B,
            WireSide::B => WireSide::A,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct WireLane {
    /// Bytes waiting to be captured by this side.
    pub(crate) inbound: VecDeque<u8>,

    /// Faults for the next frames this side sends, oldest first.
    pub(crate) faults: VecDeque<WireFault>,
}

#[derive(Debug, Default)]
pub(crate) struct WireState {
    pub(crate) a: WireLane,
    pub(crate) b: WireLane,
}

impl WireState {
    pub(crate) fn lane_mut(&mut self, side: WireSide) -> &mut WireLane {
        match side {
            WireSide::A => &mut self.a,
            WireSide::B => &mut self.b,
        }
    }

    pub(crate) fn lane(&self, side: WireSide) -> &WireLane {
        match side {
            WireSide::A => &self.a,
            WireSide::B => &self.b,
        }
    }
}

/// Shared handle to the wire between the two endpoints.
///
/// Cloning the handle shares the wire.
#[derive(Debug, Clone, Default)]
pub struct LoopbackWire {
    state: Rc<RefCell<WireState>>,
}

impl LoopbackWire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the link for `side`.
    pub fn endpoint(&self, side: WireSide) -> LoopbackLink {
        LoopbackLink::new(side, self.state.clone())
    }

    /// Links for both sides, A first.
    pub fn endpoints(&self) -> (LoopbackLink, LoopbackLink) {
        (self.endpoint(WireSide::A), self.endpoint(WireSide::B))
    }

    /// Queues `fault` for the next frame sent from `from`.
    pub fn inject(&self, from: WireSide, fault: WireFault) {
        tracing::debug!("Queued {:?} on frames from side {:?}", fault, from);
        self.state.borrow_mut().lane_mut(from).faults.push_back(fault);
    }

    /// Bytes sent towards `side` that it has not captured yet.
    pub fn in_flight(&self, side: WireSide) -> usize {
        self.state.borrow().lane(side).inbound.len()
    }
}
