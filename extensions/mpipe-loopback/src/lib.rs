//! Two MPIPE endpoints joined back to back over an in-memory wire.
//!
//! Each [`LoopbackLink`] models a transceiver plus block-transfer engine:
//! armed sends complete on the next poll and land on the peer's side of the
//! wire, the send-finished interrupt stays asserted while enabled, and armed
//! receives complete once enough bytes are waiting. Faults queued on a
//! [`LoopbackWire`] corrupt the next frame a side sends.

mod loopback_fault;
pub use loopback_fault::WireFault;

mod loopback_link;
pub use loopback_link::LoopbackLink;

mod loopback_wire;
pub use loopback_wire::{LoopbackWire, WireSide};

mod pump;
pub use pump::pump;
