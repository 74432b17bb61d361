//! Message pipe (MPIPE) link layer.
//!
//! Moves variable-length framed messages between an embedded node and a host
//! over a half-duplex, interrupt-driven byte transceiver with a block-transfer
//! engine. Each frame carries a sequence number and a trailing checksum, and
//! non-broadcast frames are confirmed with an ACK/NACK exchange.
//!
//! The hardware stays behind the traits in [`link`]; the checksum behind
//! [`checksum::Checksum`]. [`mpipe::Mpipe`] is the protocol state machine.

pub mod checksum;
pub mod constants;
pub mod frame;
pub mod link;
pub mod mpipe;
