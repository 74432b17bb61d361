mod link_event;
mod link_speed;
mod link_trait;
mod scripted_link;

pub use link_event::{LinkEvent, TransferDirection};
pub use link_speed::MpipeSpeed;
pub use link_trait::{BulkTransfer, Link, Transceiver};
pub use scripted_link::{LinkCommand, ScriptedLink};
