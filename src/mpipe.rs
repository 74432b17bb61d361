mod mpipe_config;
mod mpipe_driver;
mod mpipe_error;
mod mpipe_priority;
mod mpipe_session;
mod mpipe_signals;
mod mpipe_state;

pub use mpipe_config::{MpipeConfig, MpipeVariant};
pub use mpipe_driver::Mpipe;
pub use mpipe_error::MpipeError;
pub use mpipe_priority::MpipePriority;
pub use mpipe_session::{ArmedTransfer, BufferRole, MpipeSession};
pub use mpipe_signals::{MpipeSignal, MpipeSignalHandler, MpipeSignals};
pub use mpipe_state::MpipeState;
