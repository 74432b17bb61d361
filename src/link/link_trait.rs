use super::{LinkEvent, MpipeSpeed};

/// The byte-stream device the pipe runs over (a UART or I2C peripheral).
///
/// None of these calls block. Register programming, pin mapping and clock
/// setup are the implementor's business.
pub trait Transceiver {
    fn open(&mut self);

    fn close(&mut self);

    /// Lets the device raise [`LinkEvent::TransferFinished`] once its shift
    /// register drains.
    fn enable_send_interrupt(&mut self);

    fn disable_send_interrupt(&mut self);

    fn set_speed(&mut self, _speed: MpipeSpeed) {}

    /// Low-power wait for the next interrupt.
    ///
    /// Returns `None` when no further event can ever arrive, which only a
    /// simulated link can know.
    fn wait_for_event(&mut self) -> Option<LinkEvent>;
}

/// The block-transfer (DMA) engine paired with the transceiver.
///
/// Only one transfer is armed at a time; arming a new one replaces the
/// previous one. Completion is reported as [`LinkEvent::BulkComplete`].
pub trait BulkTransfer {
    /// Starts streaming `bytes` into the transceiver.
    fn begin_send(&mut self, bytes: &[u8]);

    /// Starts capturing `length` bytes from the transceiver.
    fn begin_receive(&mut self, length: usize);

    /// Hands over the bytes of the receive that just completed.
    ///
    /// Called once per completed receive with `dest.len()` equal to the
    /// armed length; this is the moment the engine's writes become visible
    /// in the pipe's buffer.
    fn complete_receive(&mut self, dest: &mut [u8]);
}

/// Everything the pipe needs from the hardware side.
pub trait Link: Transceiver + BulkTransfer {}
impl<T: Transceiver + BulkTransfer> Link for T {}
