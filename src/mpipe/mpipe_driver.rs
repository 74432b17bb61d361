use crate::{
    checksum::{Checksum, Crc16},
    constants::{
        ACK_FRAME_SIZE, ACK_STATUS_OFFSET, FRAME_FOOTER_SIZE, FRAME_HEADER_SIZE, FRAME_PREFIX_SIZE,
    },
    frame::{AckStatus, Frame, FrameCodec, FrameEncodeError},
    link::{Link, LinkEvent, MpipeSpeed, TransferDirection},
    mpipe::{
        ArmedTransfer, BufferRole, MpipeConfig, MpipeError, MpipePriority, MpipeSession,
        MpipeSignal, MpipeSignalHandler, MpipeSignals, MpipeState,
    },
};

/// The message pipe: one framed, acknowledged transfer at a time over a
/// half-duplex link.
///
/// The owner starts transfers with [`Mpipe::send`] and [`Mpipe::receive`].
/// Everything after that is driven by the link's interrupts, delivered
/// through [`Mpipe::on_bulk_complete`] and [`Mpipe::on_transfer_finished`]
/// (or [`Mpipe::handle_event`]). Along the way the pipe may issue its own
/// sends and receives to exchange acknowledgments before it returns to
/// [`MpipeState::Idle`] and raises a completion signal.
///
/// Corrupted frames and corrupted acknowledgments are recovered by
/// retransmission without involving the owner. There is no retry ceiling.
pub struct Mpipe<'a, L, C = Crc16> {
    link: L,
    checksum: C,
    config: MpipeConfig,
    session: MpipeSession,
    signals: MpipeSignals<'a>,
}

impl<'a, L> Mpipe<'a, L, Crc16>
where
    L: Link,
{
    pub fn new(link: L) -> Self {
        Self::with_config(link, MpipeConfig::default())
    }

    pub fn with_config(link: L, config: MpipeConfig) -> Self {
        Self::with_checksum(link, Crc16, config)
    }
}

impl<'a, L, C> Mpipe<'a, L, C>
where
    L: Link,
    C: Checksum,
{
    pub fn with_checksum(mut link: L, checksum: C, config: MpipeConfig) -> Self {
        link.set_speed(config.speed);

        Self {
            link,
            checksum,
            config,
            session: MpipeSession::new(),
            signals: MpipeSignals::new(),
        }
    }

    pub fn current_state(&self) -> MpipeState {
        self.session.state
    }

    pub fn sequence(&self) -> u16 {
        self.session.sequence
    }

    pub fn priority(&self) -> MpipePriority {
        self.session.priority
    }

    pub fn config(&self) -> &MpipeConfig {
        &self.config
    }

    pub fn session(&self) -> &MpipeSession {
        &self.session
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Idle with nothing armed on the link.
    ///
    /// A pipe listening for a frame reports [`MpipeState::Idle`] but is not
    /// idle in this sense until the frame has been handled.
    pub fn is_idle(&self) -> bool {
        self.session.state.is_idle() && self.session.armed.is_none()
    }

    /// The data frame currently held by the pipe.
    pub fn pending_frame(&self) -> &[u8] {
        self.session.pending_frame()
    }

    /// The acknowledgment frame most recently built or received.
    pub fn ack_frame(&self) -> &[u8; ACK_FRAME_SIZE] {
        &self.session.ack_buffer
    }

    /// Hands the data buffer back to the owner, trimmed to the frame.
    ///
    /// Returns `None` while a transfer is outstanding.
    pub fn take_buffer(&mut self) -> Option<Vec<u8>> {
        if !self.is_idle() {
            return None;
        }

        let mut buffer = std::mem::take(&mut self.session.pending);
        buffer.truncate(self.session.pending_length);
        self.session.pending_length = 0;

        Some(buffer)
    }

    pub fn set_signal<H>(&mut self, signal: MpipeSignal, handler: H)
    where
        H: MpipeSignalHandler + 'a,
    {
        self.signals.set(signal, handler);
    }

    pub fn clear_signal(&mut self, signal: MpipeSignal) {
        self.signals.clear(signal);
    }

    pub fn set_speed(&mut self, speed: MpipeSpeed) {
        self.link.close();
        self.link.set_speed(speed);
        self.config.speed = speed;
    }

    /// Footer bytes the pipe appends to every frame it sends.
    pub fn footer_bytes(&self) -> usize {
        FrameCodec::footer_bytes()
    }

    /// Sends the frame held at the start of `buffer`.
    ///
    /// The buffer must hold a 6 byte header followed by the payload length it
    /// announces; the sequence number and checksum are appended here. For
    /// data kinds the buffer is kept by the pipe until the cycle completes
    /// (see [`Mpipe::take_buffer`]).
    ///
    /// An [`MpipePriority::Ack`] send skips the busy check and leaves the
    /// data transfer bookkeeping alone: the frame goes out through the
    /// session's acknowledgment buffer.
    ///
    /// Returns the number of bytes handed to the link.
    pub fn send(
        &mut self,
        mut buffer: Vec<u8>,
        blocking: bool,
        priority: MpipePriority,
    ) -> Result<usize, MpipeError> {
        let length = if self.is_main_transfer(priority) {
            if !self.session.state.is_idle() {
                tracing::debug!(
                    "Send rejected, pipe busy in {:?}",
                    self.session.state
                );
                return Err(MpipeError::Busy(buffer));
            }

            let body_length = FrameCodec::body_length(&buffer)?;
            buffer.resize(body_length + FRAME_FOOTER_SIZE, 0);

            self.session.priority = priority;
            self.session.pending = buffer;
            self.session.pending_length = body_length + FRAME_FOOTER_SIZE;

            self.transmit(BufferRole::Pending)?
        } else {
            let body_length = FrameCodec::body_length(&buffer)?;
            if body_length + FRAME_FOOTER_SIZE > ACK_FRAME_SIZE {
                return Err(FrameEncodeError::BufferTooSmall {
                    required: body_length + FRAME_FOOTER_SIZE,
                    available: ACK_FRAME_SIZE,
                }
                .into());
            }

            self.session.ack_buffer[..body_length].copy_from_slice(&buffer[..body_length]);

            self.transmit(BufferRole::Ack)?
        };

        if blocking {
            self.wait_until_idle()?;
        }

        Ok(length)
    }

    /// Serializes `frame` and sends it.
    pub fn send_frame(
        &mut self,
        frame: &Frame,
        blocking: bool,
        priority: MpipePriority,
    ) -> Result<usize, MpipeError> {
        self.send(FrameCodec::encode(frame)?, blocking, priority)
    }

    /// Listens for a frame into `buffer`.
    ///
    /// Only the minimal prefix is armed here and the state stays
    /// [`MpipeState::Idle`]; the rest of the frame is pulled in once the
    /// prefix arrives. With `priority` set to [`MpipePriority::Broadcast`]
    /// the received frame is not acknowledged.
    ///
    /// An [`MpipePriority::Ack`] receive skips the busy check and captures
    /// into the session's acknowledgment buffer; `buffer` is dropped.
    pub fn receive(
        &mut self,
        buffer: Vec<u8>,
        blocking: bool,
        priority: MpipePriority,
    ) -> Result<(), MpipeError> {
        let role = if self.is_main_transfer(priority) {
            if !self.session.state.is_idle() {
                tracing::debug!(
                    "Receive rejected, pipe busy in {:?}",
                    self.session.state
                );
                return Err(MpipeError::Busy(buffer));
            }

            self.session.priority = priority;
            self.session.pending = buffer;
            BufferRole::Pending
        } else {
            BufferRole::Ack
        };

        self.listen(role);

        if blocking {
            self.wait_until_idle()?;
        }

        Ok(())
    }

    /// Sleeps on the link until the pipe is idle.
    pub fn wait_until_idle(&mut self) -> Result<(), MpipeError> {
        while !self.is_idle() {
            match self.link.wait_for_event() {
                Some(event) => self.handle_event(event),
                None => return Err(MpipeError::Stalled(self.session.state)),
            }
        }

        Ok(())
    }

    /// Handles one event if the link has one ready. Returns whether it did.
    pub fn service(&mut self) -> bool {
        match self.link.wait_for_event() {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::TransferFinished => self.on_transfer_finished(),
            LinkEvent::BulkComplete => self.on_bulk_complete(),
        }
    }

    /// Transceiver interrupt: the device finished shifting out its data.
    ///
    /// While a send is waiting on the device this only moves to the matching
    /// "done" phase; the interrupt stays asserted and the next one runs the
    /// main dispatch.
    pub fn on_transfer_finished(&mut self) {
        match self.session.state.after_transfer_finished() {
            Some(next) => self.set_state(next),
            None => self.dispatch(),
        }
    }

    /// Block-transfer interrupt: the armed transfer moved its full length.
    pub fn on_bulk_complete(&mut self) {
        match self.session.armed.take() {
            Some(ArmedTransfer {
                direction: TransferDirection::Receive,
                role,
                offset,
                length,
            }) => {
                let window = &mut self.session.buffer_mut(role)[offset..offset + length];
                self.link.complete_receive(window);
            }
            // A send that finished after its cycle already closed.
            Some(_) if self.session.state.is_idle() => {
                tracing::debug!("Ignoring late send completion in Idle");
                return;
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    "Bulk transfer completed with nothing armed (state {:?})",
                    self.session.state
                );

                if self.session.state.is_idle() {
                    return;
                }
            }
        }

        self.dispatch();
    }

    fn dispatch(&mut self) {
        match self.session.state {
            MpipeState::Idle => {
                if self.config.signals_enabled {
                    let prefix_end = FRAME_PREFIX_SIZE.min(self.session.pending.len());
                    self.signals.fire(
                        MpipeSignal::ReceiveDetected,
                        &self.session.pending[..prefix_end],
                    );
                }
                self.on_header_received();
            }
            MpipeState::RxHeader => self.on_header_received(),
            MpipeState::RxPayload => self.on_frame_received(),
            MpipeState::TxAckWait | MpipeState::TxWait => self.link.enable_send_interrupt(),
            MpipeState::TxAckDone => self.on_ack_sent(),
            MpipeState::TxDone => self.on_frame_sent(),
            MpipeState::RxAck => self.on_ack_received(),
        }
    }

    fn on_header_received(&mut self) {
        // The prefix already holds the first bytes after the header; only
        // pull what is still on the wire.
        let body_length = FrameCodec::remaining_after_prefix(&self.session.pending)
            .unwrap_or(FRAME_FOOTER_SIZE);
        let outstanding = body_length - (FRAME_PREFIX_SIZE - FRAME_HEADER_SIZE);

        self.session.pending_length = FRAME_HEADER_SIZE + body_length;
        self.set_state(MpipeState::RxPayload);

        if outstanding == 0 {
            self.on_frame_received();
        } else {
            self.arm_receive(BufferRole::Pending, FRAME_PREFIX_SIZE, outstanding);
        }
    }

    fn on_frame_received(&mut self) {
        if !self.acknowledges(self.session.priority) {
            self.receive_done();
            return;
        }

        let end = self.session.pending_length.min(self.session.pending.len());
        let frame = &self.session.pending[..end];

        let sequence = FrameCodec::footer_sequence(frame);
        let status = if self.checksum.is_valid(frame) {
            AckStatus::Ack
        } else {
            tracing::warn!(
                "Received {} byte frame failed its checksum, sending NACK",
                frame.len()
            );
            AckStatus::Nack
        };

        match sequence {
            Ok(sequence) => self.session.sequence = sequence,
            Err(e) => tracing::warn!("Received frame has no sequence field: {}", e),
        }

        FrameCodec::write_ack_header(&mut self.session.ack_buffer, status);

        if let Err(e) = self.transmit(BufferRole::Ack) {
            tracing::error!("Failed to frame acknowledgment: {}", e);
        }

        self.set_state(MpipeState::TxAckWait);
    }

    fn on_ack_sent(&mut self) {
        self.link.disable_send_interrupt();

        let status = AckStatus::from(self.session.ack_buffer[ACK_STATUS_OFFSET]);

        if self.config.variant.is_acknowledged() && status.is_nack() {
            tracing::debug!("NACK sent, listening for retransmission");
            self.listen(BufferRole::Pending);
            self.set_state(MpipeState::RxHeader);
            return;
        }

        self.receive_done();
    }

    fn on_frame_sent(&mut self) {
        self.link.disable_send_interrupt();

        if self.acknowledges(self.session.priority) {
            self.listen(BufferRole::Ack);
            self.set_state(MpipeState::RxAck);
            return;
        }

        self.send_done();
    }

    fn on_ack_received(&mut self) {
        if self.config.variant.is_acknowledged() && !self.checksum.is_valid(&self.session.ack_buffer)
        {
            tracing::warn!(
                "Acknowledgment corrupted, retransmitting sequence {}",
                self.session.sequence
            );

            if let Err(e) = self.transmit(BufferRole::Pending) {
                tracing::error!("Failed to retransmit frame: {}", e);
            }
            return;
        }

        self.send_done();
    }

    fn receive_done(&mut self) {
        self.link.close();
        self.session.armed = None;
        self.set_state(MpipeState::Idle);
        self.reset_priority();

        tracing::debug!(
            "Receive complete: {} bytes, sequence {}",
            self.session.pending_length,
            self.session.sequence
        );

        if self.config.signals_enabled {
            self.signals
                .fire(MpipeSignal::ReceiveComplete, self.session.pending_frame());
        }
    }

    fn send_done(&mut self) {
        self.link.close();
        self.session.armed = None;
        self.session.sequence = self.session.sequence.wrapping_add(1);
        self.set_state(MpipeState::Idle);
        self.reset_priority();

        tracing::debug!(
            "Send complete: {} bytes, next sequence {}",
            self.session.pending_length,
            self.session.sequence
        );

        if self.config.signals_enabled {
            self.signals
                .fire(MpipeSignal::SendComplete, self.session.pending_frame());
        }
    }

    /// Appends the footer to the frame in `role`'s buffer and arms the send.
    fn transmit(&mut self, role: BufferRole) -> Result<usize, FrameEncodeError> {
        let sequence = self.session.sequence;
        let buffer = match role {
            BufferRole::Pending => &mut self.session.pending[..],
            BufferRole::Ack => &mut self.session.ack_buffer[..],
        };

        let body_length = FrameCodec::body_length(buffer)?;
        let length = FrameCodec::append_footer(buffer, body_length, sequence, &self.checksum)?;

        self.set_state(MpipeState::TxWait);

        self.session.armed = Some(ArmedTransfer {
            direction: TransferDirection::Send,
            role,
            offset: 0,
            length,
        });
        tracing::trace!("Armed send of {} bytes from {:?} buffer", length, role);

        self.link.begin_send(&self.session.buffer(role)[..length]);
        self.link.open();

        Ok(length)
    }

    /// Arms capture of a frame prefix into `role`'s buffer. Leaves the state
    /// at `Idle`; callers move it on where the next phase is known.
    fn listen(&mut self, role: BufferRole) {
        if role == BufferRole::Pending {
            self.session.pending_length = FRAME_HEADER_SIZE;
        }

        self.set_state(MpipeState::Idle);
        self.arm_receive(role, 0, FRAME_PREFIX_SIZE);
        self.link.open();
    }

    fn arm_receive(&mut self, role: BufferRole, offset: usize, length: usize) {
        if role == BufferRole::Pending {
            self.session.reserve_pending(offset + length);
        }

        self.session.armed = Some(ArmedTransfer {
            direction: TransferDirection::Receive,
            role,
            offset,
            length,
        });
        tracing::trace!(
            "Armed receive of {} bytes at offset {} into {:?} buffer",
            length,
            offset,
            role
        );

        self.link.begin_receive(length);
    }

    fn set_state(&mut self, next: MpipeState) {
        if self.session.state != next {
            tracing::trace!("{:?} -> {:?}", self.session.state, next);
        }
        self.session.state = next;
    }

    fn reset_priority(&mut self) {
        if self.config.variant.is_acknowledged() {
            self.session.priority = MpipePriority::Low;
        }
    }

    /// Whether a transfer of this kind goes through the busy check and the
    /// data bookkeeping. The converter variant has no separate ack path.
    fn is_main_transfer(&self, priority: MpipePriority) -> bool {
        priority.is_data() || !self.config.variant.is_acknowledged()
    }

    fn acknowledges(&self, priority: MpipePriority) -> bool {
        self.config.variant.is_acknowledged() && !priority.is_broadcast()
    }
}
