use super::{BulkTransfer, LinkEvent, MpipeSpeed, Transceiver};
use std::collections::VecDeque;

/// A call the pipe made into its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCommand {
    Open,
    Close,
    EnableSendInterrupt,
    DisableSendInterrupt,
    SetSpeed(MpipeSpeed),
    Send(Vec<u8>),
    Receive(usize),
}

/// In-memory link that records every command and replays scripted input.
///
/// Inbound bytes are queued with [`ScriptedLink::push_inbound`] and handed
/// out in order as receives complete. Events are only produced when queued
/// with [`ScriptedLink::push_event`], so a test decides exactly when the
/// hardware "interrupts".
#[derive(Debug, Default)]
pub struct ScriptedLink {
    commands: Vec<LinkCommand>,
    inbound: VecDeque<u8>,
    events: VecDeque<LinkEvent>,
    is_open: bool,
    send_interrupt_enabled: bool,
}

impl ScriptedLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_inbound(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes);
    }

    pub fn push_event(&mut self, event: LinkEvent) {
        self.events.push_back(event);
    }

    pub fn push_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = LinkEvent>,
    {
        self.events.extend(events);
    }

    pub fn commands(&self) -> &[LinkCommand] {
        &self.commands
    }

    /// Drains the command log.
    pub fn take_commands(&mut self) -> Vec<LinkCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Every frame handed to [`BulkTransfer::begin_send`], oldest first.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                LinkCommand::Send(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Length of the most recently armed receive.
    pub fn last_receive_length(&self) -> Option<usize> {
        self.commands.iter().rev().find_map(|command| match command {
            LinkCommand::Receive(length) => Some(*length),
            _ => None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn send_interrupt_enabled(&self) -> bool {
        self.send_interrupt_enabled
    }

    pub fn inbound_len(&self) -> usize {
        self.inbound.len()
    }
}

impl Transceiver for ScriptedLink {
    fn open(&mut self) {
        self.is_open = true;
        self.commands.push(LinkCommand::Open);
    }

    fn close(&mut self) {
        self.is_open = false;
        self.commands.push(LinkCommand::Close);
    }

    fn enable_send_interrupt(&mut self) {
        self.send_interrupt_enabled = true;
        self.commands.push(LinkCommand::EnableSendInterrupt);
    }

    fn disable_send_interrupt(&mut self) {
        self.send_interrupt_enabled = false;
        self.commands.push(LinkCommand::DisableSendInterrupt);
    }

    fn set_speed(&mut self, speed: MpipeSpeed) {
        self.commands.push(LinkCommand::SetSpeed(speed));
    }

    fn wait_for_event(&mut self) -> Option<LinkEvent> {
        self.events.pop_front()
    }
}

impl BulkTransfer for ScriptedLink {
    fn begin_send(&mut self, bytes: &[u8]) {
        self.commands.push(LinkCommand::Send(bytes.to_vec()));
    }

    fn begin_receive(&mut self, length: usize) {
        self.commands.push(LinkCommand::Receive(length));
    }

    // Short input leaves the tail of `dest` untouched, like a transfer that
    // was cut off.
    fn complete_receive(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            match self.inbound.pop_front() {
                Some(value) => *byte = value,
                None => break,
            }
        }
    }
}
