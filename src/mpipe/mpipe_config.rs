use crate::link::MpipeSpeed;

/// Which flavor of the pipe protocol runs on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpipeVariant {
    /// Software ACK/NACK handshake after every non-broadcast data frame.
    #[default]
    Acknowledged,

    /// Single-session converter flavor: no priorities and no
    /// acknowledgments. Every transfer, acknowledgment sends included, must
    /// wait for the pipe to be idle.
    UsbConverter,
}

impl MpipeVariant {
    pub fn is_acknowledged(self) -> bool {
        self == MpipeVariant::Acknowledged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpipeConfig {
    pub variant: MpipeVariant,

    /// When false, registered signal handlers are kept but never invoked.
    pub signals_enabled: bool,

    pub speed: MpipeSpeed,
}

impl Default for MpipeConfig {
    fn default() -> Self {
        Self {
            variant: MpipeVariant::Acknowledged,
            signals_enabled: true,
            speed: MpipeSpeed::default(),
        }
    }
}

impl MpipeConfig {
    pub fn with_variant(mut self, variant: MpipeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_signals_enabled(mut self, signals_enabled: bool) -> Self {
        self.signals_enabled = signals_enabled;
        self
    }

    pub fn with_speed(mut self, speed: MpipeSpeed) -> Self {
        self.speed = speed;
        self
    }
}
