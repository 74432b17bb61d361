use crate::constants::{ACK_STATUS_ACK, ACK_STATUS_NACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    Ack,
    Nack,
}

impl AckStatus {
    pub fn as_byte(self) -> u8 {
        match self {
            AckStatus::Ack => ACK_STATUS_ACK,
            AckStatus::Nack => ACK_STATUS_NACK,
        }
    }

    pub fn is_nack(self) -> bool {
        self == AckStatus::Nack
    }
}

// Any non-zero status byte is a NACK, not only the one this side emits.
impl From<u8> for AckStatus {
    fn from(value: u8) -> Self {
        match value {
            ACK_STATUS_ACK => AckStatus::Ack,
            _ => AckStatus::Nack,
        }
    }
}
