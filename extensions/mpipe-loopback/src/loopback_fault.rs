/// Damage applied to one outgoing frame while it crosses the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFault {
    /// Inverts bit `bit` (0 = least significant) of byte `byte`.
    FlipBit { byte: usize, bit: u8 },

    /// Loses `count` bytes starting at `at`.
    DropBytes { at: usize, count: usize },
}

impl WireFault {
    /// Applies the fault to `bytes`. Positions past the end are ignored.
    pub fn apply(self, bytes: &mut Vec<u8>) {
        match self {
            WireFault::FlipBit { byte, bit } => {
                if let Some(value) = bytes.get_mut(byte) {
                    *value ^= 1 << (bit % 8);
                }
            }
            WireFault::DropBytes { at, count } => {
                let start = at.min(bytes.len());
                let end = at.saturating_add(count).min(bytes.len());
                bytes.drain(start..end);
            }
        }
    }
}
