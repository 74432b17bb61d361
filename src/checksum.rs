use crc::{CRC_16_IBM_3740, Crc};

/// Integrity check over a block of bytes.
///
/// Implementations must be deterministic and must return `0` when run over a
/// block whose trailing two bytes hold the big-endian checksum of everything
/// before them. The pipe relies on that residue property: it never compares
/// checksums, it only tests the result against zero.
pub trait Checksum {
    fn checksum(&self, bytes: &[u8]) -> u16;

    fn is_valid(&self, bytes: &[u8]) -> bool {
        self.checksum(bytes) == 0
    }
}

static CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// CRC-16 with polynomial 0x1021, initial value 0xFFFF, no reflection and no
/// final XOR. Its residue over a block followed by its own big-endian CRC is
/// zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc16;

impl Checksum for Crc16 {
    #[inline]
    fn checksum(&self, bytes: &[u8]) -> u16 {
        CRC16.checksum(bytes)
    }
}
