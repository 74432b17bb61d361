/// Link speeds the pipe knows how to request from a transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpipeSpeed {
    Baud9600,
    Baud28800,
    Baud57600,
    #[default]
    Baud115200,
    /// Fast-mode I2C.
    Khz400,
}

impl MpipeSpeed {
    pub fn bits_per_second(self) -> u32 {
        match self {
            MpipeSpeed::Baud9600 => 9_600,
            MpipeSpeed::Baud28800 => 28_800,
            MpipeSpeed::Baud57600 => 57_600,
            MpipeSpeed::Baud115200 => 115_200,
            MpipeSpeed::Khz400 => 400_000,
        }
    }
}
