//! Registers of NRF24L01(+) devices.



/// Flag OR'd into a register address to turn a read into a write.
pub const WRITE_FLAG: u8 = 1 << 5;



#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Configuration register.
    Config = 0x00,

    /// Enable auto-acknowledge register.
    EnableAutoACK = 0x01,

    /// Enabled RX addresses register.
    EnabledRXAddress = 0x02,

    /// Setup address width register.
    AddressWidth = 0x03,

    /// Setup retries register.
    SetupRetries = 0x04,

    /// RF Channel register.
    RFChannel = 0x05,

    /// RF Setup register.
    RFSetup = 0x06,

    /// Status register.
    Status = 0x07,

    /// Observe TX register.
    ObserveTX = 0x08,

    /// Receive Power Detector register.
    PowerDetector = 0x09,

    /// Pipe 0 RX Address register.
    RX0Address = 0x0A,

    /// Pipe 1 RX Address register.
    RX1Address = 0x0B,

    /// Pipe 2 RX Address register.
    RX2Address = 0x0C,

    /// Pipe 3 RX Address register.
    RX3Address = 0x0D,

    /// Pipe 4 RX Address register.
    RX4Address = 0x0E,

    /// Pipe 5 RX Address register.
    RX5Address = 0x0F,

    /// TX Address register.
    TXAddress = 0x10,

    /// Pipe 0 RX Payload Width register.
    RX0PayloadWidth = 0x11,

    /// Pipe 1 RX Payload Width register.
    RX1PayloadWidth = 0x12,

    /// Pipe 2 RX Payload Width register.
    RX2PayloadWidth = 0x13,

    /// Pipe 3 RX Payload Width register.
    RX3PayloadWidth = 0x14,

    /// Pipe 4 RX Payload Width register.
    RX4PayloadWidth = 0x15,

    /// Pipe 5 RX Payload Width register.
    RX5PayloadWidth = 0x16,

    /// FIFO Status register.
    FIFOStatus = 0x17,

    /// Dynamic Payload register.
    DynamicPayload = 0x1C,

    /// Features register.
    Features = 0x1D,
}

impl Register {
    /// Widest register on the device, in bytes.
    pub const MAX_WIDTH: usize = 5;

    /// Address byte sent as the command of a read.
    pub const fn address(&self) -> u8 {
        *self as u8
    }

    /// Number of data bytes that follow the command byte.
    pub const fn width(&self) -> usize {
        match self {
            Register::RX0Address | Register::RX1Address | Register::TXAddress => 5,
            _ => 1,
        }
    }
}



/// Bit masks of the register fields used by the driver.
pub mod mask {
    /// CONFIG : CRC enable.
    pub const EN_CRC: u8 = 1 << 3;

    /// CONFIG : CRC encoding scheme (2 bytes when set).
    pub const CRCO: u8 = 1 << 2;

    /// CONFIG : Power up.
    pub const PWR_UP: u8 = 1 << 1;

    /// CONFIG : Primary RX.
    pub const PRIM_RX: u8 = 1;

    /// STATUS : Data ready in the RX FIFO.
    pub const RX_DR: u8 = 1 << 6;

    /// STATUS : Data sent from the TX FIFO.
    pub const TX_DS: u8 = 1 << 5;

    /// STATUS : Maximum number of retransmits.
    pub const MAX_RT: u8 = 1 << 4;

    /// STATUS : TX FIFO full.
    pub const TX_FULL: u8 = 1;

    /// RF_SETUP : Data rate selection bits (RF_DR_LOW | RF_DR_HIGH).
    pub const RF_DR: u8 = 0x28;

    /// RF_SETUP : Output power.
    pub const RF_PWR: u8 = 0x06;

    /// RF_CH : Channel.
    pub const RF_CH: u8 = 0x7F;

    /// SETUP_RETR : Auto retransmit delay.
    pub const ARD: u8 = 0xF0;

    /// SETUP_RETR : Auto retransmit count.
    pub const ARC: u8 = 0x0F;

    /// FEATURE : Dynamic payload length.
    pub const EN_DPL: u8 = 1 << 2;
}
