//! Decoded views of the NRF24L01(+) status and configuration registers.
//! These are pure functions of the raw byte read from the device. They are
//! never cached, the device is always the authority on its own state.



use core::time::Duration;

use bitfield_struct::bitfield;



/// STATUS register. Shifted out in parallel to every command byte.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Status {
    #[bits(1)]
    _reserved: u8,

    /// Data ready in the RX FIFO.
    pub rx_dr: bool,

    /// Data sent from the TX FIFO (acknowledged if auto-ack is enabled).
    pub tx_ds: bool,

    /// Maximum number of retransmits reached.
    pub max_rt: bool,

    /// Data pipe of the payload available in the RX FIFO (`0b111` if empty).
    #[bits(3)]
    pub rx_p_no: u8,

    /// TX FIFO full.
    pub tx_full: bool,
}



/// CONFIG register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Configuration {
    #[bits(1)]
    _reserved: u8,

    /// Hides the RX_DR interrupt from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Hides the TX_DS interrupt from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Hides the MAX_RT interrupt from the IRQ pin.
    pub mask_max_rt: bool,

    /// CRC enabled.
    pub en_crc: bool,

    /// CRC encoding scheme. Set for 2 bytes, clear for 1 byte.
    pub crco: bool,

    /// Powered up.
    pub pwr_up: bool,

    /// Primary RX mode when set, primary TX mode when clear.
    pub prim_rx: bool,
}



/// RF_SETUP register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct RfSetup {
    /// Continuous carrier transmit.
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    /// Forces the 250 kbps data rate.
    pub rf_dr_low: bool,

    /// Forces PLL lock signal. Test use only.
    pub pll_lock: bool,

    /// Selects the 2 Mbps data rate.
    pub rf_dr_high: bool,

    /// Output power code.
    #[bits(2)]
    pub rf_pwr: u8,

    #[bits(1)]
    _obsolete: u8,
}



/// SETUP_RETR register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Retries {
    /// Auto retransmit delay.
    #[bits(4)]
    pub ard: u8,

    /// Auto retransmit count.
    #[bits(4)]
    pub arc: u8,
}



/// FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FifoStatus {
    #[bits(1)]
    _reserved: u8,

    /// The last transmitted payload will be reused.
    pub tx_reuse: bool,

    /// TX FIFO full.
    pub tx_full: bool,

    /// TX FIFO empty.
    pub tx_empty: bool,

    #[bits(2)]
    _reserved_low: u8,

    /// RX FIFO full.
    pub rx_full: bool,

    /// RX FIFO empty.
    pub rx_empty: bool,
}



/// Timing of the acknowledgement wait, derived from the SETUP_RETR register.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetransmitTiming {
    /// Interval between two status polls.
    pub poll: Duration,

    /// Total time to wait for an acknowledgement.
    pub timeout: Duration,
}

impl RetransmitTiming {
    /// Unit of the auto retransmit delay field.
    pub const STEP: Duration = Duration::from_micros(250);

    /// Derives the timing from the ARD and ARC fields.
    pub const fn new(ard: u8, arc: u8) -> Self {
        let poll = match ard {
            0 => Self::STEP,
            n => Duration::from_micros(n as u64 * 250),
        };

        let timeout = Duration::from_micros(poll.as_micros() as u64 * arc as u64);

        Self { poll, timeout }
    }

    /// Poll interval in microseconds.
    pub fn poll_us(&self) -> u32 {
        self.poll.as_micros() as u32
    }

    /// Timeout in microseconds.
    pub fn timeout_us(&self) -> u32 {
        self.timeout.as_micros() as u32
    }
}

impl From<Retries> for RetransmitTiming {
    fn from(retries: Retries) -> Self {
        Self::new( retries.ard(), retries.arc() )
    }
}
