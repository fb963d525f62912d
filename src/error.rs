//! Errors emitted by NRF24L01(+) device drivers.
//! Hardware errors specify that the error originated from the SPI bus or the
//! CE pin. Every other error is reported by the driver or the NRF24L01(+)
//! device itself.



use core::time::Duration;



/// A caller supplied value outside of its documented range.
/// Carries the rejected value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
pub enum Parameter {
    /// Unknown RF_SETUP data rate code.
    DataRate( u8 ),

    /// Unknown RF_SETUP output power code.
    Gain( u8 ),

    /// Unknown CONFIG CRC code.
    Crc( u8 ),

    /// Frequency outside of [2400, 2525] MHz.
    Frequency( u16 ),

    /// RF channel above 125.
    Channel( u8 ),

    /// Auto retransmit count above 15.
    RetransmitCount( u8 ),

    /// Auto retransmit delay above 15.
    RetransmitDelay( u8 ),

    /// Payload outside of [1, 32] bytes.
    PayloadLength( usize ),
}



/// A set of possible hardware errors in the driver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HardwareError<SPI, CE> {
    /// An error with the SPI hardware.
    Serial( SPI ),

    /// An error with the CE pin.
    ChipEnable( CE ),
}

#[cfg(feature = "log")]
impl<SPI, CE> defmt::Format for HardwareError<SPI, CE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            HardwareError::Serial( _ ) => defmt::write!(f, "SPI Serial Error"),
            HardwareError::ChipEnable( _ ) => defmt::write!(f, "Digital IO Error"),
        }
    }
}



/// A set of possible errors in the driver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<SPI, CE> {
    /// The bus or the CE pin failed. The operation in flight was aborted.
    Transport( HardwareError<SPI, CE> ),

    /// A value outside of its documented range. No bus access was made.
    InvalidParameter( Parameter ),

    /// The device is powered down. Only `power_on` leaves Power Down.
    PoweredDown,

    /// The device's TX FIFO is full. No payload was written.
    TxFifoFull,

    /// No acknowledgement arrived within the given time.
    /// The TX FIFO was flushed and the TX flags cleared.
    AckTimeout( Duration ),

    /// The device reported a payload width above 32 bytes.
    /// The RX FIFO was flushed.
    ProtocolViolation( u8 ),

    /// A register field read back with a reserved code.
    BinaryCorruption( u8 ),
}

impl<SPI, CE> Error<SPI, CE> {
    /// Returns `true` if the error originated in the bus or the CE pin.
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Transport( _ ) => true,
            _ => false,
        }
    }
}

impl<SPI, CE> From<Parameter> for Error<SPI, CE> {
    fn from(parameter: Parameter) -> Self {
        Error::InvalidParameter( parameter )
    }
}

impl<SPI, CE> From<HardwareError<SPI, CE>> for Error<SPI, CE> {
    fn from(hwe: HardwareError<SPI, CE>) -> Self {
        Error::Transport( hwe )
    }
}

#[cfg(feature = "log")]
impl<SPI, CE> defmt::Format for Error<SPI, CE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Transport( hwe ) => defmt::write!(f, "Transport failure [{}]", hwe),
            Error::InvalidParameter( p ) => defmt::write!(f, "Invalid parameter {}", p),
            Error::PoweredDown => defmt::write!(f, "Device is powered down"),
            Error::TxFifoFull => defmt::write!(f, "TX Output buffer is full"),
            Error::AckTimeout( t ) => defmt::write!(f, "No ACK received in {=u64} us", t.as_micros() as u64),
            Error::ProtocolViolation( w ) => defmt::write!(f, "Dynamic payload length {=u8} is greater than 32 bytes", w),
            Error::BinaryCorruption( b ) => defmt::write!(f, "Reserved field code read back {=u8:#x}", b),
        }
    }
}
