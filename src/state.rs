//! Operating mode of NRF24L01(+) devices.



#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// The device is powered down.
    /// This is the mode with the lowest consumption and highest startup time.
    PowerDown,

    /// Then device is powered up and idle.
    /// In this mode the current consumption is increased relative to the
    /// powered down mode but startup time is reduced to 130 microseconds.
    StandbyI,

    /// The device is framing for transmission. CE is only high during the
    /// transmission pulse.
    Transmit,

    /// The device is listening for packets. CE is held high.
    Receive,
}

impl Mode {
    /// Level of the CE pin while the device rests in this mode.
    pub const fn chip_enable(&self) -> bool {
        match self {
            Mode::Receive => true,
            _ => false,
        }
    }
}

#[cfg(feature = "log")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(f, "Power Down"),
            Mode::StandbyI => defmt::write!(f, "Standby-I"),
            Mode::Transmit => defmt::write!(f, "Transmit"),
            Mode::Receive => defmt::write!(f, "Receive"),
        }
    }
}
