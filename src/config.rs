//! Configuration of NRF24L01(+) devices.



use embassy_sync::blocking_mutex::raw::RawMutex;

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use super::{
    common::*,

    Device, Error,
};



#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// RF frequency of the device (in MHz).
    pub(crate) frequency: u16,

    /// RF data rate.
    pub(crate) dr: DataRate,

    /// RF gain.
    pub(crate) gain: Gain,

    /// CRC checksum configuration.
    pub(crate) crc: CRCBytes,

    /// Maximum number of retransmits per packet sent.
    pub(crate) retries: u8,

    /// Delay between retransmits [n * 250 us, minimum 250 us].
    pub(crate) delay: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a new configuration instance with the reset values of the device.
    pub const fn new() -> Self {
        Self {
            frequency: 2402,
            dr: DataRate::High,
            gain: Gain::Max,
            crc: CRCBytes::One,
            retries: 3,
            delay: 0,
        }
    }

    /// Set the RF frequency (in MHz). Validated when applied.
    pub const fn frequency(mut self, mhz: u16) -> Self {
        self.frequency = mhz;
        self
    }

    /// Set the RF data rate.
    pub const fn datarate(mut self, dr: DataRate) -> Self {
        self.dr = dr;
        self
    }

    /// Set the RF gain.
    pub const fn gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    /// Set the CRC configuration.
    pub const fn crc(mut self, crc: CRCBytes) -> Self {
        self.crc = crc;
        self
    }

    /// Sets the maximum number of retransmits per packet sent.
    /// Set to 0 to disable retransmits. Validated when applied.
    pub const fn retries(mut self, retries: u8) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay between retransmits in increments of 250 microseconds.
    /// If set to 0, the delay will be the minimum of 250 us. Validated when applied.
    pub const fn delay(mut self, delay: u8) -> Self {
        self.delay = delay;
        self
    }
}



impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Applies a configuration to the device.
    /// Fields are written in order. An invalid field fails before its own
    /// write, the fields before it stay applied.
    pub async fn configure(&self, config: Config) -> Result<(), Error<SPI::Error, CE::Error>> {
        self.set_frequency( config.frequency ).await?;
        self.set_data_rate( config.dr ).await?;
        self.set_gain( config.gain ).await?;
        self.set_crc( config.crc ).await?;
        self.set_retransmit_count( config.retries ).await?;
        self.set_retransmit_delay( config.delay ).await?;

        Ok( () )
    }
}



#[cfg(test)]
mod test {
    extern crate std;

    use super::*;

    use crate::{
        test::{ chip, run },
        Parameter,
    };

    #[test]
    fn configure_applies_every_field() {
        let (device, sim, _) = chip();

        let config = Config::new()
            .frequency(2476)
            .datarate(DataRate::Low)
            .gain(Gain::Mid)
            .crc(CRCBytes::Two)
            .retries(10)
            .delay(4);

        run( device.configure(config) ).unwrap();

        assert_eq!(sim.register(Register::RFChannel), 76);
        assert_eq!(sim.register(Register::SetupRetries), 0x4A);

        assert_eq!(run( device.frequency() ), Ok(2476));
        assert_eq!(run( device.data_rate() ), Ok(DataRate::Low));
        assert_eq!(run( device.gain() ), Ok(Gain::Mid));
        assert_eq!(run( device.crc() ), Ok(CRCBytes::Two));
    }

    #[test]
    fn configure_stops_at_invalid_field() {
        let (device, sim, _) = chip();

        let config = Config::new()
            .frequency(2410)
            .retries(16);

        let result = run( device.configure(config) );

        assert_eq!(result, Err(Error::InvalidParameter(Parameter::RetransmitCount(16))));

        // Fields before the invalid one were written.
        assert_eq!(sim.register(Register::RFChannel), 10);
        assert_eq!(sim.register(Register::SetupRetries), 0x03);
    }

    #[test]
    fn invalid_frequency_is_rejected_first() {
        let (device, sim, _) = chip();

        let frames = sim.frames().len();

        let result = run( device.configure( Config::new().frequency(2600) ) );

        assert_eq!(result, Err(Error::InvalidParameter(Parameter::Frequency(2600))));
        assert_eq!(sim.frames().len(), frames);
    }
}
