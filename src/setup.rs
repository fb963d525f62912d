//! RF and protocol setup of NRF24L01(+) devices.
//! Every setter validates its argument before touching the bus and only
//! writes the bits of its own field.



use core::convert::TryFrom;

use embassy_sync::blocking_mutex::raw::RawMutex;

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,

    Device, Error, Parameter,
};



/// Lowest RF frequency of the device, in MHz.
pub const BASE_FREQUENCY: u16 = 2400;

/// Highest RF channel of the device.
pub const MAX_CHANNEL: u8 = 125;

/// Highest value of the 4 bit SETUP_RETR fields.
const MAX_RETRIES: u8 = 0x0F;

/// Number of data pipes of the device.
const PIPES: u8 = 6;



/// Setters of the NRF24 device's RF and protocol configuration.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Sets the RF data rate.
    pub async fn set_data_rate(&self, rate: DataRate) -> Result<(), Error<SPI::Error, CE::Error>> {
        info!(self, "Setting data rate to {=u16} kbps", rate.kbps());

        self.write( Register::RFSetup, DataRate::MASK, rate.bits() ).await
    }

    /// Sets the RF output power.
    pub async fn set_gain(&self, gain: Gain) -> Result<(), Error<SPI::Error, CE::Error>> {
        info!(self, "Setting gain to {=i8} dBm", gain.dbm());

        self.write( Register::RFSetup, Gain::MASK, gain.bits() ).await
    }

    /// Sets the CRC checksum length.
    pub async fn set_crc(&self, crc: CRCBytes) -> Result<(), Error<SPI::Error, CE::Error>> {
        info!(self, "Setting CRC to {}", crc);

        self.write( Register::Config, CRCBytes::MASK, crc.bits() ).await
    }

    /// Sets the RF frequency in MHz, in the range [2400, 2525].
    pub async fn set_frequency(&self, mhz: u16) -> Result<(), Error<SPI::Error, CE::Error>> {
        match mhz.checked_sub( BASE_FREQUENCY ) {
            Some( ch ) if ch <= MAX_CHANNEL as u16 => self.set_channel( ch as u8 ).await,
            _ => Err( Parameter::Frequency( mhz ).into() ),
        }
    }

    /// Sets the RF channel, in the range [0, 125].
    pub async fn set_channel(&self, channel: u8) -> Result<(), Error<SPI::Error, CE::Error>> {
        if channel > MAX_CHANNEL {
            return Err( Parameter::Channel( channel ).into() );
        }

        info!(self, "Setting RF channel {=u8} ({=u16} MHz)", channel, BASE_FREQUENCY + channel as u16);

        self.write( Register::RFChannel, mask::RF_CH, channel ).await
    }

    /// Sets the number of auto retransmits, in the range [0, 15].
    pub async fn set_retransmit_count(&self, count: u8) -> Result<(), Error<SPI::Error, CE::Error>> {
        if count > MAX_RETRIES {
            return Err( Parameter::RetransmitCount( count ).into() );
        }

        info!(self, "Setting {=u8} auto retransmits", count);

        self.write( Register::SetupRetries, mask::ARC, count ).await
    }

    /// Sets the auto retransmit delay in steps of 250 us, in the range [0, 15].
    /// A delay of 0 is the minimum of 250 us.
    pub async fn set_retransmit_delay(&self, delay: u8) -> Result<(), Error<SPI::Error, CE::Error>> {
        if delay > MAX_RETRIES {
            return Err( Parameter::RetransmitDelay( delay ).into() );
        }

        info!(self, "Setting auto retransmit delay code {=u8}", delay);

        self.write( Register::SetupRetries, mask::ARD, delay << 4 ).await
    }

    /// Enables dynamic payload lengths on every pipe.
    pub async fn enable_dynamic_payloads(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Enable the feature.
        self.write( Register::Features, mask::EN_DPL, mask::EN_DPL ).await?;

        // Enable it on each pipe.
        for pipe in 0..PIPES {
            let bit = 1 << pipe;

            self.write( Register::DynamicPayload, bit, bit ).await?;
        }

        debug!(self, "Enabled dynamic payload lengths");

        Ok( () )
    }
}



/// Getters of the NRF24 device's RF and protocol configuration.
/// Every getter reads the device, nothing is cached.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Reads the RF data rate.
    pub async fn data_rate(&self) -> Result<DataRate, Error<SPI::Error, CE::Error>> {
        let setup = self.rf_setup().await?;

        match (setup.rf_dr_low(), setup.rf_dr_high()) {
            (true, true) => Err( Error::BinaryCorruption( setup.into_bits() & DataRate::MASK ) ),
            (true, _) => Ok( DataRate::Low ),
            (_, true) => Ok( DataRate::High ),
            _ => Ok( DataRate::Mid ),
        }
    }

    /// Reads the RF output power.
    pub async fn gain(&self) -> Result<Gain, Error<SPI::Error, CE::Error>> {
        let setup = self.rf_setup().await?;

        Ok( Gain::try_from( setup.into_bits() & Gain::MASK )? )
    }

    /// Reads the CRC checksum length.
    pub async fn crc(&self) -> Result<CRCBytes, Error<SPI::Error, CE::Error>> {
        let config = self.configuration().await?;

        match (config.en_crc(), config.crco()) {
            (false, _) => Ok( CRCBytes::None ),
            (true, true) => Ok( CRCBytes::Two ),
            (true, false) => Ok( CRCBytes::One ),
        }
    }

    /// Reads the RF channel.
    pub async fn channel(&self) -> Result<u8, Error<SPI::Error, CE::Error>> {
        let response = self.read( Register::RFChannel ).await?;

        Ok( response.byte() & mask::RF_CH )
    }

    /// Reads the RF frequency in MHz.
    pub async fn frequency(&self) -> Result<u16, Error<SPI::Error, CE::Error>> {
        Ok( BASE_FREQUENCY + self.channel().await? as u16 )
    }

    /// Reads the SETUP_RETR register.
    pub async fn retries(&self) -> Result<Retries, Error<SPI::Error, CE::Error>> {
        let response = self.read( Register::SetupRetries ).await?;

        Ok( Retries::from_bits( response.byte() ) )
    }

    /// Reads the acknowledgement timing.
    pub async fn retransmit_timing(&self) -> Result<RetransmitTiming, Error<SPI::Error, CE::Error>> {
        Ok( RetransmitTiming::from( self.retries().await? ) )
    }

    /// Reads the CONFIG register.
    pub async fn configuration(&self) -> Result<Configuration, Error<SPI::Error, CE::Error>> {
        let response = self.read( Register::Config ).await?;

        Ok( Configuration::from_bits( response.byte() ) )
    }

    /// Reads the RF_SETUP register.
    pub async fn rf_setup(&self) -> Result<RfSetup, Error<SPI::Error, CE::Error>> {
        let response = self.read( Register::RFSetup ).await?;

        Ok( RfSetup::from_bits( response.byte() ) )
    }

    /// Reads the FIFO_STATUS register.
    pub async fn fifo_status(&self) -> Result<FifoStatus, Error<SPI::Error, CE::Error>> {
        let response = self.read( Register::FIFOStatus ).await?;

        Ok( FifoStatus::from_bits( response.byte() ) )
    }
}



#[cfg(test)]
mod test {
    extern crate std;

    use super::*;

    use crate::{
        spi_test_expects,
        test::{ mk_device, run },
    };

    use std::vec;

    #[test]
    fn frequency_maps_to_channel() {
        let spi_expectations = spi_test_expects![
            (vec![0x05, 0], vec![0x0E, 0x02]),
            (vec![0x25, 0x00], vec![0x0E, 0x00]),
            (vec![0x05, 0], vec![0x0E, 0x00]),
            (vec![0x25, 0x7D], vec![0x0E, 0x00]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        run( device.set_frequency(2400) ).unwrap();
        run( device.set_frequency(2525) ).unwrap();

        spi.done();
        ce.done();
    }

    #[test]
    fn out_of_range_frequencies_do_not_touch_the_bus() {
        let (device, mut spi, mut ce) = mk_device(&[], &[]);

        assert!(matches!(run( device.set_frequency(2399) ), Err(Error::InvalidParameter(Parameter::Frequency(2399)))));
        assert!(matches!(run( device.set_frequency(2526) ), Err(Error::InvalidParameter(Parameter::Frequency(2526)))));
        assert!(matches!(run( device.set_frequency(0) ), Err(Error::InvalidParameter(Parameter::Frequency(0)))));
        assert!(matches!(run( device.set_channel(126) ), Err(Error::InvalidParameter(Parameter::Channel(126)))));

        spi.done();
        ce.done();
    }

    #[test]
    fn retransmit_fields_are_validated() {
        let (device, mut spi, mut ce) = mk_device(&[], &[]);

        assert!(matches!(run( device.set_retransmit_count(16) ), Err(Error::InvalidParameter(Parameter::RetransmitCount(16)))));
        assert!(matches!(run( device.set_retransmit_delay(16) ), Err(Error::InvalidParameter(Parameter::RetransmitDelay(16)))));

        spi.done();
        ce.done();
    }

    #[test]
    fn retransmit_fields_keep_each_other() {
        let spi_expectations = spi_test_expects![
            (vec![0x04, 0], vec![0x0E, 0x03]),
            (vec![0x24, 0x0F], vec![0x0E, 0x00]),
            (vec![0x04, 0], vec![0x0E, 0x0F]),
            (vec![0x24, 0x4F], vec![0x0E, 0x00]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        run( device.set_retransmit_count(15) ).unwrap();
        run( device.set_retransmit_delay(4) ).unwrap();

        spi.done();
        ce.done();
    }

    #[test]
    fn data_rate_only_touches_its_bits() {
        let spi_expectations = spi_test_expects![
            (vec![0x06, 0], vec![0x0E, 0x0F]),
            (vec![0x26, 0x27], vec![0x0E, 0x00]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        run( device.set_data_rate(DataRate::Low) ).unwrap();

        spi.done();
        ce.done();
    }

    #[test]
    fn gain_and_crc_setters() {
        let spi_expectations = spi_test_expects![
            (vec![0x06, 0], vec![0x0E, 0x0F]),
            (vec![0x26, 0x0B], vec![0x0E, 0x00]),
            (vec![0x00, 0], vec![0x0E, 0x0A]),
            (vec![0x20, 0x0E], vec![0x0E, 0x00]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        run( device.set_gain(Gain::Mid) ).unwrap();
        run( device.set_crc(CRCBytes::Two) ).unwrap();

        spi.done();
        ce.done();
    }

    #[test]
    fn dynamic_payloads_on_every_pipe() {
        let spi_expectations = spi_test_expects![
            (vec![0x1D, 0], vec![0x0E, 0x00]),
            (vec![0x3D, 0x04], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x00]),
            (vec![0x3C, 0x01], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x01]),
            (vec![0x3C, 0x03], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x03]),
            (vec![0x3C, 0x07], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x07]),
            (vec![0x3C, 0x0F], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x0F]),
            (vec![0x3C, 0x1F], vec![0x0E, 0x00]),
            (vec![0x1C, 0], vec![0x0E, 0x1F]),
            (vec![0x3C, 0x3F], vec![0x0E, 0x00]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        run( device.enable_dynamic_payloads() ).unwrap();

        spi.done();
        ce.done();
    }

    #[test]
    fn getters_decode_registers() {
        let spi_expectations = spi_test_expects![
            (vec![0x06, 0], vec![0x0E, 0x26]),
            (vec![0x06, 0], vec![0x0E, 0x26]),
            (vec![0x00, 0], vec![0x0E, 0x08]),
            (vec![0x05, 0], vec![0x0E, 0x4C]),
            (vec![0x04, 0], vec![0x0E, 0x4A]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        assert_eq!(run( device.data_rate() ).unwrap(), DataRate::Low);
        assert_eq!(run( device.gain() ).unwrap(), Gain::Max);
        assert_eq!(run( device.crc() ).unwrap(), CRCBytes::One);
        assert_eq!(run( device.frequency() ).unwrap(), 2476);

        let timing = run( device.retransmit_timing() ).unwrap();
        assert_eq!(timing.poll_us(), 1000);
        assert_eq!(timing.timeout_us(), 10_000);

        spi.done();
        ce.done();
    }

    #[test]
    fn reserved_data_rate_is_corruption() {
        let spi_expectations = spi_test_expects![
            (vec![0x06, 0], vec![0x0E, 0x2E]),
        ];

        let (device, mut spi, mut ce) = mk_device(&[], &spi_expectations);

        assert!(matches!(run( device.data_rate() ), Err(Error::BinaryCorruption(0x28))));

        spi.done();
        ce.done();
    }
}
