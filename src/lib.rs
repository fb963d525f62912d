//! NRF24L01(+) no-std polled device driver for executor agnostic embedded `Rust`.
//!
//! What do each of these mean:
//!   - NRF24L01(+) : Works with both the NRF24L01 and NRF24L01+ devices.
//!   - No std : The driver works in all embedded environments.
//!   - Polled : The driver does not need the IRQ pin, events are read from the STATUS register.
//!   - Executor agnostic : The driver does not depend on a specific executor.
//!
//! A [`Device`] owns the SPI device and the CE pin of one radio behind a mutex.
//! All its methods take `&self`, so a [`Device::receive`] loop can run in one
//! task while another task calls [`Device::send`]. Every bus transaction is
//! serialized by the mutex.
//!
//! ```ignore
//! let radio = Device::<CriticalSectionRawMutex, _, _, _>::create(spi, ce, Delay).await?;
//!
//! radio.configure( Config::new().frequency(2476).datarate(DataRate::Low) ).await?;
//! radio.power_on().await?;
//!
//! radio.send(b"Hello world!").await?;
//! ```



#![no_std]



#[macro_use]
mod log;

pub mod common;
pub mod pipe;



mod access;
mod config;
mod dump;
mod error;
mod mode;
mod setup;
mod state;




pub use access::*;

pub use config::*;

pub use dump::*;

pub use error::*;

pub use log::LogLevel;

pub use mode::*;

pub use setup::*;

pub use state::*;



use core::sync::atomic::{
    AtomicU8, Ordering,
};

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    mutex::Mutex,
};

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};



/// Hardware owned by a device. Only accessed through the device mutex.
pub(crate) struct Bus<SPI, CE> {
    /// The SPI interface to the NRF24 device.
    pub(crate) spi: SPI,

    /// The CE pin output to the NRF24 device.
    pub(crate) ce: CE,

    /// Current mode of the device.
    pub(crate) mode: Mode,
}



/// Driver of one NRF24L01(+) device.
pub struct Device<M: RawMutex, SPI, CE, D> {
    /// SPI interface, CE pin and mode of the device.
    /// One lock acquisition per bus transaction.
    pub(crate) bus: Mutex<M, Bus<SPI, CE>>,

    /// Ownership of the RF link. Held by `send` for its whole duration and by
    /// the receive loop while it touches RX mode or the RX FIFO.
    pub(crate) radio: Mutex<M, ()>,

    /// Delay provider. Cloned by every operation that has to wait.
    pub(crate) delay: D,

    /// Verbosity of the log output.
    loglevel: AtomicU8,
}

/// Construction and ownership of the driver.
impl<M: RawMutex, SPI, CE, D> Device<M, SPI, CE, D> {
    /// Creates a new driver without touching the hardware.
    /// The device is assumed powered down. Call [`Device::init`] before use.
    pub fn new(spi: SPI, ce: CE, delay: D) -> Self {
        Self {
            bus: Mutex::new( Bus { spi, ce, mode: Mode::PowerDown } ),
            radio: Mutex::new( () ),
            delay,
            loglevel: AtomicU8::new( LogLevel::Error as u8 ),
        }
    }

    /// Consumes the driver and returns the SPI device, the CE pin and the delay.
    pub fn release(self) -> (SPI, CE, D) {
        let Bus { spi, ce, .. } = self.bus.into_inner();

        (spi, ce, self.delay)
    }

    /// Current verbosity of the log output.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from( self.loglevel.load( Ordering::Relaxed ) )
    }

    /// Sets the verbosity of the log output.
    pub fn set_log_level(&self, level: LogLevel) {
        self.loglevel.store( level as u8, Ordering::Relaxed );
    }
}

/// Common high level method for general use of NRF24L01(+) devices.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Creates a new NRF24L01(+) driver and initializes the device.
    pub async fn create(spi: SPI, ce: CE, delay: D) -> Result<Self, Error<SPI::Error, CE::Error>> {
        let device = Self::new( spi, ce, delay );

        device.init().await?;

        Ok( device )
    }

    /// Initializes the device.
    /// Disables CE, enables dynamic payload lengths on all pipes and probes
    /// the STATUS register.
    pub async fn init(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Disable CE.
        {
            let mut bus = self.bus.lock().await;

            bus.chip_enable( false )?;
        }

        // Enable Dynamic Payload Length.
        self.enable_dynamic_payloads().await?;

        // Perform a NOP to get the status.
        let _status = self.status().await?;

        debug!(self, "Initialized device. Status {=u8:b}", _status.into_bits());

        Ok( () )
    }

    /// Mode of the device as tracked by the driver.
    pub async fn mode(&self) -> Mode {
        self.bus.lock().await.mode
    }
}



#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    use crate::test::{ chip, run };

    #[test]
    fn new_does_not_touch_the_bus() {
        let (device, sim, _) = chip();

        assert!(sim.frames().is_empty());
        assert_eq!(run( device.mode() ), Mode::PowerDown);
        assert_eq!(device.log_level(), LogLevel::Error);
    }

    #[test]
    fn init_enables_dynamic_payloads() {
        let (device, sim, _) = chip();

        run( device.init() ).unwrap();

        assert_eq!(sim.register(common::Register::Features), 0x04);
        assert_eq!(sim.register(common::Register::DynamicPayload), 0x3F);
        assert_eq!(sim.frames().last(), Some(&std::vec![0xFF]));
        assert!(!sim.ce());
    }

    #[test]
    fn log_level_is_per_device() {
        let (device, _, _) = chip();
        let (other, _, _) = chip();

        device.set_log_level(LogLevel::Debug);

        assert_eq!(device.log_level(), LogLevel::Debug);
        assert_eq!(other.log_level(), LogLevel::Error);
    }

    #[test]
    fn release_returns_the_hardware() {
        let (device, sim, _) = chip();

        run( device.power_on() ).unwrap();

        let (_spi, mut ce, _delay) = device.release();

        embedded_hal::digital::OutputPin::set_high(&mut ce).unwrap();

        assert!(sim.ce());
    }
}
