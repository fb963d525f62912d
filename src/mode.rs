//! Power and mode state machine of NRF24L01(+) devices.
//!
//! ```text
//! PowerDown -> StandbyI <-> Transmit
//!              StandbyI <-> Receive
//! ```
//!
//! Transmit and Receive never switch directly, they always pass through
//! Standby-I. The CE pin is only driven from this module.



use embassy_sync::blocking_mutex::raw::RawMutex;

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,

    Device, Error, Mode,
};



/// Crystal oscillator startup after setting PWR_UP, in microseconds.
pub const POWER_UP_DELAY: u32 = 5_000;

/// Settle time of a Standby-I transition, in microseconds.
pub const STANDBY_DELAY: u32 = 130;

/// Width of the CE transmission pulse, in microseconds.
pub const PULSE_WIDTH: u32 = 10;



/// Mode transitions of the NRF24 device.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Powers up the device and leaves it in Standby-I.
    pub async fn power_on(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Set PWR_UP.
        self.write( Register::Config, mask::PWR_UP, mask::PWR_UP ).await?;

        self.bus.lock().await.mode = Mode::StandbyI;

        // Settle in Standby-I.
        self.enter_standby().await?;

        // Wait for the oscillator.
        self.sleep_us( POWER_UP_DELAY ).await;

        info!(self, "Powered on");

        Ok( () )
    }

    /// Powers down the device.
    /// Always performs the full sequence, calling it on a powered down device is harmless.
    pub async fn power_off(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Disable CE.
        self.bus.lock().await.chip_enable( false )?;

        // Clear PWR_UP.
        self.write( Register::Config, mask::PWR_UP, 0 ).await?;

        self.sleep_us( POWER_UP_DELAY ).await;

        self.bus.lock().await.mode = Mode::PowerDown;

        info!(self, "Powered off");

        Ok( () )
    }

    /// Puts the device in Standby-I.
    /// Disables CE and selects primary TX. A powered down device stays powered down.
    pub async fn enter_standby(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Disable CE.
        self.bus.lock().await.chip_enable( false )?;

        // Clear PRIM_RX.
        self.write( Register::Config, mask::PRIM_RX, 0 ).await?;

        self.sleep_us( STANDBY_DELAY ).await;

        let mut bus = self.bus.lock().await;

        if bus.mode != Mode::PowerDown {
            bus.mode = Mode::StandbyI;
        }

        debug!(self, "Mode {}", bus.mode);

        Ok( () )
    }

    /// Puts the device in RX mode and starts listening.
    /// Fails with `PoweredDown` if the device was not powered on.
    pub async fn enter_receive(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        match self.mode().await {
            Mode::PowerDown => return Err( Error::PoweredDown ),
            Mode::Receive => return Ok( () ),
            Mode::Transmit => self.enter_standby().await?,
            _ => (),
        }

        // Set PRIM_RX.
        self.write( Register::Config, mask::PRIM_RX, mask::PRIM_RX ).await?;

        // Enable CE.
        self.bus.lock().await.chip_enable( true )?;

        self.sleep_us( STANDBY_DELAY ).await;

        self.bus.lock().await.mode = Mode::Receive;

        debug!(self, "Mode {}", Mode::Receive);

        Ok( () )
    }

    /// Puts the device in TX mode. CE stays low until the next pulse.
    /// Fails with `PoweredDown` if the device was not powered on.
    pub async fn enter_transmit(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        match self.mode().await {
            Mode::PowerDown => return Err( Error::PoweredDown ),
            Mode::Receive => self.enter_standby().await?,
            _ => (),
        }

        // Clear PRIM_RX.
        self.write( Register::Config, mask::PRIM_RX, 0 ).await?;

        self.bus.lock().await.mode = Mode::Transmit;

        debug!(self, "Mode {}", Mode::Transmit);

        Ok( () )
    }

    /// Pulses CE to transmit the top level TX FIFO packet.
    /// The bus is held for the whole pulse. The device ends in Standby-I.
    pub(crate) async fn pulse(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        let mut bus = self.bus.lock().await;

        if bus.mode == Mode::PowerDown {
            return Err( Error::PoweredDown );
        }

        bus.chip_enable( true )?;

        self.sleep_us( PULSE_WIDTH ).await;

        bus.chip_enable( false )?;

        bus.mode = Mode::StandbyI;

        Ok( () )
    }

    /// Waits for the given amount of microseconds.
    pub(crate) async fn sleep_us(&self, us: u32) {
        let mut delay = self.delay.clone();

        delay.delay_us( us ).await;
    }
}



#[cfg(test)]
mod test {
    extern crate std;

    use super::*;

    use crate::test::{ chip, run };

    #[test]
    fn power_off_is_idempotent() {
        let (device, sim, elapsed) = chip();

        run( device.power_on() ).unwrap();
        assert_eq!(run( device.mode() ), Mode::StandbyI);
        assert!(sim.config() & mask::PWR_UP != 0);

        run( device.power_off() ).unwrap();
        assert_eq!(run( device.mode() ), Mode::PowerDown);

        run( device.power_off() ).unwrap();
        assert_eq!(run( device.mode() ), Mode::PowerDown);
        assert_eq!(sim.config() & mask::PWR_UP, 0);
        assert!(!sim.ce());

        // Power up, standby settle and two power downs.
        assert_eq!(elapsed.get(), (3 * POWER_UP_DELAY as u64 + STANDBY_DELAY as u64) * 1000);
    }

    #[test]
    fn receive_and_transmit_pass_through_standby() {
        let (device, sim, _) = chip();

        run( device.power_on() ).unwrap();

        run( device.enter_receive() ).unwrap();
        assert_eq!(run( device.mode() ), Mode::Receive);
        assert!(sim.config() & mask::PRIM_RX != 0);
        assert!(sim.ce());

        run( device.enter_transmit() ).unwrap();
        assert_eq!(run( device.mode() ), Mode::Transmit);
        assert_eq!(sim.config() & mask::PRIM_RX, 0);
        assert!(!sim.ce());
    }

    #[test]
    fn enter_receive_twice_is_a_noop() {
        let (device, sim, _) = chip();

        run( device.power_on() ).unwrap();
        run( device.enter_receive() ).unwrap();

        let frames = sim.frames().len();

        run( device.enter_receive() ).unwrap();

        assert_eq!(sim.frames().len(), frames);
        assert_eq!(run( device.mode() ), Mode::Receive);
    }

    #[test]
    fn pulse_returns_to_standby() {
        let (device, sim, elapsed) = chip();

        run( device.power_on() ).unwrap();
        run( device.enter_transmit() ).unwrap();

        let before = elapsed.get();

        run( device.pulse() ).unwrap();

        assert_eq!(elapsed.get() - before, PULSE_WIDTH as u64 * 1000);
        assert_eq!(run( device.mode() ), Mode::StandbyI);
        assert!(!sim.ce());
        assert!(!Mode::StandbyI.chip_enable());
    }

    #[test]
    fn powered_down_device_stays_powered_down() {
        let (device, sim, _) = chip();

        assert_eq!(run( device.enter_receive() ), Err(Error::PoweredDown));
        assert_eq!(run( device.enter_transmit() ), Err(Error::PoweredDown));
        assert_eq!(run( device.pulse() ), Err(Error::PoweredDown));

        assert_eq!(run( device.mode() ), Mode::PowerDown);
        assert_eq!(sim.config(), 0x08);
        assert!(!sim.ce());
        assert!(sim.frames().is_empty());
    }

    #[test]
    fn power_off_then_receive_is_rejected() {
        let (device, sim, _) = chip();

        run( device.power_on() ).unwrap();
        run( device.enter_receive() ).unwrap();
        run( device.power_off() ).unwrap();

        assert_eq!(run( device.enter_receive() ), Err(Error::PoweredDown));
        assert_eq!(run( device.mode() ), Mode::PowerDown);
        assert_eq!(sim.config() & (mask::PWR_UP | mask::PRIM_RX), mask::PRIM_RX);
        assert!(!sim.ce());
    }
}
