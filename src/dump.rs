//! Human readable dump of the NRF24L01(+) registers.



use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,

    Device, Error, BASE_FREQUENCY,
};



/// Snapshot of the registers relevant to the driver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterDump {
    /// STATUS register, read with a NOP.
    pub status: Status,

    /// CONFIG register.
    pub config: Configuration,

    /// RF channel, offset from 2400 MHz.
    pub channel: u8,

    /// RF_SETUP register.
    pub rf_setup: RfSetup,

    /// SETUP_RETR register.
    pub retries: Retries,

    /// FIFO_STATUS register.
    pub fifo: FifoStatus,
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.status;
        writeln!(f, "STATUS       {:#x}", s.into_bits())?;
        writeln!(f, "  RX_DR {} | TX_DS {} | MAX_RT {} | RX_P_NO {} | TX_FULL {}", s.rx_dr() as u8, s.tx_ds() as u8, s.max_rt() as u8, s.rx_p_no(), s.tx_full() as u8)?;

        let c = self.config;
        writeln!(f, "CONFIG       {:#x}", c.into_bits())?;
        writeln!(f, "  EN_CRC {} | CRCO {} | PWR_UP {} | PRIM_RX {}", c.en_crc() as u8, c.crco() as u8, c.pwr_up() as u8, c.prim_rx() as u8)?;

        writeln!(f, "RF_CH        {:#x}", self.channel)?;
        writeln!(f, "  {} MHz", BASE_FREQUENCY + self.channel as u16)?;

        let r = self.rf_setup;
        writeln!(f, "RF_SETUP     {:#x}", r.into_bits())?;
        writeln!(f, "  RF_DR_LOW {} | RF_DR_HIGH {} | RF_PWR {}", r.rf_dr_low() as u8, r.rf_dr_high() as u8, r.rf_pwr())?;

        let timing = RetransmitTiming::from( self.retries );
        writeln!(f, "SETUP_RETR   {:#x}", self.retries.into_bits())?;
        writeln!(f, "  ARD {} ({} us) | ARC {}", self.retries.ard(), timing.poll_us(), self.retries.arc())?;

        let q = self.fifo;
        writeln!(f, "FIFO_STATUS  {:#x}", q.into_bits())?;
        write!(f, "  TX_FULL {} | TX_EMPTY {} | RX_FULL {} | RX_EMPTY {}", q.tx_full() as u8, q.tx_empty() as u8, q.rx_full() as u8, q.rx_empty() as u8)
    }
}



impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Reads the registers relevant to the driver.
    pub async fn dump(&self) -> Result<RegisterDump, Error<SPI::Error, CE::Error>> {
        Ok( RegisterDump {
            status: self.status().await?,
            config: self.configuration().await?,
            channel: self.channel().await?,
            rf_setup: self.rf_setup().await?,
            retries: self.retries().await?,
            fifo: self.fifo_status().await?,
        })
    }

    /// Logs the registers relevant to the driver.
    #[cfg(feature = "log")]
    pub async fn report(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        let dump = self.dump().await?;

        info!(self, "STATUS      {=u8:b}", dump.status.into_bits());
        info!(self, "CONFIG      {=u8:b}", dump.config.into_bits());
        info!(self, "RF_CH       {=u8}", dump.channel);
        info!(self, "RF_SETUP    {=u8:b}", dump.rf_setup.into_bits());
        info!(self, "SETUP_RETR  {=u8:b}", dump.retries.into_bits());
        info!(self, "FIFO_STATUS {=u8:b}", dump.fifo.into_bits());

        Ok( () )
    }
}
