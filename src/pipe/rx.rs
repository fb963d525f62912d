//! Polling loop that drains the RX FIFO.



use embassy_futures::select::{ select, Either };

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::Sender,
    signal::Signal,
};

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,

    Device, Error,
};

use super::{ Payload, MAX_PAYLOAD };



/// Item emitted by the receive loop.
pub type Reception<SPI, CE> = Result<Payload, Error<SPI, CE>>;



/// Receive path of the NRF24 device.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Listens for packets until `stop` is signaled.
    ///
    /// Every packet is sent to `sink` in arrival order. A packet with an
    /// invalid length is discarded with the whole RX FIFO and reported as
    /// `Err(ProtocolViolation)`, listening continues after it.
    /// On return the device is back in Standby-I, also when the loop ended on
    /// a transport error.
    pub async fn receive<const N: usize>(&self, sink: Sender<'_, M, Reception<SPI::Error, CE::Error>, N>, stop: &Signal<M, ()>) -> Result<(), Error<SPI::Error, CE::Error>> {
        let timing = self.retransmit_timing().await?;

        {
            let _radio = self.radio.lock().await;

            self.enter_receive().await?;
        }

        info!(self, "Listening, polling every {=u32} us", timing.poll_us());

        let outcome = self.listen( &sink, stop, timing.poll_us() ).await;

        if let Err( _e ) = &outcome {
            critical!(self, "Receive loop aborted: {}", _e);
        }

        let standby = {
            let _radio = self.radio.lock().await;

            self.enter_standby().await
        };

        outcome.and( standby )
    }

    /// Inner loop of the receiver. Returns `Ok` only when stopped.
    async fn listen<const N: usize>(&self, sink: &Sender<'_, M, Reception<SPI::Error, CE::Error>, N>, stop: &Signal<M, ()>, poll: u32) -> Result<(), Error<SPI::Error, CE::Error>> {
        let mut delay = self.delay.clone();

        loop {
            if let Some( item ) = self.fetch().await? {
                let payload = item.is_ok();

                if let Either::First( _ ) = select( stop.wait(), sink.send( item ) ).await {
                    return Ok( () );
                }

                if payload {
                    self.clear_flags( mask::RX_DR ).await?;
                }
            }

            if let Either::First( _ ) = select( stop.wait(), delay.delay_us( poll ) ).await {
                return Ok( () );
            }
        }
    }

    /// Takes the top level RX FIFO packet, if there is one.
    /// Holds the RF link, so no send can interleave.
    async fn fetch(&self) -> Result<Option<Reception<SPI::Error, CE::Error>>, Error<SPI::Error, CE::Error>> {
        let _radio = self.radio.lock().await;

        // A send in another task may have left RX mode.
        self.enter_receive().await?;

        if !self.status().await?.rx_dr() {
            return Ok( None );
        }

        // RX_DR of a packet that was read but never delivered.
        if self.fifo_status().await?.rx_empty() {
            self.clear_flags( mask::RX_DR ).await?;

            return Ok( None );
        }

        let width = self.payload_width().await?;

        if width as usize > MAX_PAYLOAD {
            // The length is corrupted, the FIFO cannot be trusted.
            self.flush_rx().await?;
            self.clear_flags( mask::RX_DR ).await?;

            warning!(self, "Discarded RX FIFO with payload width {=u8}", width);

            return Ok( Some( Err( Error::ProtocolViolation( width ) ) ) );
        }

        let payload = self.read_payload( width ).await?;

        info!(self, "Received {=u8} bytes", width);

        Ok( Some( Ok( payload ) ) )
    }
}
