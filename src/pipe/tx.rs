//! Transmission of a single payload through the TX FIFO.



use embassy_futures::{
    join::join,
    select::{ select, Either },
};

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    signal::Signal,
};

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,

    Device, Error, Parameter, STANDBY_DELAY,
};

use super::MAX_PAYLOAD;



/// Outcome of the acknowledgement wait.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Ack {
    /// TX_DS was observed.
    Received,

    /// The deadline passed first.
    Timeout,
}



/// Transmit path of the NRF24 device.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Sends a payload of 1 to 32 bytes and waits for its acknowledgement.
    /// The wait is bounded by the retransmit timing configured in SETUP_RETR.
    /// A concurrent receive loop is held off until the send completes.
    pub async fn send(&self, data: &[u8]) -> Result<(), Error<SPI::Error, CE::Error>> {
        if data.is_empty() || (data.len() > MAX_PAYLOAD) {
            return Err( Parameter::PayloadLength( data.len() ).into() );
        }

        let _radio = self.radio.lock().await;

        // Check if there is room in the TX FIFO.
        if self.status().await?.tx_full() {
            error!(self, "Send failed: TX FIFO is full");
            return Err( Error::TxFifoFull );
        }

        // Load the FIFO and transmit.
        self.enter_transmit().await?;
        self.write_payload( data ).await?;
        self.pulse().await?;

        self.sleep_us( STANDBY_DELAY ).await;

        let timing = self.retransmit_timing().await?;

        info!(self, "Sent {=usize} bytes, waiting {=u32} us for ACK", data.len(), timing.timeout_us());

        match self.acknowledgement( timing ).await? {
            Ack::Received => {
                self.flush_rx().await?;
                self.clear_flags( mask::TX_DS ).await?;

                info!(self, "ACK received");

                Ok( () )
            },

            Ack::Timeout => {
                self.flush_tx().await?;
                self.clear_flags( mask::MAX_RT ).await?;
                self.clear_flags( mask::TX_DS ).await?;

                error!(self, "No ACK received in {=u32} us", timing.timeout_us());

                Err( Error::AckTimeout( timing.timeout ) )
            },
        }
    }

    /// Races the TX_DS poll against the retransmit deadline.
    /// Each side signals the other when it finishes. The poll only stops
    /// between two status reads.
    async fn acknowledgement(&self, timing: RetransmitTiming) -> Result<Ack, Error<SPI::Error, CE::Error>> {
        let resolved: Signal<M, ()> = Signal::new();
        let expired: Signal<M, ()> = Signal::new();

        let poller = async {
            let mut delay = self.delay.clone();

            let outcome = loop {
                match self.status().await {
                    Err( e ) => break Err( e ),
                    Ok( status ) if status.tx_ds() => break Ok( Ack::Received ),
                    _ => (),
                }

                if let Either::First( _ ) = select( expired.wait(), delay.delay_us( timing.poll_us() ) ).await {
                    break Ok( Ack::Timeout );
                }
            };

            resolved.signal( () );

            outcome
        };

        let watchdog = async {
            let mut delay = self.delay.clone();

            if let Either::Second( _ ) = select( resolved.wait(), delay.delay_us( timing.timeout_us() ) ).await {
                expired.signal( () );
            }
        };

        let (outcome, _) = join( poller, watchdog ).await;

        outcome
    }
}
