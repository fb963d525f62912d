//! Bus transactions with NRF24L01(+) devices.
//! Every frame is `[command, data...]` on MOSI and `[status, response...]` on
//! MISO, full duplex and of the same length.



use embassy_sync::blocking_mutex::raw::RawMutex;

use embedded_hal::digital::OutputPin;

use embedded_hal_async::{
    delay::DelayNs,
    spi::SpiDevice,
};

use crate::{
    common::*,
    pipe::{ Payload, MAX_PAYLOAD },

    Bus, Device, Error, HardwareError,
};



/// Merges `value` into `current`, only the bits in `mask` are modified.
pub const fn merge(current: u8, mask: u8, value: u8) -> u8 {
    (current & !mask) | (value & mask)
}



/// Response to a register read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Response {
    /// STATUS register shifted out with the command byte.
    status: Status,

    /// Number of valid bytes.
    len: usize,

    /// Register content.
    data: [u8; Register::MAX_WIDTH],
}

impl Response {
    /// STATUS register at the time of the read.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Register content, excluding the status byte.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// First byte of the register content.
    pub fn byte(&self) -> u8 {
        self.data[0]
    }
}



impl<SPI: SpiDevice, CE: OutputPin> Bus<SPI, CE> {
    /// Performs one full duplex transfer. The buffer is replaced by the response.
    pub(crate) async fn transfer(&mut self, buf: &mut [u8]) -> Result<Status, HardwareError<SPI::Error, CE::Error>> {
        if let Err( e ) = self.spi.transfer_in_place(buf).await {
            return Err( HardwareError::Serial( e ) );
        }

        Ok( Status::from_bits( buf[0] ) )
    }

    /// Drives the CE pin.
    pub(crate) fn chip_enable(&mut self, high: bool) -> Result<(), HardwareError<SPI::Error, CE::Error>> {
        let result = match high {
            true => self.ce.set_high(),
            _ => self.ce.set_low(),
        };

        result.map_err( HardwareError::ChipEnable )
    }
}



/// Basic methods for interacting with the NRF24 device.
/// Reading and writing registers and commands through SPI.
impl<M: RawMutex, SPI: SpiDevice, CE: OutputPin, D: DelayNs + Clone> Device<M, SPI, CE, D> {
    /// Low level function to perform one transaction on the locked bus.
    pub(crate) async fn transfer(&self, buf: &mut [u8]) -> Result<Status, Error<SPI::Error, CE::Error>> {
        let mut bus = self.bus.lock().await;

        Ok( bus.transfer(buf).await? )
    }

    /// Reads a register.
    pub(crate) async fn read(&self, register: Register) -> Result<Response, Error<SPI::Error, CE::Error>> {
        let mut bus = self.bus.lock().await;

        let response = read(&mut *bus, register).await?;

        debug!(self, "Reading register {=u8:#x}: {=[u8]:b}", register.address(), response.bytes());

        Ok( response )
    }

    /// Writes the bits of `value` selected by `mask` to a register.
    /// The other bits keep their current value. For multi byte registers the
    /// mask applies to the first byte.
    pub(crate) async fn write(&self, register: Register, mask: u8, value: u8) -> Result<(), Error<SPI::Error, CE::Error>> {
        // Hold the bus for both halves of the read-modify-write.
        let mut bus = self.bus.lock().await;

        // Get the current register values.
        let current = read(&mut *bus, register).await?;

        // Create the command buffer.
        let width = register.width();
        let mut buf = [0u8; Register::MAX_WIDTH + 1];

        buf[0] = WRITE_FLAG | register.address();
        buf[1..=width].copy_from_slice( current.bytes() );
        buf[1] = merge( current.byte(), mask, value );

        debug!(self, "Writing register {=u8:#x}: {=[u8]:b}", register.address(), &buf[1..=width]);

        bus.transfer( &mut buf[..=width] ).await?;

        Ok( () )
    }

    /// Clears the given STATUS flags.
    /// The flags are write 1 to clear, only the bits in `flags` are written.
    pub async fn clear_flags(&self, flags: u8) -> Result<(), Error<SPI::Error, CE::Error>> {
        let mut buf = [WRITE_FLAG | Register::Status.address(), flags & (mask::RX_DR | mask::TX_DS | mask::MAX_RT)];

        self.transfer( &mut buf ).await?;

        Ok( () )
    }

    /// Reads the device's STATUS register with a NOP.
    pub async fn status(&self) -> Result<Status, Error<SPI::Error, CE::Error>> {
        let mut buf = [Command::NOP as u8];

        self.transfer( &mut buf ).await
    }

    /// Flushes the device's TX FIFO.
    pub async fn flush_tx(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        info!(self, "Flushing TX FIFO");

        self.transfer( &mut [Command::FlushTX as u8] ).await?;

        Ok( () )
    }

    /// Flushes the device's RX FIFO.
    pub async fn flush_rx(&self) -> Result<(), Error<SPI::Error, CE::Error>> {
        info!(self, "Flushing RX FIFO");

        self.transfer( &mut [Command::FlushRX as u8] ).await?;

        Ok( () )
    }

    /// Reads the payload width of the top level RX FIFO packet.
    pub async fn payload_width(&self) -> Result<u8, Error<SPI::Error, CE::Error>> {
        let mut buf = [Command::PayloadWidth as u8, 0];

        self.transfer( &mut buf ).await?;

        Ok( buf[1] )
    }

    /// Reads `width` bytes of the top level RX FIFO packet.
    pub(crate) async fn read_payload(&self, width: u8) -> Result<Payload, Error<SPI::Error, CE::Error>> {
        let len = (width as usize).min( MAX_PAYLOAD );

        // Create the command buffer.
        let mut buf = [0u8; MAX_PAYLOAD + 1];
        buf[0] = Command::ReadPayload as u8;

        self.transfer( &mut buf[..=len] ).await?;

        Ok( Payload::from_buffer( &buf[1..=len] ) )
    }

    /// Writes a packet to the TX FIFO.
    pub(crate) async fn write_payload(&self, data: &[u8]) -> Result<(), Error<SPI::Error, CE::Error>> {
        let len = data.len().min( MAX_PAYLOAD );

        // Create the command buffer.
        let mut buf = [0u8; MAX_PAYLOAD + 1];
        buf[0] = Command::WritePayload as u8;
        buf[1..=len].copy_from_slice( &data[..len] );

        debug!(self, "Writing to TX FIFO: {=[u8]:b}", &buf[..=len]);

        self.transfer( &mut buf[..=len] ).await?;

        Ok( () )
    }
}



/// Reads a register on an already locked bus.
async fn read<SPI: SpiDevice, CE: OutputPin>(bus: &mut Bus<SPI, CE>, register: Register) -> Result<Response, HardwareError<SPI::Error, CE::Error>> {
    let width = register.width();

    // Create the command buffer.
    let mut buf = [0u8; Register::MAX_WIDTH + 1];
    buf[0] = register.address();

    // Perform the transfer.
    let status = bus.transfer( &mut buf[..=width] ).await?;

    // Copy the register content, without the STATUS byte.
    let mut data = [0u8; Register::MAX_WIDTH];
    data[..width].copy_from_slice( &buf[1..=width] );

    Ok( Response { status, len: width, data } )
}
