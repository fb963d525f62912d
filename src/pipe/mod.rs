//! Data path of NRF24L01(+) devices.
//! Payloads are sent through the TX FIFO and drained from the RX FIFO of the
//! default data pipe.



mod rx;
mod tx;



pub use rx::*;



use core::ops::Deref;

use crate::Parameter;



/// Maximum size of a payload, in bytes.
pub const MAX_PAYLOAD: usize = 32;



/// Payload of one packet.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Payload {
    /// The amount of valid bytes in the buffer.
    len: u8,

    /// Internal buffer that contains the data of the packet.
    buf: [u8; MAX_PAYLOAD],
}

impl Payload {
    /// Creates a payload from the given data. Fails if it is longer than 32 bytes.
    pub fn new(data: &[u8]) -> Result<Self, Parameter> {
        if data.len() > MAX_PAYLOAD {
            return Err( Parameter::PayloadLength( data.len() ) );
        }

        Ok( Self::from_buffer( data ) )
    }

    /// Creates a payload from at most 32 bytes of data.
    pub(crate) fn from_buffer(data: &[u8]) -> Self {
        let len = data.len().min( MAX_PAYLOAD );

        let mut buf = [0u8; MAX_PAYLOAD];
        buf[..len].copy_from_slice( &data[..len] );

        Self { len: len as u8, buf }
    }

    /// Number of valid bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if the payload contains no data.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid bytes of the payload.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len()]
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl core::fmt::Debug for Payload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Payload").field( &self.as_slice() ).finish()
    }
}

#[cfg(feature = "log")]
impl defmt::Format for Payload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Payload({=[u8]})", self.as_slice())
    }
}
