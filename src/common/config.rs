//! `enum`s used in NRF24L01(+) configuration.
//! Each variant maps to the raw field code of its register.



use core::convert::TryFrom;

use crate::Parameter;

use super::mask;



/// CRC checksum configurations of the NRF24L01(+) device.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
pub enum CRCBytes {
    /// No CRC bytes with each packet.
    None,

    /// One CRC bytes with each packet.
    One,

    /// Two CRC bytes with each packet.
    Two,
}

impl CRCBytes {
    /// Mask of the CRC fields in the CONFIG register.
    pub const MASK: u8 = mask::EN_CRC | mask::CRCO;

    /// Raw CONFIG bits of this configuration.
    pub const fn bits(self) -> u8 {
        match self {
            CRCBytes::None => 0,
            CRCBytes::One  => mask::EN_CRC,
            CRCBytes::Two  => mask::EN_CRC | mask::CRCO,
        }
    }
}

impl TryFrom<u8> for CRCBytes {
    type Error = Parameter;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0x00 => Ok( CRCBytes::None ),
            0x08 => Ok( CRCBytes::One ),
            0x0C => Ok( CRCBytes::Two ),
            _ => Err( Parameter::Crc( bits ) ),
        }
    }
}



/// RF gain configurations of NRF24L01(+) devices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
pub enum Gain {
    /// Maximum gain [0 dBm].
    Max,

    /// High gain [-6 dBm].
    High,

    /// Mid gain [-12 dBm].
    Mid,

    /// Low gain [-18 dBm].
    Low,
}

impl Gain {
    /// Mask of the RF_PWR field in the RF_SETUP register.
    pub const MASK: u8 = mask::RF_PWR;

    /// Raw RF_SETUP bits of this gain.
    pub const fn bits(self) -> u8 {
        match self {
            Gain::Max  => 0b110,
            Gain::High => 0b100,
            Gain::Mid  => 0b010,
            Gain::Low  => 0b000,
        }
    }

    /// Output power in dBm.
    pub const fn dbm(self) -> i8 {
        match self {
            Gain::Max  => 0,
            Gain::High => -6,
            Gain::Mid  => -12,
            Gain::Low  => -18,
        }
    }
}

impl TryFrom<u8> for Gain {
    type Error = Parameter;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0b110 => Ok( Gain::Max ),
            0b100 => Ok( Gain::High ),
            0b010 => Ok( Gain::Mid ),
            0b000 => Ok( Gain::Low ),
            _ => Err( Parameter::Gain( bits ) ),
        }
    }
}



/// RF data rate configurations of NRF24L01(+) devices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
pub enum DataRate {
    /// High data rate [2 Mbps].
    High,

    /// Mid data rate [1 Mbps].
    Mid,

    /// Low data rate [250 kbps].
    /// WARNING : This data rate is incompatible with NRF24L01 (non plus variant) devices.
    Low,
}

impl DataRate {
    /// Mask of the RF_DR_LOW and RF_DR_HIGH bits in the RF_SETUP register.
    pub const MASK: u8 = mask::RF_DR;

    /// Raw RF_SETUP bits of this data rate.
    pub const fn bits(self) -> u8 {
        match self {
            DataRate::High => 1 << 3,
            DataRate::Mid  => 0,
            DataRate::Low  => 1 << 5,
        }
    }

    /// Data rate in kbps.
    pub const fn kbps(self) -> u16 {
        match self {
            DataRate::High => 2000,
            DataRate::Mid  => 1000,
            DataRate::Low  => 250,
        }
    }
}

impl TryFrom<u8> for DataRate {
    type Error = Parameter;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0x08 => Ok( DataRate::High ),
            0x00 => Ok( DataRate::Mid ),
            0x20 => Ok( DataRate::Low ),
            _ => Err( Parameter::DataRate( bits ) ),
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_codes_convert_back() {
        for rate in [DataRate::High, DataRate::Mid, DataRate::Low] {
            assert_eq!(DataRate::try_from(rate.bits()), Ok(rate));
        }

        for gain in [Gain::Max, Gain::High, Gain::Mid, Gain::Low] {
            assert_eq!(Gain::try_from(gain.bits()), Ok(gain));
        }

        for crc in [CRCBytes::None, CRCBytes::One, CRCBytes::Two] {
            assert_eq!(CRCBytes::try_from(crc.bits()), Ok(crc));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(DataRate::try_from(0x28), Err(Parameter::DataRate(0x28)));
        assert_eq!(DataRate::try_from(0x01), Err(Parameter::DataRate(0x01)));
        assert_eq!(Gain::try_from(0x01), Err(Parameter::Gain(0x01)));
        assert_eq!(Gain::try_from(0x08), Err(Parameter::Gain(0x08)));
        assert_eq!(CRCBytes::try_from(0x04), Err(Parameter::Crc(0x04)));
    }

    #[test]
    fn bits_stay_inside_their_masks() {
        for rate in [DataRate::High, DataRate::Mid, DataRate::Low] {
            assert_eq!(rate.bits() & !DataRate::MASK, 0);
        }

        for gain in [Gain::Max, Gain::High, Gain::Mid, Gain::Low] {
            assert_eq!(gain.bits() & !Gain::MASK, 0);
        }

        for crc in [CRCBytes::None, CRCBytes::One, CRCBytes::Two] {
            assert_eq!(crc.bits() & !CRCBytes::MASK, 0);
        }
    }
}
