//! The $7FFD paging control byte.
//!
//! ```text
//! bit  7 6 | 5       | 4   | 3      | 2 1 0
//!      ----+---------+-----+--------+------
//!      n/u | disable | ROM | screen | bank
//! ```
//!
//! Every byte value decodes; bits 6-7 are ignored.

use crate::bank_store::BankId;
use crate::rom::RomSelect;

/// Canonical address of the paging port.
pub const PAGING_PORT: u16 = 0x7FFD;

/// The 128K decodes the paging port on A15 and A1 only, so any port with
/// both lines low reaches it.
#[must_use]
pub const fn is_paging_port(port: u16) -> bool {
    port & 0x8002 == 0
}

/// Which bank occupies the screen window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScreenSelect {
    /// Bank 5.
    #[default]
    Normal,
    /// Bank 7.
    Shadow,
}

impl ScreenSelect {
    #[must_use]
    pub const fn from_bit(set: bool) -> Self {
        if set { ScreenSelect::Shadow } else { ScreenSelect::Normal }
    }

    /// The physical bank holding this screen.
    #[must_use]
    pub const fn bank(self) -> BankId {
        match self {
            ScreenSelect::Normal => BankId::NORMAL_SCREEN,
            ScreenSelect::Shadow => BankId::SHADOW_SCREEN,
        }
    }
}

/// A decoded control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingControl {
    pub bank: BankId,
    pub screen: ScreenSelect,
    pub rom: RomSelect,
    /// Bit 5: lock paging until reset.
    pub disable: bool,
}

impl PagingControl {
    #[must_use]
    pub const fn decode(value: u8) -> Self {
        Self {
            bank: BankId::from_bits(value),
            screen: ScreenSelect::from_bit(value & 0x08 != 0),
            rom: RomSelect::from_bit(value & 0x10 != 0),
            disable: value & 0x20 != 0,
        }
    }

    /// Encode back to a byte (bits 6-7 clear).
    #[must_use]
    pub fn encode(self) -> u8 {
        let mut value = u8::from(self.bank);
        if self.screen == ScreenSelect::Shadow {
            value |= 0x08;
        }
        if self.rom == RomSelect::Basic {
            value |= 0x10;
        }
        if self.disable {
            value |= 0x20;
        }
        value
    }
}

impl From<u8> for PagingControl {
    fn from(value: u8) -> Self {
        Self::decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_fields() {
        let c = PagingControl::decode(0b0011_1110);
        assert_eq!(c.bank.index(), 6);
        assert_eq!(c.screen, ScreenSelect::Shadow);
        assert_eq!(c.rom, RomSelect::Basic);
        assert!(c.disable);

        let c = PagingControl::decode(0x00);
        assert_eq!(c, PagingControl::default());
    }

    #[test]
    fn unused_bits_ignored() {
        assert_eq!(PagingControl::decode(0xC3), PagingControl::decode(0x03));
        assert_eq!(PagingControl::decode(0xC3).encode(), 0x03);
    }

    #[test]
    fn every_byte_decodes_and_reencodes_low_six_bits() {
        for value in 0..=u8::MAX {
            assert_eq!(PagingControl::decode(value).encode(), value & 0x3F);
        }
    }

    #[test]
    fn screen_banks() {
        assert_eq!(ScreenSelect::Normal.bank(), BankId::NORMAL_SCREEN);
        assert_eq!(ScreenSelect::Shadow.bank(), BankId::SHADOW_SCREEN);
    }

    #[test]
    fn paging_port_decode() {
        assert!(is_paging_port(PAGING_PORT));
        assert!(is_paging_port(0x7FFC));
        assert!(is_paging_port(0x0000));
        assert!(!is_paging_port(0xFFFD)); // AY register select
        assert!(!is_paging_port(0xBFFD)); // AY data
        assert!(!is_paging_port(0x7FFE)); // A1 high
        assert!(!is_paging_port(0x00FE)); // ULA
    }
}
