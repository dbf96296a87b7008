//! Physical RAM: eight 16K banks.
//!
//! The store holds the content of banks that are not currently the live
//! copy in some window. Paging copies pages in and out of it.

use std::fmt;

use crate::address_space::{Page, WINDOW_SIZE};
use crate::error::{MemoryError, Result};

/// Index of a physical RAM bank (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct BankId(u8);

impl BankId {
    pub const COUNT: usize = 8;

    /// Permanently mapped at $8000.
    pub const FIXED: Self = Self(2);
    /// Normal screen, mapped at $4000 unless the shadow screen is selected.
    pub const NORMAL_SCREEN: Self = Self(5);
    /// Shadow screen.
    pub const SHADOW_SCREEN: Self = Self(7);

    pub fn new(index: usize) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            Err(MemoryError::InvalidBank(index))
        }
    }

    /// Bank selected by the low three bits of `bits`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x07)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = BankId> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for BankId {
    type Error = MemoryError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(usize::from(value))
    }
}

impl From<BankId> for u8 {
    fn from(bank: BankId) -> u8 {
        bank.0
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bank {}", self.0)
    }
}

/// Eight zero-filled 16K RAM banks.
pub struct BankStore {
    banks: [Box<Page>; BankId::COUNT],
}

impl BankStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            banks: std::array::from_fn(|_| Box::new([0u8; WINDOW_SIZE])),
        }
    }

    #[must_use]
    pub fn bank(&self, bank: BankId) -> &Page {
        &self.banks[bank.index()]
    }

    pub(crate) fn bank_mut(&mut self, bank: BankId) -> &mut Page {
        &mut self.banks[bank.index()]
    }

    /// Copy `data` into `bank` starting at `offset`.
    pub fn load(&mut self, bank: BankId, offset: usize, data: &[u8]) -> Result<()> {
        let end = offset
            .checked_add(data.len())
            .filter(|&end| end <= WINDOW_SIZE)
            .ok_or(MemoryError::LoadOverflow {
                offset,
                len: data.len(),
                limit: WINDOW_SIZE,
            })?;
        self.banks[bank.index()][offset..end].copy_from_slice(data);
        Ok(())
    }
}

impl Default for BankStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_id_range() {
        assert_eq!(BankId::new(7).map(BankId::index), Ok(7));
        assert_eq!(BankId::new(8), Err(MemoryError::InvalidBank(8)));
        assert_eq!(BankId::try_from(3u8).map(u8::from), Ok(3));
        assert_eq!(BankId::from_bits(0xFD), BankId(5));
        assert_eq!(BankId::all().count(), 8);
        assert_eq!(BankId::SHADOW_SCREEN.to_string(), "bank 7");
    }

    #[test]
    fn banks_start_zeroed() {
        let store = BankStore::new();
        for bank in BankId::all() {
            assert!(store.bank(bank).iter().all(|&b| b == 0), "{bank} not zeroed");
        }
    }

    #[test]
    fn load_into_bank() {
        let mut store = BankStore::new();
        store.load(BankId(3), 0x3FFE, &[0xAA, 0xBB]).expect("load");
        assert_eq!(store.bank(BankId(3))[0x3FFE], 0xAA);
        assert_eq!(store.bank(BankId(3))[0x3FFF], 0xBB);
        // Other banks untouched
        assert_eq!(store.bank(BankId(4))[0x3FFE], 0x00);
    }

    #[test]
    fn load_past_bank_end_rejected() {
        let mut store = BankStore::new();
        let err = store.load(BankId(0), 0x3FFF, &[1, 2]).expect_err("overflow");
        assert!(matches!(err, MemoryError::LoadOverflow { limit: WINDOW_SIZE, .. }));
        assert_eq!(store.bank(BankId(0))[0x3FFF], 0);
    }
}
