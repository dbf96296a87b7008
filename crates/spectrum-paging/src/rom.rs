//! ROM images.
//!
//! The 128K ships two 16K ROMs in one 32K chip: ROM 0 is the 128K editor
//! and menu system, ROM 1 is 48K BASIC.

use crate::address_space::{Page, WINDOW_SIZE};
use crate::error::{MemoryError, Result};

/// Which ROM occupies $0000-$3FFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RomSelect {
    /// ROM 0: 128K editor and menu.
    #[default]
    Editor = 0,
    /// ROM 1: 48K BASIC.
    Basic = 1,
}

impl RomSelect {
    #[must_use]
    pub const fn from_bit(set: bool) -> Self {
        if set { RomSelect::Basic } else { RomSelect::Editor }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The two immutable ROM images.
pub struct RomSet {
    images: [Box<Page>; 2],
}

impl RomSet {
    /// Build from two separate 16K images.
    pub fn new(rom0: &[u8], rom1: &[u8]) -> Result<Self> {
        Ok(Self {
            images: [image(rom0)?, image(rom1)?],
        })
    }

    /// Build from a single 32K image: ROM 0 first, ROM 1 at offset $4000.
    pub fn from_combined(rom: &[u8]) -> Result<Self> {
        if rom.len() != 2 * WINDOW_SIZE {
            return Err(MemoryError::InvalidRomSize {
                expected: 2 * WINDOW_SIZE,
                actual: rom.len(),
            });
        }
        let (rom0, rom1) = rom.split_at(WINDOW_SIZE);
        Self::new(rom0, rom1)
    }

    #[must_use]
    pub fn image(&self, rom: RomSelect) -> &Page {
        &self.images[rom.index()]
    }
}

fn image(data: &[u8]) -> Result<Box<Page>> {
    if data.len() != WINDOW_SIZE {
        return Err(MemoryError::InvalidRomSize {
            expected: WINDOW_SIZE,
            actual: data.len(),
        });
    }
    let mut page = Box::new([0u8; WINDOW_SIZE]);
    page.copy_from_slice(data);
    Ok(page)
}
