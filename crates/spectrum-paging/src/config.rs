//! Memory configuration.

use crate::address_space::WINDOW_SIZE;

/// Configuration for creating a [`Memory128K`](crate::Memory128K).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryConfig {
    /// 32K ROM: ROM 0 (editor) at offset 0, ROM 1 (48K BASIC) at $4000.
    pub rom: Vec<u8>,
}

impl MemoryConfig {
    /// Join two 16K images into the 32K layout. Sizes are checked when the
    /// memory is built.
    #[must_use]
    pub fn from_images(rom0: &[u8], rom1: &[u8]) -> Self {
        let mut rom = Vec::with_capacity(2 * WINDOW_SIZE);
        rom.extend_from_slice(rom0);
        rom.extend_from_slice(rom1);
        Self { rom }
    }
}
