//! The CPU-visible 64K address space.
//!
//! Four 16K windows laid end to end, plus a write-permission entry per
//! window. Everything the CPU, the renderer, or the loader sees goes
//! through here; paging only changes what bytes sit in each window.

use crate::error::{MemoryError, Result};

/// Size of one window, RAM bank, or ROM image.
pub const WINDOW_SIZE: usize = 0x4000;

/// Size of the whole address space.
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// One 16K page of memory.
pub type Page = [u8; WINDOW_SIZE];

/// Window 0 is ROM, the rest is RAM.
const POWER_UP_PERMISSIONS: [bool; 4] = [false, true, true, true];

/// One of the four 16K windows of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Window {
    /// $0000-$3FFF: the selected ROM image.
    Rom = 0,
    /// $4000-$7FFF: the selected screen bank (5 or 7).
    Screen = 1,
    /// $8000-$BFFF: always bank 2.
    Fixed = 2,
    /// $C000-$FFFF: any of the eight banks.
    Paged = 3,
}

impl Window {
    pub const ALL: [Window; 4] = [Window::Rom, Window::Screen, Window::Fixed, Window::Paged];

    /// The window containing `addr`.
    #[must_use]
    pub const fn of(addr: u16) -> Self {
        match addr >> 14 {
            0 => Window::Rom,
            1 => Window::Screen,
            2 => Window::Fixed,
            _ => Window::Paged,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// First address of the window.
    #[must_use]
    pub const fn base(self) -> u16 {
        (self as u16) << 14
    }
}

/// Result of a byte write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The target window is read-only; the byte was dropped.
    Ignored,
}

impl WriteOutcome {
    #[must_use]
    pub const fn is_written(self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}

/// Flat 64K address space with per-window write protection.
pub struct AddressSpace {
    pages: Box<[Page; 4]>,
    writable: [bool; 4],
}

impl AddressSpace {
    /// Zero-filled space with the power-up permission table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Box::new([[0; WINDOW_SIZE]; 4]),
            writable: POWER_UP_PERMISSIONS,
        }
    }

    #[must_use]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.pages[Window::of(addr).index()][offset(addr)]
    }

    /// Two's-complement view of the byte at `addr` (relative jump operands).
    #[must_use]
    pub fn read_signed_byte(&self, addr: u16) -> i8 {
        self.read_byte(addr) as i8
    }

    /// Write a byte unless the window is read-only.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> WriteOutcome {
        let window = Window::of(addr);
        if !self.writable[window.index()] {
            log::trace!("write of {value:#04X} to read-only ${addr:04X} ignored");
            return WriteOutcome::Ignored;
        }
        self.pages[window.index()][offset(addr)] = value;
        WriteOutcome::Written
    }

    /// Little-endian word read. At $FFFF the high byte comes from $0000.
    #[must_use]
    pub fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian word write.
    ///
    /// A word starting on the last byte of a window is split into two byte
    /// writes, each checked against its own window. Any other word lies in
    /// a single window and is stored whole if that window is writable.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        if offset(addr) == WINDOW_SIZE - 1 {
            self.write_byte(addr, lo);
            self.write_byte(addr.wrapping_add(1), hi);
            return;
        }

        let window = Window::of(addr);
        if !self.writable[window.index()] {
            log::trace!("word write of {value:#06X} to read-only ${addr:04X} ignored");
            return;
        }
        let start = offset(addr);
        self.pages[window.index()][start..start + 2].copy_from_slice(&[lo, hi]);
    }

    /// Copy `data` into the space starting at `start`, ignoring write
    /// protection. Used by loaders installing trusted state.
    pub fn load(&mut self, start: u16, data: &[u8]) -> Result<()> {
        let start = usize::from(start);
        let end = start + data.len();
        if end > ADDRESS_SPACE_SIZE {
            return Err(MemoryError::LoadOverflow {
                offset: start,
                len: data.len(),
                limit: ADDRESS_SPACE_SIZE,
            });
        }
        self.pages.as_flattened_mut()[start..end].copy_from_slice(data);
        Ok(())
    }

    #[must_use]
    pub fn is_writable(&self, window: Window) -> bool {
        self.writable[window.index()]
    }

    pub fn set_writable(&mut self, window: Window, writable: bool) {
        self.writable[window.index()] = writable;
    }

    pub(crate) fn reset_permissions(&mut self) {
        self.writable = POWER_UP_PERMISSIONS;
    }

    /// Read-only view of one window.
    #[must_use]
    pub fn window(&self, window: Window) -> &Page {
        &self.pages[window.index()]
    }

    pub(crate) fn window_mut(&mut self, window: Window) -> &mut Page {
        &mut self.pages[window.index()]
    }

    /// The whole 64K as one slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.pages.as_flattened()
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset of `addr` within its window.
const fn offset(addr: u16) -> usize {
    (addr as usize) & (WINDOW_SIZE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_of_address() {
        assert_eq!(Window::of(0x0000), Window::Rom);
        assert_eq!(Window::of(0x3FFF), Window::Rom);
        assert_eq!(Window::of(0x4000), Window::Screen);
        assert_eq!(Window::of(0xBFFF), Window::Fixed);
        assert_eq!(Window::of(0xC000), Window::Paged);
        assert_eq!(Window::of(0xFFFF), Window::Paged);
        assert_eq!(Window::Paged.base(), 0xC000);
        assert_eq!(Window::from_index(4), None);
    }

    #[test]
    fn rom_window_rejects_writes() {
        let mut space = AddressSpace::new();
        for addr in [0x0000, 0x1234, 0x3FFF] {
            assert_eq!(space.write_byte(addr, 0xAA), WriteOutcome::Ignored);
            assert_eq!(space.read_byte(addr), 0x00);
        }
    }

    #[test]
    fn ram_windows_accept_writes() {
        let mut space = AddressSpace::new();
        for addr in [0x4000, 0x7FFF, 0x8000, 0xC000, 0xFFFF] {
            assert!(space.write_byte(addr, 0x5A).is_written());
            assert_eq!(space.read_byte(addr), 0x5A);
        }
    }

    #[test]
    fn signed_byte_view() {
        let mut space = AddressSpace::new();
        space.write_byte(0x8000, 0xFE);
        space.write_byte(0x8001, 0x7F);
        assert_eq!(space.read_signed_byte(0x8000), -2);
        assert_eq!(space.read_signed_byte(0x8001), 127);
    }

    #[test]
    fn word_read_wraps_at_top() {
        let mut space = AddressSpace::new();
        space.load(0x0000, &[0x12]).expect("load");
        space.write_byte(0xFFFF, 0x34);
        assert_eq!(space.read_word(0xFFFF), 0x1234);
    }

    #[test]
    fn word_read_is_little_endian() {
        let mut space = AddressSpace::new();
        space.write_byte(0x9000, 0xCD);
        space.write_byte(0x9001, 0xAB);
        assert_eq!(space.read_word(0x9000), 0xABCD);
    }

    #[test]
    fn word_write_inside_window() {
        let mut space = AddressSpace::new();
        space.write_word(0x8000, 0xBEEF);
        assert_eq!(space.read_byte(0x8000), 0xEF);
        assert_eq!(space.read_byte(0x8001), 0xBE);
    }

    #[test]
    fn word_write_into_rom_dropped() {
        let mut space = AddressSpace::new();
        space.write_word(0x1000, 0xBEEF);
        assert_eq!(space.read_word(0x1000), 0x0000);
    }

    #[test]
    fn word_write_straddling_rom_and_ram_splits() {
        let mut space = AddressSpace::new();
        // Low byte lands in ROM (dropped), high byte in RAM (kept)
        space.write_word(0x3FFF, 0xBEEF);
        assert_eq!(space.read_byte(0x3FFF), 0x00);
        assert_eq!(space.read_byte(0x4000), 0xBE);
    }

    #[test]
    fn word_write_at_top_wraps_into_rom() {
        let mut space = AddressSpace::new();
        // High byte would land at $0000 (ROM) and is dropped
        space.write_word(0xFFFF, 0xBEEF);
        assert_eq!(space.read_byte(0xFFFF), 0xEF);
        assert_eq!(space.read_byte(0x0000), 0x00);
    }

    #[test]
    fn word_write_between_ram_windows() {
        let mut space = AddressSpace::new();
        space.write_word(0xBFFF, 0x1122);
        assert_eq!(space.read_byte(0xBFFF), 0x22);
        assert_eq!(space.read_byte(0xC000), 0x11);
    }

    #[test]
    fn load_bypasses_protection() {
        let mut space = AddressSpace::new();
        space.load(0x3FFE, &[1, 2, 3, 4]).expect("load");
        assert_eq!(space.read_byte(0x3FFE), 1);
        assert_eq!(space.read_byte(0x3FFF), 2);
        assert_eq!(space.read_byte(0x4000), 3);
        assert_eq!(space.read_byte(0x4001), 4);
    }

    #[test]
    fn load_past_end_rejected() {
        let mut space = AddressSpace::new();
        let err = space.load(0xFFFF, &[1, 2]).expect_err("overflow");
        assert_eq!(
            err,
            MemoryError::LoadOverflow {
                offset: 0xFFFF,
                len: 2,
                limit: ADDRESS_SPACE_SIZE,
            }
        );
        assert_eq!(space.read_byte(0xFFFF), 0);
    }

    #[test]
    fn permission_table() {
        let mut space = AddressSpace::new();
        assert!(!space.is_writable(Window::Rom));
        assert!(space.is_writable(Window::Screen));

        space.set_writable(Window::Fixed, false);
        assert_eq!(space.write_byte(0x8000, 1), WriteOutcome::Ignored);

        space.reset_permissions();
        assert!(space.is_writable(Window::Fixed));
    }

    #[test]
    fn flat_view_matches_windows() {
        let mut space = AddressSpace::new();
        space.write_byte(0xC001, 0x99);
        assert_eq!(space.as_slice().len(), ADDRESS_SPACE_SIZE);
        assert_eq!(space.as_slice()[0xC001], 0x99);
        assert_eq!(space.window(Window::Paged)[1], 0x99);
    }
}
