//! 128K Spectrum memory.
//!
//! Layout:
//! - $0000-$3FFF: ROM 0 or 1 (read-only)
//! - $4000-$7FFF: screen bank, 5 or 7
//! - $8000-$BFFF: bank 2
//! - $C000-$FFFF: any bank 0-7
//!
//! [`Memory128K`] owns the address space, the bank store and the ROMs.
//! The CPU reaches it through the byte/word primitives (or `emu_core::Bus`),
//! the renderer through [`Memory128K::screen`], and loaders through
//! [`Memory128K::load`] and [`Memory128K::load_bank`]. Paging lives in
//! `paging.rs`.

use std::fmt;

use emu_core::{Bus, Observable, Value, parse_address};

use crate::address_space::{AddressSpace, Page, WINDOW_SIZE, Window, WriteOutcome};
use crate::bank_store::{BankId, BankStore};
use crate::config::MemoryConfig;
use crate::control::ScreenSelect;
use crate::error::{MemoryError, Result};
use crate::paging::PagingState;
use crate::rom::{RomSelect, RomSet};

/// 128K Spectrum memory: 2×16K ROM + 8×16K RAM behind a 64K window.
pub struct Memory128K {
    pub(crate) space: AddressSpace,
    pub(crate) banks: BankStore,
    pub(crate) roms: RomSet,
    pub(crate) state: PagingState,
}

impl Memory128K {
    /// Create a 128K memory from a 32K ROM image, in the power-up mapping.
    pub fn new(config: &MemoryConfig) -> Result<Self> {
        Ok(Self::with_roms(RomSet::from_combined(&config.rom)?))
    }

    /// Create a 128K memory from already validated ROM images.
    #[must_use]
    pub fn with_roms(roms: RomSet) -> Self {
        let mut memory = Self {
            space: AddressSpace::new(),
            banks: BankStore::new(),
            roms,
            state: PagingState::default(),
        };
        memory.switch_rom(RomSelect::Editor);
        memory
    }

    #[must_use]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.space.read_byte(addr)
    }

    #[must_use]
    pub fn read_signed_byte(&self, addr: u16) -> i8 {
        self.space.read_signed_byte(addr)
    }

    /// Write a byte. Writes to the ROM window are dropped.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> WriteOutcome {
        self.space.write_byte(addr, value)
    }

    /// Little-endian word read; $FFFF takes its high byte from $0000.
    #[must_use]
    pub fn read_word(&self, addr: u16) -> u16 {
        self.space.read_word(addr)
    }

    /// Little-endian word write; a word crossing a window boundary is
    /// written byte by byte with each byte's own write protection.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.space.write_word(addr, value);
    }

    /// [`read_byte`](Self::read_byte) for callers holding a wider address.
    pub fn checked_read_byte(&self, addr: usize) -> Result<u8> {
        Ok(self.read_byte(to_address(addr)?))
    }

    pub fn checked_write_byte(&mut self, addr: usize, value: u8) -> Result<WriteOutcome> {
        Ok(self.write_byte(to_address(addr)?, value))
    }

    pub fn checked_read_word(&self, addr: usize) -> Result<u16> {
        Ok(self.read_word(to_address(addr)?))
    }

    pub fn checked_write_word(&mut self, addr: usize, value: u16) -> Result<()> {
        self.write_word(to_address(addr)?, value);
        Ok(())
    }

    /// Copy `data` into the address space at `start`, ignoring write
    /// protection and paging.
    pub fn load(&mut self, start: u16, data: &[u8]) -> Result<()> {
        self.space.load(start, data)
    }

    /// Copy `data` into a bank store slot at `offset`.
    ///
    /// This writes the store, not a window. A bank that is live in a window
    /// (bank 2, the screen bank, the bank at $C000) is overwritten from that
    /// window when it is paged out; load those through [`load`] instead.
    ///
    /// [`load`]: Memory128K::load
    pub fn load_bank(&mut self, bank: BankId, offset: usize, data: &[u8]) -> Result<()> {
        self.banks.load(bank, offset, data)
    }

    #[must_use]
    pub fn state(&self) -> PagingState {
        self.state
    }

    #[must_use]
    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    #[must_use]
    pub fn window(&self, window: Window) -> &Page {
        self.space.window(window)
    }

    /// The displayed screen: the page at $4000.
    #[must_use]
    pub fn screen(&self) -> &Page {
        self.space.window(Window::Screen)
    }

    /// Which bank is displayed (5 or 7).
    #[must_use]
    pub fn screen_bank(&self) -> BankId {
        self.state.current_screen.bank()
    }

    /// A bank store slot as last written back. See [`bank_snapshot`]
    /// for the live content.
    ///
    /// [`bank_snapshot`]: Memory128K::bank_snapshot
    #[must_use]
    pub fn bank(&self, bank: BankId) -> &Page {
        self.banks.bank(bank)
    }

    #[must_use]
    pub fn is_writable(&self, window: Window) -> bool {
        self.space.is_writable(window)
    }

    pub fn set_writable(&mut self, window: Window, writable: bool) {
        self.space.set_writable(window, writable);
    }
}

fn to_address(addr: usize) -> Result<u16> {
    u16::try_from(addr).map_err(|_| MemoryError::OutOfRange { addr })
}

impl fmt::Debug for Memory128K {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory128K")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Bus for Memory128K {
    fn read(&mut self, address: u16) -> u8 {
        self.read_byte(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.write_byte(address, value);
    }

    fn read_word(&mut self, address: u16) -> u16 {
        Memory128K::read_word(self, address)
    }

    fn write_word(&mut self, address: u16, value: u16) {
        Memory128K::write_word(self, address, value);
    }

    fn io_write(&mut self, port: u16, value: u8) {
        self.port_write(port, value);
    }
}

impl Observable for Memory128K {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("paging.") {
            let state = self.state;
            match rest {
                "bank" => Some(u8::from(state.current_bank).into()),
                "screen" => Some(u8::from(state.current_screen == ScreenSelect::Shadow).into()),
                "rom" => Some((state.current_rom.index() as u8).into()),
                "enabled" => Some(state.paging_enabled.into()),
                "control" => Some(state.control_byte().into()),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("window.") {
            let index = rest.strip_suffix(".writable")?.parse().ok()?;
            Window::from_index(index).map(|w| Value::Bool(self.is_writable(w)))
        } else if let Some(rest) = path.strip_prefix("bank.") {
            let (bank, offset) = rest.split_once('.')?;
            let bank = BankId::new(bank.parse().ok()?).ok()?;
            let offset = usize::from(parse_address(offset)?);
            (offset < WINDOW_SIZE).then(|| Value::U8(self.bank_snapshot(bank)[offset]))
        } else if let Some(rest) = path.strip_prefix("word.") {
            parse_address(rest).map(|a| self.read_word(a).into())
        } else if let Some(rest) = path.strip_prefix("memory.") {
            match rest.split_once("..") {
                Some((start, end)) => {
                    let start = usize::from(parse_address(start)?);
                    let end = usize::from(parse_address(end)?);
                    let bytes = self.space.as_slice().get(start..end)?;
                    Some(Value::Bytes(bytes.to_vec()))
                }
                None => parse_address(rest).map(|a| Value::U8(self.read_byte(a))),
            }
        } else {
            None
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "paging.bank",
            "paging.screen",
            "paging.rom",
            "paging.enabled",
            "paging.control",
            "window.<n>.writable",
            "bank.<n>.<offset>",
            "word.<address>",
            "memory.<address>",
            "memory.<start>..<end>",
        ]
    }
}
