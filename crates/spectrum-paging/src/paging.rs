//! Paging controller: the $7FFD state machine.
//!
//! A control write is handled in a fixed order: lock bit, ROM, screen,
//! then the $C000 bank. Each step is skipped when its selector is
//! unchanged, so repeating a write is a no-op.
//!
//! Swapping copies whole pages. When a bank leaves $C000 its content is
//! written back to the bank store from $C000, except for bank 2 (written
//! back from $8000) and bank 5 (written back from $4000). The fixed window
//! is taken as the source of truth even when $4000 holds the shadow screen,
//! as on the 128K this was modelled on.

use crate::address_space::{Page, Window};
use crate::bank_store::BankId;
use crate::control::{PagingControl, ScreenSelect, is_paging_port};
use crate::memory::Memory128K;
use crate::rom::RomSelect;

/// Current paging selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingState {
    /// Bank at $C000.
    pub current_bank: BankId,
    /// Screen bank at $4000.
    pub current_screen: ScreenSelect,
    /// ROM at $0000.
    pub current_rom: RomSelect,
    /// Cleared by the lock bit; only a reset sets it again.
    pub paging_enabled: bool,
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            current_bank: BankId::default(),
            current_screen: ScreenSelect::Normal,
            current_rom: RomSelect::Editor,
            paging_enabled: true,
        }
    }
}

impl PagingState {
    /// The control word that selects this state.
    #[must_use]
    pub fn control(&self) -> PagingControl {
        PagingControl {
            bank: self.current_bank,
            screen: self.current_screen,
            rom: self.current_rom,
            disable: !self.paging_enabled,
        }
    }

    /// The control word as a byte, as stored in 128K snapshots.
    #[must_use]
    pub fn control_byte(&self) -> u8 {
        self.control().encode()
    }
}

/// The window a bank leaving $C000 is written back from.
fn copy_out_window(bank: BankId) -> Window {
    if bank == BankId::FIXED {
        Window::Fixed
    } else if bank == BankId::NORMAL_SCREEN {
        Window::Screen
    } else {
        Window::Paged
    }
}

impl Memory128K {
    /// Handle a write of `value` to the paging port.
    ///
    /// Returns `false` if paging is locked and the write was dropped.
    pub fn apply_paging_byte(&mut self, value: u8) -> bool {
        if !self.state.paging_enabled {
            log::trace!("paging locked, control byte {value:#04X} ignored");
            return false;
        }

        let control = PagingControl::decode(value);
        log::debug!("paging control {value:#04X}: {control:?}");

        if control.disable {
            self.state.paging_enabled = false;
            log::debug!("paging locked until reset");
        }

        if control.rom != self.state.current_rom {
            self.switch_rom(control.rom);
            self.state.current_rom = control.rom;
        }

        if control.screen != self.state.current_screen {
            self.swap_screen(control.screen);
        }

        if control.bank != self.state.current_bank {
            self.swap_bank(control.bank);
        }

        true
    }

    /// Route an I/O write. Returns `true` if it reached the paging
    /// controller while paging was enabled.
    pub fn port_write(&mut self, port: u16, value: u8) -> bool {
        is_paging_port(port) && self.apply_paging_byte(value)
    }

    /// Copy a ROM image into $0000-$3FFF.
    ///
    /// This does not touch the paging state; [`apply_paging_byte`] and
    /// [`reset`] keep the two in step.
    ///
    /// [`apply_paging_byte`]: Memory128K::apply_paging_byte
    /// [`reset`]: Memory128K::reset
    pub fn switch_rom(&mut self, rom: RomSelect) {
        self.space
            .window_mut(Window::Rom)
            .copy_from_slice(self.roms.image(rom));
        log::debug!("ROM {} paged in", rom.index());
    }

    /// Write every live window back to its bank store slot.
    ///
    /// After this the store holds current content for all eight banks.
    /// A bank live in two windows keeps the fixed window's copy.
    pub fn sync_banks(&mut self) {
        let paged = self.state.current_bank;
        if copy_out_window(paged) == Window::Paged {
            self.store_window(Window::Paged, paged);
        }
        self.store_window(Window::Screen, self.state.current_screen.bank());
        self.store_window(Window::Fixed, BankId::FIXED);
    }

    /// Return to the power-up mapping, keeping RAM contents.
    ///
    /// Selects ROM 0, bank 5 at $4000, bank 2 at $8000 and bank 0 at
    /// $C000, clears the lock and restores the write-permission table.
    pub fn reset(&mut self) {
        self.sync_banks();
        self.state = PagingState::default();
        self.space.reset_permissions();
        self.switch_rom(RomSelect::Editor);
        self.fetch_window(BankId::NORMAL_SCREEN, Window::Screen);
        self.fetch_window(BankId::FIXED, Window::Fixed);
        self.fetch_window(self.state.current_bank, Window::Paged);
        log::debug!("memory reset to power-up mapping");
    }

    /// Current content of `bank`: its fixed window if it has one, $C000
    /// if it is paged in there, otherwise its store slot.
    #[must_use]
    pub fn bank_snapshot(&self, bank: BankId) -> &Page {
        if bank == BankId::FIXED {
            self.space.window(Window::Fixed)
        } else if bank == self.state.current_screen.bank() {
            self.space.window(Window::Screen)
        } else if bank == self.state.current_bank {
            self.space.window(Window::Paged)
        } else {
            self.banks.bank(bank)
        }
    }

    fn swap_screen(&mut self, screen: ScreenSelect) {
        let outgoing = self.state.current_screen.bank();
        let incoming = screen.bank();

        self.store_window(Window::Screen, outgoing);
        self.fetch_window(incoming, Window::Screen);
        self.state.current_screen = screen;
        log::debug!("screen {outgoing} out, {incoming} in");
    }

    fn swap_bank(&mut self, bank: BankId) {
        let outgoing = self.state.current_bank;

        self.store_window(copy_out_window(outgoing), outgoing);
        self.fetch_window(bank, Window::Paged);
        self.state.current_bank = bank;
        log::debug!("$C000: {outgoing} out, {bank} in");
    }

    fn store_window(&mut self, window: Window, bank: BankId) {
        let page = self.space.window(window);
        self.banks.bank_mut(bank).copy_from_slice(page);
    }

    fn fetch_window(&mut self, bank: BankId, window: Window) {
        let page = self.banks.bank(bank);
        self.space.window_mut(window).copy_from_slice(page);
    }
}
