//! ZX Spectrum 128K memory paging.
//!
//! The CPU sees a flat 64K address space cut into four 16K windows. Behind
//! it sit two ROMs and eight RAM banks. Writing the $7FFD control byte
//! pages ROM 0 or 1 into $0000, the normal (bank 5) or shadow (bank 7)
//! screen into $4000, and any bank into $C000; bank 2 stays at $8000.
//! Paging copies whole pages between the windows and the bank store, so a
//! bank resident in two windows at once has one authoritative copy: the
//! fixed window.
//!
//! Bit 5 of the control byte locks paging until [`Memory128K::reset`].

mod address_space;
mod bank_store;
mod config;
mod control;
mod error;
mod memory;
mod paging;
mod rom;

pub use address_space::{ADDRESS_SPACE_SIZE, AddressSpace, Page, WINDOW_SIZE, Window, WriteOutcome};
pub use bank_store::{BankId, BankStore};
pub use config::MemoryConfig;
pub use control::{PAGING_PORT, PagingControl, ScreenSelect, is_paging_port};
pub use error::{MemoryError, Result};
pub use memory::Memory128K;
pub use paging::PagingState;
pub use rom::{RomSelect, RomSet};
