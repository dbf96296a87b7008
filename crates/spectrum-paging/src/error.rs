//! Errors raised by the memory subsystem.
//!
//! Writes to ROM are not errors; they are reported as
//! [`WriteOutcome::Ignored`](crate::WriteOutcome::Ignored).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("address {addr:#X} is outside the 64K address space")]
    OutOfRange { addr: usize },

    #[error("RAM bank {0} does not exist (banks are 0-7)")]
    InvalidBank(usize),

    #[error("ROM image must be exactly {expected} bytes, got {actual}")]
    InvalidRomSize { expected: usize, actual: usize },

    #[error("load of {len} bytes at offset {offset:#X} runs past the end ({limit:#X})")]
    LoadOverflow {
        offset: usize,
        len: usize,
        limit: usize,
    },
}

pub type Result<T> = std::result::Result<T, MemoryError>;
