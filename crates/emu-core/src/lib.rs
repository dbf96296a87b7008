//! Core traits shared by emulated components.
//!
//! Components are reached through a `Bus` and inspected through
//! `Observable`. Neither trait knows anything about a particular machine.

mod bus;
mod observable;

pub use bus::Bus;
pub use observable::{Observable, Value, parse_address};
