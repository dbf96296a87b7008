//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// The CPU core reaches memory and the I/O ports through this trait. The
/// bus decides which device answers an address and whether a write sticks.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address. Writes to read-only regions are
    /// dropped by the implementation.
    fn write(&mut self, address: u16, value: u8);

    /// Read a little-endian word. The high byte comes from `address + 1`,
    /// wrapping from $FFFF to $0000 like the 16-bit address bus does.
    fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Write a little-endian word as two byte writes.
    fn write_word(&mut self, address: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(address, lo);
        self.write(address.wrapping_add(1), hi);
    }

    /// Write to an I/O port. Unhandled ports are ignored.
    fn io_write(&mut self, _port: u16, _value: u8) {}
}
