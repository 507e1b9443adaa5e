//! Memory interfaces.

/// The CPU's view of the address space.
///
/// Reads and writes go through whatever paging the machine currently has
/// selected, exactly as an instruction would see them.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Size of one RAM bank in bytes (16K, the Spectrum paging granularity).
pub const BANK_SIZE: usize = 0x4000;

/// Physical RAM banks, independent of the current paging.
///
/// Bank contents are addressed by offset within the bank. Callers holding
/// a full 16-bit address mask it with `BANK_SIZE - 1` first, which is what
/// [`peek_bank`](Self::peek_bank) and [`poke_bank`](Self::poke_bank) do.
pub trait BankedMemory: Bus {
    /// Number of RAM banks fitted to the current machine.
    fn bank_count(&self) -> usize;

    /// Contents of a RAM bank, or `None` if the bank doesn't exist.
    fn bank(&self, bank: usize) -> Option<&[u8]>;

    /// Mutable contents of a RAM bank, or `None` if the bank doesn't exist.
    fn bank_mut(&mut self, bank: usize) -> Option<&mut [u8]>;

    /// Read a byte from a bank. The address is masked to the bank window.
    fn peek_bank(&self, bank: usize, address: u16) -> Option<u8> {
        let offset = usize::from(address) & (BANK_SIZE - 1);
        self.bank(bank)?.get(offset).copied()
    }

    /// Write a byte into a bank. The address is masked to the bank window.
    ///
    /// Returns `false` if the bank doesn't exist.
    fn poke_bank(&mut self, bank: usize, address: u16, value: u8) -> bool {
        let offset = usize::from(address) & (BANK_SIZE - 1);
        match self.bank_mut(bank).and_then(|b| b.get_mut(offset)) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two banks, bank 1 paged in at $C000, nothing else mapped.
    struct TwoBanks {
        ram: [Vec<u8>; 2],
    }

    impl TwoBanks {
        fn new() -> Self {
            Self {
                ram: [vec![0; BANK_SIZE], vec![0; BANK_SIZE]],
            }
        }
    }

    impl Bus for TwoBanks {
        fn read(&mut self, address: u16) -> u8 {
            if address >= 0xC000 {
                self.ram[1][usize::from(address - 0xC000)]
            } else {
                0xFF
            }
        }

        fn write(&mut self, address: u16, value: u8) {
            if address >= 0xC000 {
                self.ram[1][usize::from(address - 0xC000)] = value;
            }
        }
    }

    impl BankedMemory for TwoBanks {
        fn bank_count(&self) -> usize {
            self.ram.len()
        }

        fn bank(&self, bank: usize) -> Option<&[u8]> {
            self.ram.get(bank).map(Vec::as_slice)
        }

        fn bank_mut(&mut self, bank: usize) -> Option<&mut [u8]> {
            self.ram.get_mut(bank).map(Vec::as_mut_slice)
        }
    }

    #[test]
    fn poke_bank_masks_address_to_window() {
        let mut mem = TwoBanks::new();
        assert!(mem.poke_bank(1, 0xC123, 0x5A));
        assert_eq!(mem.ram[1][0x0123], 0x5A);
        assert_eq!(mem.peek_bank(1, 0x0123), Some(0x5A));
    }

    #[test]
    fn banked_write_visible_through_bus() {
        let mut mem = TwoBanks::new();
        mem.poke_bank(1, 0x0010, 0x77);
        assert_eq!(mem.read(0xC010), 0x77);
    }

    #[test]
    fn missing_bank_is_rejected() {
        let mut mem = TwoBanks::new();
        assert!(!mem.poke_bank(7, 0x0000, 1));
        assert_eq!(mem.peek_bank(7, 0x0000), None);
    }
}
