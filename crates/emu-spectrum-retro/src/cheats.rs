//! Reversible memory pokes.
//!
//! Cheat text is one or more directives separated by the two characters
//! `\n` (a backslash and an `n`, not a newline):
//!
//! ```text
//! M <bank> <address> <value> <original>
//! Z <bank> <address> <value> <original>
//! ```
//!
//! Bank 8 pokes the paged address space; any other bank pokes that RAM
//! bank directly. An `original` of 0 means "unknown": the current byte is
//! read back before writing and restored later instead. Every poke is
//! undone by [`CheatManager::reset`], most recent first.

use emu_core::BankedMemory;
use log::{info, warn};

use crate::error::DirectiveError;

/// Bank number that selects the paged address space.
pub const MAPPED_BANK: u32 = 8;

/// Where a poke lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokeTarget {
    /// A RAM bank, independent of paging. Addresses are masked to the bank.
    Ram { bank: usize, address: u16 },
    /// The address space as currently paged.
    Mapped { address: u16 },
}

impl PokeTarget {
    fn read<M: BankedMemory + ?Sized>(self, memory: &mut M) -> Option<u8> {
        match self {
            Self::Ram { bank, address } => memory.peek_bank(bank, address),
            Self::Mapped { address } => Some(memory.read(address)),
        }
    }

    fn write<M: BankedMemory + ?Sized>(self, memory: &mut M, value: u8) {
        match self {
            Self::Ram { bank, address } => {
                memory.poke_bank(bank, address, value);
            }
            Self::Mapped { address } => memory.write(address, value),
        }
    }
}

/// One applied poke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheatRecord {
    pub target: PokeTarget,
    pub value: u8,
    /// Byte written back on reset.
    pub original: u8,
}

/// Parsed form of one directive, before it touches memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    bank: u32,
    address: u32,
    value: u8,
    /// `None` when the directive gave 0.
    original: Option<u8>,
}

/// Outcome of applying cheat text.
#[derive(Debug, PartialEq, Eq)]
pub struct ApplyReport {
    /// Directives applied before the text ended or was rejected.
    pub applied: usize,
    /// Why parsing stopped early, if it did.
    pub error: Option<DirectiveError>,
}

/// Applied pokes, oldest first.
#[derive(Debug, Clone, Default)]
pub struct CheatManager {
    active: Vec<CheatRecord>,
}

impl CheatManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> &[CheatRecord] {
        &self.active
    }

    /// Parse `code` and apply each directive as it is parsed.
    pub fn apply<M: BankedMemory + ?Sized>(&mut self, index: u32, code: &str, memory: &mut M) -> ApplyReport {
        let mut rest = code;
        let mut applied = 0;
        loop {
            let directive = match parse_directive(&mut rest) {
                Ok(d) => d,
                Err(e) => {
                    warn!("Cheat #{index} stopped: {e}");
                    return ApplyReport {
                        applied,
                        error: Some(e),
                    };
                }
            };
            if let Err(e) = self.poke(directive, memory) {
                warn!("Cheat #{index} stopped: {e}");
                return ApplyReport {
                    applied,
                    error: Some(e),
                };
            }
            applied += 1;
            info!("Enabled cheat #{index}: {code}");

            match rest.strip_prefix("\\n") {
                Some(next) => rest = next,
                None => break,
            }
        }
        ApplyReport {
            applied,
            error: None,
        }
    }

    fn poke<M: BankedMemory + ?Sized>(&mut self, d: Directive, memory: &mut M) -> Result<(), DirectiveError> {
        let target = if d.bank == MAPPED_BANK {
            PokeTarget::Mapped {
                address: d.address as u16,
            }
        } else {
            let bank = d.bank as usize;
            if bank >= memory.bank_count() {
                return Err(DirectiveError::NoSuchBank(d.bank));
            }
            PokeTarget::Ram {
                bank,
                address: d.address as u16,
            }
        };

        let original = match d.original {
            Some(byte) => byte,
            None => target.read(memory).ok_or(DirectiveError::NoSuchBank(d.bank))?,
        };
        target.write(memory, d.value);
        self.active.push(CheatRecord {
            target,
            value: d.value,
            original,
        });
        Ok(())
    }

    /// Undo every poke, most recent first, and forget them.
    pub fn reset<M: BankedMemory + ?Sized>(&mut self, memory: &mut M) {
        for record in self.active.iter().rev() {
            record.target.write(memory, record.original);
        }
        self.active.clear();
    }
}

fn parse_directive(rest: &mut &str) -> Result<Directive, DirectiveError> {
    let mut chars = rest.chars();
    match chars.next() {
        Some('M' | 'Z') => *rest = chars.as_str(),
        Some(c) => return Err(DirectiveError::UnknownMarker(c)),
        None => return Err(DirectiveError::Empty),
    }

    let bank = parse_number(rest, "bank")?;
    let address = parse_number(rest, "address")?;
    let value = parse_number(rest, "value")?;
    let original = parse_number(rest, "original")?;

    let value = u8::try_from(value).map_err(|_| DirectiveError::ValueOutOfRange(value))?;
    Ok(Directive {
        bank,
        address,
        value,
        // Nonzero means "restore this", narrowed to a byte only afterwards.
        original: (original != 0).then_some(original as u8),
    })
}

/// Skip whitespace and read an unsigned decimal number.
fn parse_number(rest: &mut &str, field: &'static str) -> Result<u32, DirectiveError> {
    let trimmed = rest.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return Err(if trimmed.is_empty() || trimmed.starts_with("\\n") {
            DirectiveError::MissingField(field)
        } else {
            DirectiveError::BadNumber { field }
        });
    }
    let number = trimmed[..end]
        .parse()
        .map_err(|_| DirectiveError::BadNumber { field })?;
    *rest = &trimmed[end..];
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::{BANK_SIZE, Bus};
    use proptest::prelude::*;

    /// Eight RAM banks; bank 0 paged at $4000, bank 2 at $8000, bank 5 at
    /// $C000. The bottom 16K is ROM and ignores writes.
    #[derive(Clone)]
    struct Ram {
        banks: Vec<Vec<u8>>,
        rom: Vec<u8>,
    }

    impl Ram {
        fn new() -> Self {
            Self {
                banks: (0..8).map(|b| vec![b as u8; BANK_SIZE]).collect(),
                rom: vec![0xF3; BANK_SIZE],
            }
        }

        fn paged(address: u16) -> Option<usize> {
            match address >> 14 {
                1 => Some(0),
                2 => Some(2),
                3 => Some(5),
                _ => None,
            }
        }
    }

    impl Bus for Ram {
        fn read(&mut self, address: u16) -> u8 {
            let offset = usize::from(address) & (BANK_SIZE - 1);
            match Self::paged(address) {
                Some(bank) => self.banks[bank][offset],
                None => self.rom[offset],
            }
        }

        fn write(&mut self, address: u16, value: u8) {
            if let Some(bank) = Self::paged(address) {
                self.banks[bank][usize::from(address) & (BANK_SIZE - 1)] = value;
            }
        }
    }

    impl BankedMemory for Ram {
        fn bank_count(&self) -> usize {
            self.banks.len()
        }

        fn bank(&self, bank: usize) -> Option<&[u8]> {
            self.banks.get(bank).map(Vec::as_slice)
        }

        fn bank_mut(&mut self, bank: usize) -> Option<&mut [u8]> {
            self.banks.get_mut(bank).map(Vec::as_mut_slice)
        }
    }

    // ---- parsing ----

    #[test]
    fn parses_all_four_fields() {
        let mut text = "M 3 49152 201 7 trailing";
        let d = parse_directive(&mut text).expect("directive");
        assert_eq!(
            d,
            Directive {
                bank: 3,
                address: 49152,
                value: 201,
                original: Some(7),
            }
        );
        assert_eq!(text, " trailing");
    }

    #[test]
    fn rejects_bad_directives() {
        let cases = [
            ("X 8 1 2 3", DirectiveError::UnknownMarker('X')),
            ("", DirectiveError::Empty),
            ("M 8 1 256 0", DirectiveError::ValueOutOfRange(256)),
            ("M 8 1 2", DirectiveError::MissingField("original")),
            ("M 8 x 2 0", DirectiveError::BadNumber { field: "address" }),
            ("Z", DirectiveError::MissingField("bank")),
        ];
        for (text, expected) in cases {
            let mut rest = text;
            assert_eq!(parse_directive(&mut rest), Err(expected), "{text:?}");
        }
    }

    // ---- apply / reset ----

    #[test]
    fn ram_poke_masks_address_and_restores() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        let report = cheats.apply(0, "M 5 49162 99 0", &mut ram);
        assert_eq!(report, ApplyReport { applied: 1, error: None });
        assert_eq!(ram.banks[5][10], 99);
        assert_eq!(cheats.active()[0].original, 5);

        cheats.reset(&mut ram);
        assert_eq!(ram.banks[5][10], 5);
        assert!(cheats.active().is_empty());
    }

    #[test]
    fn mapped_poke_goes_through_paging() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        cheats.apply(1, "Z 8 32768 42 0", &mut ram);
        assert_eq!(ram.banks[2][0], 42);
        cheats.reset(&mut ram);
        assert_eq!(ram.banks[2][0], 2);
    }

    #[test]
    fn explicit_original_is_restored_verbatim() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        cheats.apply(0, "M 1 0 10 77", &mut ram);
        cheats.reset(&mut ram);
        assert_eq!(ram.banks[1][0], 77);
    }

    #[test]
    fn wide_original_is_narrowed_not_treated_as_unknown() {
        let mut text = "M 1 0 10 256";
        let d = parse_directive(&mut text).expect("directive");
        assert_eq!(d.original, Some(0));

        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        cheats.apply(0, "M 1 0 10 256", &mut ram);
        cheats.reset(&mut ram);
        assert_eq!(ram.banks[1][0], 0);
    }

    #[test]
    fn zero_original_captures_live_byte() {
        let mut ram = Ram::new();
        ram.banks[4][0x123] = 0xAB;
        let mut cheats = CheatManager::new();
        cheats.apply(0, "M 4 291 1 0", &mut ram);
        assert_eq!(cheats.active()[0].original, 0xAB);
    }

    #[test]
    fn chained_directives_restore_most_recent_first() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        let report = cheats.apply(2, "M 0 100 1 0\\nM 0 100 2 0\\nZ 8 16484 3 0", &mut ram);
        assert_eq!(report.applied, 3);
        assert_eq!(ram.banks[0][100], 3);
        assert_eq!(cheats.active()[1].original, 1);

        cheats.reset(&mut ram);
        assert_eq!(ram.banks[0][100], 0);
    }

    #[test]
    fn bad_directive_keeps_earlier_ones() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        let report = cheats.apply(0, "M 1 0 9 0\\nM 1 1 300 0\\nM 1 2 9 0", &mut ram);
        assert_eq!(report.applied, 1);
        assert_eq!(report.error, Some(DirectiveError::ValueOutOfRange(300)));
        assert_eq!(ram.banks[1][0], 9);
        assert_eq!(ram.banks[1][2], 1);
    }

    #[test]
    fn real_newline_ends_the_text() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        let report = cheats.apply(0, "M 1 0 9 0\nM 1 1 9 0", &mut ram);
        assert_eq!(report, ApplyReport { applied: 1, error: None });
        assert_eq!(ram.banks[1][1], 1);
    }

    #[test]
    fn missing_bank_is_rejected() {
        let mut ram = Ram::new();
        let mut cheats = CheatManager::new();
        let report = cheats.apply(0, "M 9 0 1 0", &mut ram);
        assert_eq!(report.error, Some(DirectiveError::NoSuchBank(9)));
        assert!(cheats.active().is_empty());
    }

    proptest! {
        #[test]
        fn reset_restores_memory(
            pokes in prop::collection::vec((0u32..9, 0u32..65536, 0u8..=255), 1..20),
            fill in any::<u8>(),
        ) {
            let mut ram = Ram::new();
            for bank in &mut ram.banks {
                bank.fill(fill);
            }
            let before = ram.clone();

            let code = pokes
                .iter()
                .map(|(bank, address, value)| format!("M {bank} {address} {value} 0"))
                .collect::<Vec<_>>()
                .join("\\n");
            let mut cheats = CheatManager::new();
            let report = cheats.apply(0, &code, &mut ram);
            prop_assert_eq!(report.applied, pokes.len());

            cheats.reset(&mut ram);
            prop_assert_eq!(ram.banks, before.banks);
        }
    }
}
