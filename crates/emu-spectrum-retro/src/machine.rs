//! Spectrum machine catalog.
//!
//! The order of [`MACHINES`] is the order of the choices offered by the
//! `fuse_machine` option, so an option index is a catalog index.

use serde::Serialize;

/// Machines the emulation core can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MachineId {
    // Sinclair / Amstrad
    Spectrum16K,
    Spectrum48K,
    Spectrum48KNtsc,
    Spectrum128K,
    SpectrumPlus2,
    SpectrumPlus2A,
    SpectrumPlus3,
    SpectrumPlus3E,
    SpectrumSE,
    // Timex
    TimexTC2048,
    TimexTC2068,
    TimexTS2068,
    // Russian clones
    Pentagon128,
    Pentagon512,
    Pentagon1024,
    ScorpionZS256,
}

/// One entry of the machine catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MachineDescriptor {
    pub id: MachineId,
    /// Display name, as offered by the machine option.
    pub name: &'static str,
    /// Identifier the emulation core uses to select the machine.
    pub core_id: &'static str,
    /// Timex-style SCLD video: double-width frames.
    pub is_timex: bool,
    /// RAM size class in KiB, used for fixed-size save states.
    pub ram_kb: usize,
}

impl MachineDescriptor {
    /// 60 Hz machines. Everything else runs a 50 Hz PAL frame.
    #[must_use]
    pub const fn is_ntsc(&self) -> bool {
        matches!(self.id, MachineId::Spectrum48KNtsc | MachineId::TimexTS2068)
    }

    /// Native frame rate in Hz.
    #[must_use]
    pub const fn frame_rate(&self) -> u32 {
        if self.is_ntsc() { 60 } else { 50 }
    }

    /// Save-state length when save states are padded to a fixed size.
    ///
    /// Twice the RAM size class: always enough for an SZX encoding of the
    /// machine, including its compressed RAM pages.
    #[must_use]
    pub const fn fixed_snapshot_size(&self) -> usize {
        2 * self.ram_kb * 1024
    }
}

const fn machine(
    id: MachineId,
    name: &'static str,
    core_id: &'static str,
    is_timex: bool,
    ram_kb: usize,
) -> MachineDescriptor {
    MachineDescriptor {
        id,
        name,
        core_id,
        is_timex,
        ram_kb,
    }
}

/// Machine catalog, in option order.
pub static MACHINES: [MachineDescriptor; 16] = [
    machine(MachineId::Spectrum48K, "Spectrum 48K", "48", false, 64),
    machine(MachineId::Spectrum48KNtsc, "Spectrum 48K (NTSC)", "48_ntsc", false, 64),
    machine(MachineId::Spectrum128K, "Spectrum 128K", "128", false, 128),
    machine(MachineId::SpectrumPlus2, "Spectrum +2", "plus2", false, 128),
    machine(MachineId::SpectrumPlus2A, "Spectrum +2A", "plus2a", false, 128),
    machine(MachineId::SpectrumPlus3, "Spectrum +3", "plus3", false, 128),
    machine(MachineId::SpectrumPlus3E, "Spectrum +3e", "plus3e", false, 128),
    machine(MachineId::SpectrumSE, "Spectrum SE", "se", true, 128),
    machine(MachineId::TimexTC2048, "Timex TC2048", "2048", true, 64),
    machine(MachineId::TimexTC2068, "Timex TC2068", "2068", true, 128),
    machine(MachineId::TimexTS2068, "Timex TS2068", "ts2068", true, 128),
    machine(MachineId::Spectrum16K, "Spectrum 16K", "16", false, 64),
    // The clones below need extra ROMs in the core's system directory.
    machine(MachineId::Pentagon128, "Pentagon 128K", "pentagon", false, 128),
    machine(MachineId::Pentagon512, "Pentagon 512K", "pentagon512", false, 512),
    machine(MachineId::Pentagon1024, "Pentagon 1024", "pentagon1024", false, 1024),
    machine(MachineId::ScorpionZS256, "Scorpion 256K", "scorpion", false, 256),
];

/// Catalog index of the TS2068, forced when a `.dck` cartridge is loaded.
pub const TS2068_INDEX: usize = 10;

/// Catalog entry at `index`, falling back to the first machine.
#[must_use]
pub fn by_index(index: usize) -> &'static MachineDescriptor {
    MACHINES.get(index).unwrap_or(&MACHINES[0])
}

/// Catalog entry for a machine id.
#[must_use]
pub fn by_id(id: MachineId) -> &'static MachineDescriptor {
    MACHINES.iter().find(|m| m.id == id).unwrap_or(&MACHINES[0])
}

/// Display names in catalog order, for the machine option's choices.
#[must_use]
pub fn names() -> [&'static str; 16] {
    let mut names = [""; 16];
    for (slot, m) in names.iter_mut().zip(MACHINES.iter()) {
        *slot = m.name;
    }
    names
}
