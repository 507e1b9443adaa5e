//! Content handed over by the host and what it turns out to be.
//!
//! Identification itself belongs to the emulation core; this module only
//! names the results and holds the special-case rules applied before the
//! content is opened.

use serde::Serialize;

use crate::machine::{MachineDescriptor, MachineId};

/// File types the emulation core can identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    // Recordings
    Rzx,
    // Snapshots
    Sna,
    Z80,
    Sp,
    Snp,
    Zxs,
    Szx,
    // Tapes
    Tap,
    Warajevo,
    Tzx,
    Csw,
    Z80Em,
    Wav,
    Spc,
    Sta,
    Ltp,
    Pzx,
    // Disks
    Scl,
    Trd,
    Dsk,
    CpcDsk,
    ExtendedCpcDsk,
    // Cartridges
    Dck,
}

/// Broad content class, which decides how content is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentClass {
    Recording,
    Snapshot,
    Tape,
    /// +3 (and CPC-format) disk images.
    DiskPlus3,
    /// Beta 128 / TR-DOS disk images.
    DiskTrDos,
    /// Timex dock cartridges.
    CartridgeTimex,
}

impl ContentType {
    /// Extension the emulation core expects for this type, dot included.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Rzx => ".rzx",
            Self::Sna => ".sna",
            Self::Z80 => ".z80",
            Self::Sp => ".sp",
            Self::Snp => ".snp",
            Self::Zxs => ".zxs",
            Self::Szx => ".szx",
            Self::Tap | Self::Warajevo => ".tap",
            Self::Tzx => ".tzx",
            Self::Csw => ".csw",
            Self::Z80Em => ".raw",
            Self::Wav => ".wav",
            Self::Spc => ".spc",
            Self::Sta => ".sta",
            Self::Ltp => ".ltp",
            Self::Pzx => ".pzx",
            Self::Scl => ".scl",
            Self::Trd => ".trd",
            Self::Dsk | Self::CpcDsk | Self::ExtendedCpcDsk => ".dsk",
            Self::Dck => ".dck",
        }
    }

    #[must_use]
    pub const fn class(self) -> ContentClass {
        match self {
            Self::Rzx => ContentClass::Recording,
            Self::Sna | Self::Z80 | Self::Sp | Self::Snp | Self::Zxs | Self::Szx => {
                ContentClass::Snapshot
            }
            Self::Tap
            | Self::Warajevo
            | Self::Tzx
            | Self::Csw
            | Self::Z80Em
            | Self::Wav
            | Self::Spc
            | Self::Sta
            | Self::Ltp
            | Self::Pzx => ContentClass::Tape,
            Self::Dsk | Self::CpcDsk | Self::ExtendedCpcDsk => ContentClass::DiskPlus3,
            Self::Scl | Self::Trd => ContentClass::DiskTrDos,
            Self::Dck => ContentClass::CartridgeTimex,
        }
    }

    /// Name under which the content is opened: `*` plus the extension.
    #[must_use]
    pub fn open_name(self) -> String {
        format!("*{}", self.extension())
    }
}

/// Identified content, ready to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentInfo {
    pub kind: ContentType,
    pub class: ContentClass,
}

impl ContentInfo {
    #[must_use]
    pub const fn new(kind: ContentType) -> Self {
        Self {
            kind,
            class: kind.class(),
        }
    }

    /// What unidentifiable content is treated as. TR-DOS images have no
    /// signature, so they would never load otherwise.
    pub const FALLBACK: Self = Self::new(ContentType::Trd);
}

/// Content as supplied by the host.
#[derive(Debug, Clone, Copy)]
pub struct Content<'a> {
    /// Original path or name, used for the extension checks only.
    pub path: Option<&'a str>,
    pub data: &'a [u8],
}

impl Content<'_> {
    /// Dock cartridges are recognised by extension and force the TS2068.
    #[must_use]
    pub fn is_dock_cartridge(&self) -> bool {
        !self.data.is_empty()
            && self
                .path
                .and_then(|p| p.rsplit_once('.'))
                .is_some_and(|(_, ext)| ext == "dck")
    }
}

/// Offset of the track count in a +3 DSK disk information block.
const DSK_TRACK_COUNT: usize = 0x30;

/// Whether a +3 disk image has more tracks than the stock 40-track drive.
#[must_use]
pub fn needs_80_track_drive(info: &ContentInfo, data: &[u8]) -> bool {
    info.class == ContentClass::DiskPlus3 && data.get(DSK_TRACK_COUNT).is_some_and(|&t| t > 40)
}

/// Whether to auto-load after opening. The Scorpion's ROM can't
/// auto-load tapes.
#[must_use]
pub fn autoload_for(machine: &MachineDescriptor, info: &ContentInfo, auto_load: bool) -> bool {
    auto_load && !(machine.id == MachineId::ScorpionZS256 && info.class == ContentClass::Tape)
}
