//! Resolved option values.
//!
//! [`EmulatorSettings`] is handed to the emulation core as a whole;
//! [`FrontendSettings`] stays on this side and drives input, overlay and
//! save-state behaviour.

use serde::Serialize;

use crate::host::JoypadButton;
use crate::keymap::{SpectrumKey, key_for_symbol_index};
use crate::options::{self, JOYPAD_MAPPINGS, OptionReader, VariableSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SpeakerType {
    #[default]
    TvSpeaker,
    Beeper,
    Unfiltered,
}

impl SpeakerType {
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Beeper,
            2 => Self::Unfiltered,
            _ => Self::TvSpeaker,
        }
    }

    /// Name the emulation core knows this setting by.
    #[must_use]
    pub const fn core_name(self) -> &'static str {
        match self {
            Self::TvSpeaker => "TV speaker",
            Self::Beeper => "Beeper",
            Self::Unfiltered => "Unfiltered",
        }
    }
}

/// AY channel placement across the stereo field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StereoSeparation {
    #[default]
    None,
    Acb,
    Abc,
}

impl StereoSeparation {
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Acb,
            2 => Self::Abc,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn core_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Acb => "ACB",
            Self::Abc => "ABC",
        }
    }
}

/// Tape acceleration switches. The fast-load option sets all four together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TapeSettings {
    pub fastload: bool,
    pub accelerate_loader: bool,
    pub tape_traps: bool,
    pub slt_traps: bool,
}

impl TapeSettings {
    #[must_use]
    pub const fn all(enabled: bool) -> Self {
        Self {
            fastload: enabled,
            accelerate_loader: enabled,
            tape_traps: enabled,
            slt_traps: enabled,
        }
    }
}

/// Settings the emulation core applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorSettings {
    /// Percentage of real speed.
    pub emulation_speed: u32,
    pub auto_load: bool,
    pub tape: TapeSettings,
    pub sound_load: bool,
    pub speaker_type: SpeakerType,
    pub stereo_ay: StereoSeparation,
    /// Core id of the machine to start, once one has been selected.
    pub start_machine: Option<&'static str>,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            emulation_speed: 100,
            auto_load: true,
            tape: TapeSettings::all(true),
            sound_load: true,
            speaker_type: SpeakerType::default(),
            stereo_ay: StereoSeparation::default(),
            start_machine: None,
        }
    }
}

impl EmulatorSettings {
    /// Refresh everything except `start_machine`, which only changes on a
    /// machine change.
    pub fn read<S: VariableSource + ?Sized>(&mut self, reader: &OptionReader<'_, S>) {
        self.emulation_speed = reader.number(options::EMULATION_SPEED);
        self.auto_load = reader.enabled(options::AUTO_LOAD);
        self.tape = TapeSettings::all(reader.enabled(options::FAST_LOAD));
        self.sound_load = reader.enabled(options::LOAD_SOUND);
        self.speaker_type = SpeakerType::from_index(reader.index(options::SPEAKER_TYPE));
        self.stereo_ay = StereoSeparation::from_index(reader.index(options::AY_STEREO_SEPARATION));
    }
}

/// Joypad button → Spectrum key overrides, indexed by button id.
pub type JoyMap = [Option<SpectrumKey>; 16];

/// Settings consumed by the frontend itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendSettings {
    pub palette: usize,
    pub overlay_transparent: bool,
    /// How long a key typed from the overlay stays down, in microseconds.
    pub key_hold_time_us: u64,
    /// Announce joystick types and emulation speed on the first frame.
    pub startup_info: bool,
    pub auto_size_savestate: bool,
    pub joymap: JoyMap,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            palette: 0,
            overlay_transparent: true,
            key_hold_time_us: 500_000,
            startup_info: true,
            auto_size_savestate: true,
            joymap: [None; 16],
        }
    }
}

impl FrontendSettings {
    pub fn read<S: VariableSource + ?Sized>(&mut self, reader: &OptionReader<'_, S>) {
        self.palette = reader.index(options::PALETTE);
        self.overlay_transparent = reader.enabled(options::OVERLAY_TRANSPARENT);
        self.key_hold_time_us = u64::from(reader.number(options::KEY_HOLD_TIME)) * 1000;
        self.startup_info = reader.enabled(options::STARTUP_INFO);
        self.auto_size_savestate = reader.enabled(options::AUTO_SIZE_SAVESTATE);
        for (key, button) in JOYPAD_MAPPINGS {
            self.joymap[button.id()] = key_for_symbol_index(reader.index(key));
        }
    }

    /// Key mapped to a joypad button, if any.
    #[must_use]
    pub fn mapped_key(&self, button: JoypadButton) -> Option<SpectrumKey> {
        self.joymap[button.id()]
    }
}
