//! Configuration option catalog and lookup.
//!
//! The frontend owns the option schema ([`OPTIONS`]); the host owns the
//! values. Values are read back through a [`VariableSource`] and resolved
//! to choice indices. Missing or unknown values resolve to the first
//! choice, which is also each option's default.

use std::collections::HashMap;

use crate::host::JoypadButton;
use crate::keymap::KEY_SYMBOLS;
use crate::machine::MACHINES;
use crate::palette::PALETTES;

pub const MACHINE: &str = "fuse_machine";
pub const EMULATION_SPEED: &str = "fuse_emulation_speed";
pub const BORDER_SIZE: &str = "fuse_size_border";
pub const PALETTE: &str = "fuse_palette";
pub const AUTO_LOAD: &str = "fuse_auto_load";
pub const FAST_LOAD: &str = "fuse_fast_load";
pub const LOAD_SOUND: &str = "fuse_load_sound";
pub const SPEAKER_TYPE: &str = "fuse_speaker_type";
pub const AY_STEREO_SEPARATION: &str = "fuse_ay_stereo_separation";
pub const OVERLAY_TRANSPARENT: &str = "fuse_key_ovrlay_transp";
pub const KEY_HOLD_TIME: &str = "fuse_key_hold_time";
pub const STARTUP_INFO: &str = "fuse_display_joystick_type";
pub const AUTO_SIZE_SAVESTATE: &str = "fuse_auto_size_savestate";

const ENABLED_DISABLED: &[&str] = &["enabled", "disabled"];

/// Where an option's choices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choices {
    List(&'static [&'static str]),
    /// Machine catalog names.
    Machines,
    /// Palette names.
    Palettes,
}

impl Choices {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Machines => MACHINES.len(),
            Self::Palettes => PALETTES.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'static str> {
        match self {
            Self::List(list) => list.get(index).copied(),
            Self::Machines => MACHINES.get(index).map(|m| m.name),
            Self::Palettes => PALETTES.get(index).map(|p| p.name),
        }
    }

    /// Index of `value` among the choices.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        (0..self.len()).find(|&i| self.get(i) == Some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

/// One host-visible configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreOption {
    pub key: &'static str,
    pub description: &'static str,
    pub choices: Choices,
}

impl CoreOption {
    /// Registration string: `"Description; first|second|..."`.
    #[must_use]
    pub fn definition(&self) -> String {
        let choices: Vec<_> = self.choices.iter().collect();
        format!("{}; {}", self.description, choices.join("|"))
    }

    /// The first choice.
    #[must_use]
    pub fn default_value(&self) -> &'static str {
        self.choices.get(0).unwrap_or_default()
    }
}

const fn option(key: &'static str, description: &'static str, choices: Choices) -> CoreOption {
    CoreOption {
        key,
        description,
        choices,
    }
}

const fn joypad(key: &'static str, description: &'static str) -> CoreOption {
    option(key, description, Choices::List(&KEY_SYMBOLS))
}

/// Joypad-mapping options and the button each one remaps.
pub const JOYPAD_MAPPINGS: [(&str, JoypadButton); 15] = [
    ("fuse_joypad_left", JoypadButton::Left),
    ("fuse_joypad_right", JoypadButton::Right),
    ("fuse_joypad_up", JoypadButton::Up),
    ("fuse_joypad_down", JoypadButton::Down),
    ("fuse_joypad_start", JoypadButton::Start),
    ("fuse_joypad_a", JoypadButton::A),
    ("fuse_joypad_b", JoypadButton::B),
    ("fuse_joypad_x", JoypadButton::X),
    ("fuse_joypad_y", JoypadButton::Y),
    ("fuse_joypad_l", JoypadButton::L),
    ("fuse_joypad_r", JoypadButton::R),
    ("fuse_joypad_l2", JoypadButton::L2),
    ("fuse_joypad_r2", JoypadButton::R2),
    ("fuse_joypad_l3", JoypadButton::L3),
    ("fuse_joypad_r3", JoypadButton::R3),
];

/// The option catalog, in registration order.
pub static OPTIONS: [CoreOption; 28] = [
    option(MACHINE, "Model (needs content load)", Choices::Machines),
    option(
        EMULATION_SPEED,
        "Emulation speed percentage (needs content load)",
        Choices::List(&["100", "150", "200", "300", "50"]),
    ),
    option(
        BORDER_SIZE,
        "Size Video Border",
        Choices::List(&["full", "medium", "small", "minimum", "none"]),
    ),
    option(PALETTE, "Colour Palette", Choices::Palettes),
    option(AUTO_LOAD, "Tape Auto Load", Choices::List(ENABLED_DISABLED)),
    option(FAST_LOAD, "Tape Fast Load", Choices::List(ENABLED_DISABLED)),
    option(LOAD_SOUND, "Tape Load Sound", Choices::List(ENABLED_DISABLED)),
    option(
        SPEAKER_TYPE,
        "Speaker Type",
        Choices::List(&["tv speaker", "beeper", "unfiltered"]),
    ),
    option(
        AY_STEREO_SEPARATION,
        "AY Stereo Separation",
        Choices::List(&["none", "acb", "abc"]),
    ),
    option(
        OVERLAY_TRANSPARENT,
        "Transparent Keyboard Overlay",
        Choices::List(ENABLED_DISABLED),
    ),
    option(
        KEY_HOLD_TIME,
        "Time to Release Key in ms",
        Choices::List(&["500", "1000", "100", "300"]),
    ),
    option(
        STARTUP_INFO,
        "Display joystick type and emulation speed at startup",
        Choices::List(ENABLED_DISABLED),
    ),
    option(
        AUTO_SIZE_SAVESTATE,
        "Use Auto Size for Savestates. For Netplay 'Off' is recommended",
        Choices::List(ENABLED_DISABLED),
    ),
    joypad("fuse_joypad_left", "Joypad Left mapping"),
    joypad("fuse_joypad_right", "Joypad Right mapping"),
    joypad("fuse_joypad_up", "Joypad Up mapping"),
    joypad("fuse_joypad_down", "Joypad Down mapping"),
    joypad("fuse_joypad_start", "Joypad Start mapping"),
    joypad("fuse_joypad_a", "Joypad A button mapping"),
    joypad("fuse_joypad_b", "Joypad B button mapping"),
    joypad("fuse_joypad_x", "Joypad X button mapping"),
    joypad("fuse_joypad_y", "Joypad Y button mapping"),
    joypad("fuse_joypad_l", "Joypad L button mapping"),
    joypad("fuse_joypad_r", "Joypad R button mapping"),
    joypad("fuse_joypad_l2", "Joypad L2 button mapping"),
    joypad("fuse_joypad_r2", "Joypad R2 button mapping"),
    joypad("fuse_joypad_l3", "Joypad L3 button mapping"),
    joypad("fuse_joypad_r3", "Joypad R3 button mapping"),
];

/// Catalog entry for a key.
#[must_use]
pub fn find(key: &str) -> Option<&'static CoreOption> {
    OPTIONS.iter().find(|o| o.key == key)
}

/// Read access to the host's current option values.
pub trait VariableSource {
    /// Current value of `key`, or `None` if the host has none.
    fn variable(&self, key: &str) -> Option<String>;
}

/// Resolves option values to choice indices.
pub struct OptionReader<'a, S: VariableSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: VariableSource + ?Sized> OptionReader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Choice index of the current value, 0 when missing or not a choice.
    pub fn index(&self, key: &str) -> usize {
        let Some(option) = find(key) else {
            return 0;
        };
        self.source
            .variable(key)
            .and_then(|value| option.choices.position(&value))
            .unwrap_or(0)
    }

    /// The resolved choice string.
    pub fn value(&self, key: &str) -> &'static str {
        find(key)
            .and_then(|o| o.choices.get(self.index(key)))
            .unwrap_or_default()
    }

    /// For enabled/disabled options: whether the first choice is selected.
    pub fn enabled(&self, key: &str) -> bool {
        self.index(key) == 0
    }

    /// The resolved choice parsed as a number.
    pub fn number(&self, key: &str) -> u32 {
        self.value(key).parse().unwrap_or(0)
    }
}

/// In-memory option values, for hosts without their own store.
///
/// Starts out holding every option's default. Setting a value marks the
/// store as updated until [`take_updated`](Self::take_updated) is called.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: HashMap<String, String>,
    updated: bool,
}

impl VariableStore {
    #[must_use]
    pub fn new() -> Self {
        let values = OPTIONS
            .iter()
            .map(|o| (o.key.to_string(), o.default_value().to_string()))
            .collect();
        Self {
            values,
            updated: false,
        }
    }

    /// Defaults overlaid with a JSON object of `"key": "value"` pairs.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.values.extend(overrides);
        Ok(store)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.updated = true;
    }

    /// Whether any value changed since the last call.
    pub fn take_updated(&mut self) -> bool {
        std::mem::take(&mut self.updated)
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.values)?)
    }
}

impl VariableSource for VariableStore {
    fn variable(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
