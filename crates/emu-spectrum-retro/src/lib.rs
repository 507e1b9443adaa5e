//! ZX Spectrum host frontend.
//!
//! Glue between a cycle-accurate Spectrum emulation core
//! ([`SpectrumCore`]) and a host that owns the window, audio device,
//! input and option storage ([`Host`]). The glue keeps the visible frame
//! geometry in step with the machine and border options, composites the
//! on-screen keyboard over the emulated display, sizes and pads save
//! states, and applies reversible memory pokes.
//!
//! [`Frontend`] holds all of it; everything else is the pieces it is
//! built from, public so hosts and cores can reuse them.

pub mod cheats;
pub mod compositor;
pub mod content;
pub mod core;
pub mod error;
pub mod frontend;
pub mod geometry;
pub mod host;
pub mod input;
pub mod keymap;
pub mod logger;
pub mod machine;
pub mod memory_map;
pub mod options;
pub mod overlay;
pub mod palette;
pub mod settings;
pub mod snapshot;
pub mod sync;

#[cfg(feature = "capture")]
pub mod capture;

pub use crate::core::{SliceOutput, SpectrumCore};
pub use content::{Content, ContentClass, ContentInfo, ContentType};
pub use error::{DirectiveError, FrontendError, Result, SnapshotError};
pub use frontend::{Frontend, FrontendState, system_info};
pub use geometry::{BorderSize, Geometry};
pub use host::{FrameView, Host, InputQuery, JoypadButton};
pub use input::{Device, JoystickState, JoystickType};
pub use keymap::{RetroKey, SpectrumKey};
pub use machine::{MACHINES, MachineDescriptor, MachineId};
pub use options::{VariableSource, VariableStore};
pub use sync::ChangeFlags;
