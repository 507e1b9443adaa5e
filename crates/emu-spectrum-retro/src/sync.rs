//! Reconciles option values with live machine and geometry state.
//!
//! A forced sync happens when content is (re)loaded and is the only time
//! the machine can change. Steady-state syncs, run whenever the host
//! reports changed options, only pick up the border size. Everything else
//! (speed, palette, tape switches, joypad mappings, ...) is re-read on
//! every sync; palette and core-setting changes are left pending for the
//! frontend to push to the core.

use bitflags::bitflags;
use log::debug;

use crate::geometry::{BorderSize, Geometry};
use crate::machine::{MachineDescriptor, by_index};
use crate::options::{self, OptionReader, VariableSource};
use crate::settings::{EmulatorSettings, FrontendSettings};

bitflags! {
    /// What a sync changed, and so what the host must be told.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Frame rate or hard frame size: republish AV info.
        const AV_INFO = 1 << 0;
        /// Visible (soft) frame size.
        const GEOMETRY = 1 << 1;
        /// A different machine must be selected in the core.
        const MACHINE = 1 << 2;
    }
}

/// Cached machine, geometry and settings.
#[derive(Debug, Clone)]
pub struct ConfigSync {
    machine: Option<&'static MachineDescriptor>,
    forced_machine: Option<usize>,
    geometry: Geometry,
    pub emulator: EmulatorSettings,
    pub frontend: FrontendSettings,
    palette_changed: bool,
    settings_changed: bool,
}

impl Default for ConfigSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSync {
    #[must_use]
    pub fn new() -> Self {
        Self {
            machine: None,
            forced_machine: None,
            geometry: Geometry::EMPTY,
            emulator: EmulatorSettings::default(),
            frontend: FrontendSettings::default(),
            palette_changed: false,
            settings_changed: false,
        }
    }

    /// Override the machine option on forced syncs.
    pub fn force_machine(&mut self, index: Option<usize>) {
        self.forced_machine = index;
    }

    #[must_use]
    pub fn machine(&self) -> Option<&'static MachineDescriptor> {
        self.machine
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Frame rate of the current machine; 50 Hz before one is selected.
    #[must_use]
    pub fn frame_rate(&self) -> u32 {
        self.machine.map_or(50, MachineDescriptor::frame_rate)
    }

    /// Forget the cached geometry so the next forced sync republishes it.
    pub fn reset_geometry(&mut self) {
        self.geometry = Geometry::EMPTY;
    }

    pub fn sync<S: VariableSource + ?Sized>(&mut self, source: &S, force: bool) -> ChangeFlags {
        let reader = OptionReader::new(source);
        let mut flags = ChangeFlags::empty();
        let border = BorderSize::from_index(reader.index(options::BORDER_SIZE));

        if force {
            let index = self
                .forced_machine
                .unwrap_or_else(|| reader.index(options::MACHINE));
            let machine = by_index(index);

            if self.machine.is_none_or(|old| old.id != machine.id) {
                let timing_changed = self
                    .machine
                    .is_none_or(|old| old.frame_rate() != machine.frame_rate());
                if timing_changed {
                    flags |= ChangeFlags::AV_INFO;
                }
                debug!("Machine changed to {}", machine.name);
                self.machine = Some(machine);
                self.emulator.start_machine = Some(machine.core_id);
                flags |= ChangeFlags::MACHINE;
            }

            let geometry = Geometry::new(machine, border);
            if geometry.hard_size() != self.geometry.hard_size() {
                flags |= ChangeFlags::AV_INFO | ChangeFlags::GEOMETRY;
            } else if geometry != self.geometry {
                flags |= ChangeFlags::GEOMETRY;
            }
            self.set_geometry(geometry);
        } else if let Some(machine) = self.machine
            && border != self.geometry.border
        {
            flags |= ChangeFlags::GEOMETRY;
            self.set_geometry(self.geometry.with_border(machine, border));
        }

        let emulator = self.emulator.clone();
        self.emulator.read(&reader);
        self.settings_changed |= emulator != self.emulator;

        let palette = self.frontend.palette;
        self.frontend.read(&reader);
        self.palette_changed |= palette != self.frontend.palette;

        flags
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        if geometry != self.geometry {
            debug!(
                "Geometry {}x{} crop {}x{} at {}",
                geometry.hard_width,
                geometry.hard_height,
                geometry.soft_width,
                geometry.soft_height,
                geometry.first_pixel
            );
        }
        self.geometry = geometry;
    }

    /// The new palette index, if it changed since the last call.
    pub fn take_palette_change(&mut self) -> Option<usize> {
        std::mem::take(&mut self.palette_changed).then_some(self.frontend.palette)
    }

    /// Whether emulator settings changed since the last call.
    pub fn take_settings_change(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }
}
