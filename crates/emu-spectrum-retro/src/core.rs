//! The emulation-core side of the frontend contract.

use emu_core::{BankedMemory, SnapshotCodec};

use crate::content::{ContentInfo, ContentType};
use crate::input::{JoystickState, JoystickType};
use crate::keymap::SpectrumKey;
use crate::machine::MachineDescriptor;
use crate::palette::Palette;
use crate::settings::EmulatorSettings;

/// What one slice of emulation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceOutput {
    /// A complete frame was written to the framebuffer.
    pub frame: bool,
    /// Audio samples are waiting in [`SpectrumCore::drain_audio`].
    pub audio: bool,
}

/// A cycle-accurate Spectrum emulator, as driven by the frontend.
///
/// The core renders every frame with the full border into a framebuffer of
/// the selected machine's hard frame size, in RGB565, using the palette
/// last passed to [`set_palette`](Self::set_palette). RAM banks are
/// reached through [`BankedMemory`]; the paged address space through
/// its [`Bus`](emu_core::Bus) supertrait.
pub trait SpectrumCore: BankedMemory + SnapshotCodec {
    /// Start the emulator with the machine and settings applied so far.
    fn init(&mut self) -> Result<(), String>;

    fn shutdown(&mut self);

    /// Switch to another machine. Takes effect immediately.
    fn select_machine(&mut self, machine: &MachineDescriptor);

    fn apply_settings(&mut self, settings: &EmulatorSettings);

    fn set_palette(&mut self, palette: &Palette);

    /// Redraw the whole framebuffer on the next frame.
    fn refresh_display(&mut self);

    fn pause(&mut self);

    fn unpause(&mut self);

    /// Identify content from its name and bytes. `None` if unknown.
    fn identify(&mut self, name: Option<&str>, data: &[u8]) -> Option<ContentType>;

    /// Open identified content, optionally auto-loading it.
    fn open(&mut self, content: &ContentInfo, data: &[u8], autoload: bool) -> Result<(), String>;

    /// Switch the +3 drive to double-sided 80 track.
    fn use_80_track_plus3_drive(&mut self);

    /// Clear write protection on every disk and microdrive.
    fn unprotect_drives(&mut self);

    /// Run some instructions and pending events.
    fn run_slice(&mut self) -> SliceOutput;

    /// The hard frame, row-major, `hard_width` pixels per row.
    fn framebuffer(&self) -> &[u16];

    /// Move pending interleaved stereo samples into `out`.
    fn drain_audio(&mut self, out: &mut Vec<i16>);

    /// Which joystick interface `port` (0 or 1) emulates.
    fn set_joystick_type(&mut self, port: usize, joystick: JoystickType);

    /// Current joystick directions and fire for `port`.
    fn set_joystick(&mut self, port: usize, state: JoystickState);

    fn key(&mut self, key: SpectrumKey, pressed: bool);

    /// One 4 KiB page of the current 64K address space, `page` in 0..16.
    fn memory_page(&self, page: usize) -> Option<&[u8]>;
}
