//! The host side of the frontend contract.
//!
//! A host drives the frontend one frame at a time and receives video,
//! audio and configuration traffic through [`Host`]. All calls are
//! sequential; a host never re-enters the frontend from a callback.

use serde::Serialize;

use crate::input::Device;
use crate::keymap::RetroKey;
use crate::memory_map::MemoryDescriptor;
use crate::options::{CoreOption, VariableSource};

/// Joypad buttons, numbered as hosts number them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JoypadButton {
    B = 0,
    Y = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
    A = 8,
    X = 9,
    L = 10,
    R = 11,
    L2 = 12,
    R2 = 13,
    L3 = 14,
    R3 = 15,
}

impl JoypadButton {
    pub const ALL: [Self; 16] = [
        Self::B,
        Self::Y,
        Self::Select,
        Self::Start,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::X,
        Self::L,
        Self::R,
        Self::L2,
        Self::R2,
        Self::L3,
        Self::R3,
    ];

    #[must_use]
    pub const fn id(self) -> usize {
        self as usize
    }
}

/// What [`Host::input_state`] is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputQuery {
    Joypad(JoypadButton),
    Key(RetroKey),
}

/// Only RGB565 is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb565,
}

/// A frame ready for display.
///
/// `pixels` starts at the top-left visible pixel; rows are `pitch` bytes
/// apart. The slice is at least long enough to hold every visible row.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub pixels: &'a [u16],
    pub width: u32,
    pub height: u32,
    /// Distance between rows in bytes.
    pub pitch: usize,
}

impl<'a> FrameView<'a> {
    /// Row stride in pixels.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.pitch / 2
    }

    /// The visible pixels of row `y`.
    ///
    /// # Panics
    ///
    /// If `y` is not below `height`.
    #[must_use]
    pub fn row(&self, y: u32) -> &'a [u16] {
        assert!(y < self.height, "row {y} outside a {}-row frame", self.height);
        let start = y as usize * self.stride();
        &self.pixels[start..start + self.width as usize]
    }

    /// # Panics
    ///
    /// If `(x, y)` lies outside the visible frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> u16 {
        assert!(x < self.width, "column {x} outside a {}-pixel row", self.width);
        self.row(y)[x as usize]
    }
}

/// Frame size the host should present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameGeometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    /// 0.0 lets the host derive the aspect ratio from the base size.
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub fps: f64,
    pub sample_rate: f64,
}

/// Audio/video parameters published on load and on timing changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvInfo {
    pub geometry: GameGeometry,
    pub timing: Timing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    Pal,
    Ntsc,
}

/// Static description of the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub library_name: &'static str,
    pub library_version: &'static str,
    /// `|`-separated list of content extensions.
    pub valid_extensions: &'static str,
    pub need_fullpath: bool,
    pub block_extract: bool,
}

/// One selectable device in a controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerDescription {
    pub name: &'static str,
    pub device: Device,
}

/// Label for a joypad button in one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDescriptor {
    pub port: usize,
    pub button: JoypadButton,
    pub description: &'static str,
}

/// Everything the frontend needs from its host.
pub trait Host: VariableSource {
    // ---- environment ----

    /// Whether any option value changed since the last call.
    fn variables_updated(&mut self) -> bool;

    /// Register the option catalog.
    fn set_variables(&mut self, options: &[CoreOption]);

    /// Register the devices selectable in each of `ports` controller ports.
    fn set_controller_info(&mut self, devices: &[ControllerDescription], ports: usize);

    fn set_input_descriptors(&mut self, descriptors: &[InputDescriptor]);

    /// Negotiate the pixel format. `false` means the host can't display it.
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool;

    fn set_geometry(&mut self, geometry: &GameGeometry);

    fn set_av_info(&mut self, info: &AvInfo);

    /// Publish the 64K address space. The page slices are only valid for
    /// the duration of the call.
    fn set_memory_map(&mut self, map: &[MemoryDescriptor<'_>]);

    /// On-screen notification.
    fn show_message(&mut self, message: &str);

    // ---- per-frame callbacks ----

    /// Present a frame; `None` repeats the previous one.
    fn video_refresh(&mut self, frame: Option<FrameView<'_>>);

    fn poll_input(&mut self);

    /// Non-zero when the queried button or key is held.
    fn input_state(&mut self, port: usize, query: InputQuery) -> i16;

    /// Interleaved stereo samples. Returns the number of frames consumed.
    fn audio_batch(&mut self, samples: &[i16]) -> usize;
}
