//! Frame geometry policy.
//!
//! The core always renders the full border into a "hard" frame. What the
//! host shows is a "soft" crop of it, centred, selected by the border-size
//! option. Both are pure functions of the machine and the border class.

use serde::Serialize;

use crate::machine::MachineDescriptor;

/// Largest hard frame any machine produces (Timex PAL).
pub const MAX_WIDTH: u32 = 640;
pub const MAX_HEIGHT: u32 = 576;

/// How much of the emulated border is visible.
///
/// Discriminants are the choice indices of the border-size option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BorderSize {
    #[default]
    Full = 0,
    Medium = 1,
    Small = 2,
    Minimum = 3,
    None = 4,
}

impl BorderSize {
    pub const ALL: [Self; 5] = [
        Self::Full,
        Self::Medium,
        Self::Small,
        Self::Minimum,
        Self::None,
    ];

    /// Border class for an option index; unknown indices mean `Full`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Visible size on a standard (256-pixel paper) display.
    ///
    /// `None` for `Full`, which shows the whole hard frame.
    const fn standard_size(self) -> Option<(u32, u32)> {
        match self {
            Self::Full => None,
            Self::Medium => Some((288, 216)),
            Self::Small => Some((272, 204)),
            Self::Minimum => Some((264, 198)),
            Self::None => Some((256, 192)),
        }
    }
}

/// Hard and soft frame dimensions for one machine and border class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub hard_width: u32,
    pub hard_height: u32,
    pub soft_width: u32,
    pub soft_height: u32,
    pub border: BorderSize,
    /// Offset in pixels from the start of the hard frame to the top-left
    /// pixel of the soft crop.
    pub first_pixel: usize,
}

impl Geometry {
    /// Geometry of a not-yet-configured frontend: everything zero.
    pub const EMPTY: Self = Self {
        hard_width: 0,
        hard_height: 0,
        soft_width: 0,
        soft_height: 0,
        border: BorderSize::Full,
        first_pixel: 0,
    };

    #[must_use]
    pub fn new(machine: &MachineDescriptor, border: BorderSize) -> Self {
        let (hard_width, hard_height) = hard_size(machine);
        Self::with_hard_size(machine, hard_width, hard_height, border)
    }

    /// Recompute only the soft crop, keeping the hard frame.
    #[must_use]
    pub fn with_border(&self, machine: &MachineDescriptor, border: BorderSize) -> Self {
        Self::with_hard_size(machine, self.hard_width, self.hard_height, border)
    }

    fn with_hard_size(
        machine: &MachineDescriptor,
        hard_width: u32,
        hard_height: u32,
        border: BorderSize,
    ) -> Self {
        let (soft_width, soft_height) = match border.standard_size() {
            // Timex frames are double resolution in both axes.
            Some((w, h)) if machine.is_timex => (w * 2, h * 2),
            Some(size) => size,
            None => (hard_width, hard_height),
        };
        Self {
            hard_width,
            hard_height,
            soft_width,
            soft_height,
            border,
            first_pixel: first_pixel(hard_width, hard_height, soft_width, soft_height),
        }
    }

    /// Hard frame size as a `(width, height)` pair.
    #[must_use]
    pub const fn hard_size(&self) -> (u32, u32) {
        (self.hard_width, self.hard_height)
    }

    /// Total pixels in the hard frame.
    #[must_use]
    pub const fn hard_pixels(&self) -> usize {
        self.hard_width as usize * self.hard_height as usize
    }

    /// Top-left corner of the soft crop as `(x, y)` in the hard frame.
    #[must_use]
    pub const fn crop_origin(&self) -> (u32, u32) {
        if self.hard_width == 0 {
            return (0, 0);
        }
        let x = self.first_pixel % self.hard_width as usize;
        let y = self.first_pixel / self.hard_width as usize;
        (x as u32, y as u32)
    }
}

/// Hard frame size for a machine: full border, native line count.
#[must_use]
pub const fn hard_size(machine: &MachineDescriptor) -> (u32, u32) {
    let width = if machine.is_timex { 640 } else { 320 };
    let height = match (machine.is_ntsc(), machine.is_timex) {
        (false, false) => 288,
        (false, true) => 576,
        (true, false) => 240,
        (true, true) => 480,
    };
    (width, height)
}

/// Centre the soft crop in the hard frame.
///
/// Both halvings truncate; an odd margin puts the extra pixel on the
/// right/bottom.
#[must_use]
pub const fn first_pixel(hard_width: u32, hard_height: u32, soft_width: u32, soft_height: u32) -> usize {
    let rows = (hard_height - soft_height) / 2;
    let cols = (hard_width - soft_width) / 2;
    rows as usize * hard_width as usize + cols as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{MachineId, by_id};
    use proptest::prelude::*;

    #[test]
    fn spectrum_pal_full_border() {
        let g = Geometry::new(by_id(MachineId::Spectrum48K), BorderSize::Full);
        assert_eq!(g.hard_size(), (320, 288));
        assert_eq!((g.soft_width, g.soft_height), (320, 288));
        assert_eq!(g.first_pixel, 0);
    }

    #[test]
    fn spectrum_ntsc_hard_size() {
        let g = Geometry::new(by_id(MachineId::Spectrum48KNtsc), BorderSize::Full);
        assert_eq!(g.hard_size(), (320, 240));
    }

    #[test]
    fn timex_sizes_double() {
        let g = Geometry::new(by_id(MachineId::TimexTC2048), BorderSize::Medium);
        assert_eq!(g.hard_size(), (640, 576));
        assert_eq!((g.soft_width, g.soft_height), (576, 432));

        let g = Geometry::new(by_id(MachineId::TimexTS2068), BorderSize::None);
        assert_eq!(g.hard_size(), (640, 480));
        assert_eq!((g.soft_width, g.soft_height), (512, 384));
    }

    #[test]
    fn minimum_border_first_pixel() {
        // (288 - 198) / 2 = 45 rows, (320 - 264) / 2 = 28 columns.
        let g = Geometry::new(by_id(MachineId::Spectrum48K), BorderSize::Minimum);
        assert_eq!(g.first_pixel, 45 * 320 + 28);
        assert_eq!(g.crop_origin(), (28, 45));
    }

    #[test]
    fn first_pixel_truncates_odd_margins() {
        // NTSC 240 - 198 = 42 -> 21 rows; a 3-pixel margin -> 1 column.
        assert_eq!(first_pixel(320, 240, 264, 198), 21 * 320 + 28);
        assert_eq!(first_pixel(10, 10, 7, 7), 10 + 1);
    }

    #[test]
    fn with_border_keeps_hard_frame() {
        let m = by_id(MachineId::Spectrum128K);
        let full = Geometry::new(m, BorderSize::Full);
        let none = full.with_border(m, BorderSize::None);
        assert_eq!(none.hard_size(), full.hard_size());
        assert_eq!((none.soft_width, none.soft_height), (256, 192));
    }

    #[test]
    fn unknown_border_index_is_full() {
        assert_eq!(BorderSize::from_index(3), BorderSize::Minimum);
        assert_eq!(BorderSize::from_index(17), BorderSize::Full);
    }

    proptest! {
        #[test]
        fn crop_lies_inside_hard_frame(machine in 0usize..16, border in 0usize..5) {
            let m = crate::machine::by_index(machine);
            let g = Geometry::new(m, BorderSize::from_index(border));
            let (x, y) = g.crop_origin();

            prop_assert!(g.first_pixel + g.soft_width as usize <= g.hard_pixels());
            prop_assert!(x + g.soft_width <= g.hard_width);
            prop_assert!(y + g.soft_height <= g.hard_height);
            let last = g.first_pixel
                + (g.soft_height as usize - 1) * g.hard_width as usize
                + g.soft_width as usize;
            prop_assert!(last <= g.hard_pixels());
        }
    }
}
