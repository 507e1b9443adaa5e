//! Selectable 16-colour palettes, pre-packed as RGB565.
//!
//! Index layout inside a palette matches the ULA: `bright << 3 | ink`,
//! colours in the order black, blue, red, magenta, green, cyan, yellow,
//! white. The palette option offers these in [`PALETTES`] order.

use emu_core::{rgb565, rgb565_from_rgb888 as rgb};

/// One palette: 8 normal colours then 8 bright ones.
pub type Palette = [u16; 16];

/// A named palette, as offered by the palette option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub colours: Palette,
}

/// Fuse's own RGB565 palette.
const FUSE: Palette = [
    0x0000, 0x0018, 0xC000, 0xC018, //
    0x0600, 0x0618, 0xC600, 0xC618, //
    0x0000, 0x001F, 0xF800, 0xF81F, //
    0x07E0, 0x07FF, 0xFFE0, 0xFFFF,
];

/// The 0xD7/0xFF levels usually quoted for real hardware.
#[rustfmt::skip]
const ZX_STANDARD: Palette = [
    rgb(0x000000), rgb(0x0000D7), rgb(0xD70000), rgb(0xD700D7),
    rgb(0x00D700), rgb(0x00D7D7), rgb(0xD7D700), rgb(0xD7D7D7),
    rgb(0x000000), rgb(0x0000FF), rgb(0xFF0000), rgb(0xFF00FF),
    rgb(0x00FF00), rgb(0x00FFFF), rgb(0xFFFF00), rgb(0xFFFFFF),
];

/// Luminance ramp of a black-and-white television.
const BW_TV: Palette = [
    0x0000, 0x10A2, 0x39C7, 0x4A69, //
    0x738E, 0x8430, 0xAD55, 0xBDF7, //
    0x0000, 0x18E3, 0x4A69, 0x6B4D, //
    0x94B2, 0xB596, 0xE71C, 0xFFFF,
];

/// Green phosphor monitor levels (ZX Spin).
const GREEN: Palette = [
    rgb565(0, 0, 0),
    rgb565(0, 33, 0),
    rgb565(0, 62, 0),
    rgb565(0, 85, 0),
    rgb565(0, 115, 0),
    rgb565(0, 136, 0),
    rgb565(0, 168, 0),
    rgb565(0, 181, 0),
    rgb565(0, 0, 0),
    rgb565(0, 52, 0),
    rgb565(0, 81, 0),
    rgb565(0, 113, 0),
    rgb565(0, 154, 0),
    rgb565(0, 185, 0),
    rgb565(0, 237, 0),
    rgb565(0, 255, 0),
];

/// Amber phosphor monitor levels (ZX Spin).
const AMBER: Palette = [
    rgb565(0, 0, 0),
    rgb565(34, 24, 0),
    rgb565(62, 44, 0),
    rgb565(86, 61, 0),
    rgb565(116, 82, 0),
    rgb565(136, 96, 0),
    rgb565(168, 119, 0),
    rgb565(182, 128, 0),
    rgb565(0, 0, 0),
    rgb565(52, 37, 0),
    rgb565(82, 58, 0),
    rgb565(114, 80, 0),
    rgb565(154, 109, 0),
    rgb565(186, 131, 0),
    rgb565(238, 168, 0),
    rgb565(255, 180, 1),
];

/// Nearest VIC-II colours.
#[rustfmt::skip]
const C64: Palette = [
    rgb(0x000000), rgb(0x40318D), rgb(0x883932), rgb(0x8B5429),
    rgb(0x55A049), rgb(0x67B6BD), rgb(0x574200), rgb(0x9F9F9F),
    rgb(0x000000), rgb(0x7869C4), rgb(0xB86962), rgb(0x8B5429),
    rgb(0x94E089), rgb(0x9F9F9F), rgb(0xBFCE72), rgb(0xFFFFFF),
];

/// CGA mode 4, palette 1 high intensity: black, cyan, magenta, white.
#[rustfmt::skip]
const CGA_4: Palette = [
    rgb(0x000000), rgb(0x55FFFF), rgb(0xFF55FF), rgb(0xFF55FF),
    rgb(0x55FFFF), rgb(0x55FFFF), rgb(0xFFFFFF), rgb(0xFFFFFF),
    rgb(0x000000), rgb(0x55FFFF), rgb(0xFF55FF), rgb(0xFF55FF),
    rgb(0x55FFFF), rgb(0x55FFFF), rgb(0xFFFFFF), rgb(0xFFFFFF),
];

/// CGA 4 with the low-intensity variant for the normal colours.
#[rustfmt::skip]
const CGA_8: Palette = [
    rgb(0x000000), rgb(0x00AAAA), rgb(0xAA00AA), rgb(0xAA00AA),
    rgb(0x00AAAA), rgb(0x00AAAA), rgb(0xAAAAAA), rgb(0xAAAAAA),
    rgb(0x000000), rgb(0x55FFFF), rgb(0xFF55FF), rgb(0xFF55FF),
    rgb(0x55FFFF), rgb(0x55FFFF), rgb(0xFFFFFF), rgb(0xFFFFFF),
];

/// Full CGA text palette, brown included.
#[rustfmt::skip]
const CGA_16: Palette = [
    rgb(0x000000), rgb(0x0000AA), rgb(0xAA0000), rgb(0xAA00AA),
    rgb(0x00AA00), rgb(0x00AAAA), rgb(0xAA5500), rgb(0xAAAAAA),
    rgb(0x000000), rgb(0x5555FF), rgb(0xFF5555), rgb(0xFF55FF),
    rgb(0x55FF55), rgb(0x55FFFF), rgb(0xFFFF55), rgb(0xFFFFFF),
];

#[rustfmt::skip]
const INVERTED: Palette = [
    rgb(0xFFFFFF), rgb(0xFEFF31), rgb(0x30FEFF), rgb(0x30FE31),
    rgb(0xFF30EA), rgb(0xFE3030), rgb(0x3030EA), rgb(0x303030),
    rgb(0xFFFFFF), rgb(0xFDFF02), rgb(0x00FDFE), rgb(0x00FD02),
    rgb(0xFF00E3), rgb(0xFD0000), rgb(0xFD0000), rgb(0x000000),
];

/// All palettes, in option order.
pub static PALETTES: [PaletteEntry; 10] = [
    PaletteEntry { name: "Fuse Standard", colours: FUSE },
    PaletteEntry { name: "ZX Standard", colours: ZX_STANDARD },
    PaletteEntry { name: "B&W TV", colours: BW_TV },
    PaletteEntry { name: "Green Monochrome", colours: GREEN },
    PaletteEntry { name: "Ambar Monochrome", colours: AMBER },
    PaletteEntry { name: "C64", colours: C64 },
    PaletteEntry { name: "CGA 4 colours", colours: CGA_4 },
    PaletteEntry { name: "CGA 8 colours", colours: CGA_8 },
    PaletteEntry { name: "CGA 16 colours", colours: CGA_16 },
    PaletteEntry { name: "Inverted colours", colours: INVERTED },
];

/// Palette at an option index, falling back to Fuse Standard.
#[must_use]
pub fn palette(index: usize) -> &'static Palette {
    &PALETTES.get(index).unwrap_or(&PALETTES[0]).colours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuse_is_default() {
        assert_eq!(palette(0)[9], 0x001F);
        assert_eq!(palette(42), palette(0));
    }

    #[test]
    fn both_blacks_are_black_except_inverted() {
        for entry in &PALETTES[..9] {
            assert_eq!(entry.colours[0], 0x0000, "{}", entry.name);
            assert_eq!(entry.colours[8], 0x0000, "{}", entry.name);
        }
        // Inverted swaps the ends.
        assert_eq!(PALETTES[9].colours[0], 0xFFFF);
        assert_eq!(PALETTES[9].colours[15], 0x0000);
    }

    #[test]
    fn zx_standard_levels() {
        // 0xD7 red truncates to 0b11010.
        assert_eq!(palette(1)[2], 0xD000);
        assert_eq!(palette(1)[10], 0xF800);
    }

    #[test]
    fn monochrome_has_no_blue() {
        for &c in palette(3).iter().chain(palette(4)) {
            assert_eq!(c & 0x001F, 0);
        }
        // Green monochrome has no red either.
        assert!(palette(3).iter().all(|c| c & 0xF800 == 0));
    }

    #[test]
    fn cga_8_normal_cyan() {
        assert_eq!(palette(7)[1], rgb565(0x00, 0xAA, 0xAA));
    }
}
