//! RGB565 colour packing.
//!
//! Layout: `RRRRRGGG GGGBBBBB`. Packing truncates each channel; unpacking
//! replicates the high bits into the low ones so that full-intensity
//! channels come back as 0xFF.

/// Pack 8-bit channels into RGB565.
#[must_use]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Pack a `0xRRGGBB` colour into RGB565.
#[must_use]
pub const fn rgb565_from_rgb888(rgb: u32) -> u16 {
    rgb565((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Unpack RGB565 into `[r, g, b]`.
#[must_use]
pub const fn rgb565_to_rgb888(pixel: u16) -> [u8; 3] {
    let r = ((pixel >> 11) & 0x1F) as u8;
    let g = ((pixel >> 5) & 0x3F) as u8;
    let b = (pixel & 0x1F) as u8;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}
