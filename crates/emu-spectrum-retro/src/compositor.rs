//! Builds the frame handed to the host.
//!
//! Without the overlay the host gets a view straight into the core's
//! framebuffer, cropped to the soft geometry. With the overlay the frame is
//! copied into a private buffer first, the keyboard bitmap is blended over
//! it [`OVERLAY_TOP`] rows down, and the highlighted key is inverted.
//! Timex frames are double resolution, so every overlay pixel covers a
//! 2×2 block there.

use crate::geometry::{Geometry, MAX_HEIGHT, MAX_WIDTH};
use crate::host::FrameView;
use crate::overlay::{KEY_HEIGHT, OVERLAY_HEIGHT, OVERLAY_TOP, OVERLAY_WIDTH, OverlayState};

/// Mask keeping the top 3 bits of red and blue and 4 of green, so three
/// overlay pixels and one frame pixel sum without carrying into the next
/// channel.
const BLEND_MASK: u16 = 0xE79C;

/// 75% overlay, 25% frame.
#[must_use]
pub const fn blend(overlay: u16, frame: u16) -> u16 {
    let o = (overlay & BLEND_MASK) as u32;
    let f = (frame & BLEND_MASK) as u32;
    ((o * 3 + f) >> 2) as u16
}

/// Overlay inputs for one render.
#[derive(Debug, Clone, Copy)]
pub struct OverlayLayer<'a> {
    pub state: &'a OverlayState,
    /// `OVERLAY_WIDTH × OVERLAY_HEIGHT` RGB565 pixels.
    pub bitmap: &'a [u16],
    pub transparent: bool,
}

/// Owns the buffer the overlay is composited into.
#[derive(Debug, Clone)]
pub struct Compositor {
    buffer: Vec<u16>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: vec![0; MAX_WIDTH as usize * MAX_HEIGHT as usize],
        }
    }

    /// The frame to present, or `None` to repeat the last one.
    ///
    /// `frame_produced` says whether the core completed a frame since the
    /// last render. Returns `None` as well if `framebuffer` is smaller than
    /// the hard frame.
    pub fn render<'a>(
        &'a mut self,
        framebuffer: &'a [u16],
        frame_produced: bool,
        geometry: &Geometry,
        is_timex: bool,
        overlay: Option<OverlayLayer<'_>>,
    ) -> Option<FrameView<'a>> {
        if !frame_produced {
            return None;
        }
        let pixels = geometry.hard_pixels();
        let frame = framebuffer.get(..pixels)?;

        let source = match overlay {
            Some(layer) if layer.state.active => {
                if self.buffer.len() < pixels {
                    self.buffer.resize(pixels, 0);
                }
                let buffer = &mut self.buffer[..pixels];
                buffer.copy_from_slice(frame);
                let scale = if is_timex { 2 } else { 1 };
                let mut target = Target {
                    pixels: buffer,
                    width: geometry.hard_width as usize,
                    height: geometry.hard_height as usize,
                    scale,
                };
                target.blend_bitmap(layer.bitmap, layer.transparent);
                target.invert_cursor(layer.state);
                &self.buffer[..pixels]
            }
            _ => frame,
        };

        Some(FrameView {
            pixels: source.get(geometry.first_pixel..)?,
            width: geometry.soft_width,
            height: geometry.soft_height,
            pitch: geometry.hard_width as usize * 2,
        })
    }
}

/// The hard frame, addressed in overlay coordinates.
struct Target<'a> {
    pixels: &'a mut [u16],
    width: usize,
    height: usize,
    scale: usize,
}

impl Target<'_> {
    /// Apply `f` to the block of frame pixels behind overlay pixel (x, y).
    /// Rows past the bottom of the frame are clipped.
    fn update(&mut self, x: usize, y: usize, f: impl Fn(u16) -> u16) {
        for dy in 0..self.scale {
            let row = OVERLAY_TOP + y * self.scale + dy;
            if row >= self.height {
                return;
            }
            for dx in 0..self.scale {
                let col = x * self.scale + dx;
                if col < self.width {
                    let p = &mut self.pixels[row * self.width + col];
                    *p = f(*p);
                }
            }
        }
    }

    fn blend_bitmap(&mut self, bitmap: &[u16], transparent: bool) {
        for (y, line) in bitmap
            .chunks_exact(OVERLAY_WIDTH)
            .take(OVERLAY_HEIGHT)
            .enumerate()
        {
            if OVERLAY_TOP + y * self.scale >= self.height {
                break;
            }
            for (x, &o) in line.iter().enumerate() {
                if transparent {
                    self.update(x, y, |f| blend(o, f));
                } else {
                    self.update(x, y, |_| o);
                }
            }
        }
    }

    fn invert_span(&mut self, x: usize, y: usize, len: usize) {
        for x in x..x + len {
            self.update(x, y, |p| !p);
        }
    }

    /// Invert the highlighted key cell, leaving its four corners alone.
    fn invert_cursor(&mut self, state: &OverlayState) {
        let cell = state.cell();
        self.invert_span(cell.x + 1, cell.y, cell.width - 2);
        for y in cell.y + 1..cell.y + KEY_HEIGHT - 1 {
            self.invert_span(cell.x, y, cell.width);
        }
        self.invert_span(cell.x + 1, cell.y + KEY_HEIGHT - 1, cell.width - 2);
    }
}
