//! PNG screenshots of presented frames.
//!
//! Encoding happens in memory; where the bytes go is the host's business.

use emu_core::rgb565_to_rgb888;

use crate::error::FrontendError;
use crate::host::FrameView;

/// Encode the visible part of a frame as an RGB PNG.
pub fn encode_png(frame: &FrameView<'_>) -> crate::Result<Vec<u8>> {
    let mut rgb = Vec::with_capacity(frame.width as usize * frame.height as usize * 3);
    for y in 0..frame.height {
        for &pixel in frame.row(y) {
            rgb.extend_from_slice(&rgb565_to_rgb888(pixel));
        }
    }

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| FrontendError::Capture(e.to_string()))?;
    writer
        .write_image_data(&rgb)
        .map_err(|e| FrontendError::Capture(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| FrontendError::Capture(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_cropped_view() {
        // 4×3 buffer, 2×2 view starting at (1, 1).
        let buffer = vec![0xF800u16; 12];
        let view = FrameView {
            pixels: &buffer[5..],
            width: 2,
            height: 2,
            pitch: 8,
        };
        let png = encode_png(&view).expect("encode");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(png.as_slice());
        let mut reader = decoder.read_info().expect("header");
        let info = reader.info();
        assert_eq!((info.width, info.height), (2, 2));
        let mut data = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut data).expect("frame");
        assert_eq!(&data[..3], &[0xFF, 0, 0]);
    }
}
