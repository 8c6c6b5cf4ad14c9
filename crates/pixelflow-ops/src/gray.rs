//! Grayscale conversion and binary thresholding
//!
//! Luminance conversion uses ITU-R BT.601 weights. Buffers store BGR
//! sample order, so the blue sample comes first in each pixel.

use crate::OpsResult;
use pixelflow_core::{Channels, PixelBuffer};

/// Convert a buffer to single-channel grayscale.
///
/// Uses BT.601 luminance: `round(0.299 R + 0.587 G + 0.114 B)`,
/// clamped to [0, 255]. A grayscale input is returned as an unchanged
/// copy.
pub fn to_gray(buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
    if buf.is_gray() {
        return Ok(buf.clone());
    }

    let mut out = PixelBuffer::new(buf.width(), buf.height(), Channels::Gray)?;
    let src = buf.data();
    let dst = out.data_mut();

    for (pixel, dst_v) in src.chunks_exact(3).zip(dst.iter_mut()) {
        let b = pixel[0] as f32;
        let g = pixel[1] as f32;
        let r = pixel[2] as f32;
        let lum = 0.299 * r + 0.587 * g + 0.114 * b;
        *dst_v = lum.round().clamp(0.0, 255.0) as u8;
    }

    Ok(out)
}

/// Binary threshold.
///
/// Converts to grayscale first if needed, then maps each pixel to 255
/// if its value is strictly greater than `cutoff`, else 0. `cutoff`
/// outside [0, 255] is accepted: below 0 yields all-255, above 254
/// yields all-0.
pub fn threshold(buf: &PixelBuffer, cutoff: i32) -> OpsResult<PixelBuffer> {
    let gray = to_gray(buf)?;

    let mut out = PixelBuffer::new(gray.width(), gray.height(), Channels::Gray)?;
    let src = gray.data();
    let dst = out.data_mut();

    for (&v, dst_v) in src.iter().zip(dst.iter_mut()) {
        *dst_v = if (v as i32) > cutoff { 255 } else { 0 };
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_gray(value: u8) -> PixelBuffer {
        PixelBuffer::from_raw(4, 3, Channels::Gray, vec![value; 12]).unwrap()
    }

    #[test]
    fn test_to_gray_bt601_weights() {
        let mut buf = PixelBuffer::new(2, 2, Channels::Bgr).unwrap();
        let pixels: [(u8, u8, u8); 4] = [(255, 0, 0), (0, 255, 0), (0, 0, 255), (30, 120, 210)];
        for (i, &(b, g, r)) in pixels.iter().enumerate() {
            let (x, y) = ((i % 2) as u32, (i / 2) as u32);
            buf.set_sample(x, y, 0, b);
            buf.set_sample(x, y, 1, g);
            buf.set_sample(x, y, 2, r);
        }

        let gray = to_gray(&buf).unwrap();
        assert_eq!(gray.channels(), Channels::Gray);
        for (i, &(b, g, r)) in pixels.iter().enumerate() {
            let (x, y) = ((i % 2) as u32, (i / 2) as u32);
            let expected = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8;
            assert_eq!(gray.sample(x, y, 0), expected);
        }
    }

    #[test]
    fn test_to_gray_passthrough_for_gray_input() {
        let buf = uniform_gray(99);
        let gray = to_gray(&buf).unwrap();
        assert_eq!(gray, buf);
    }

    #[test]
    fn test_threshold_uniform_images() {
        let dark = threshold(&uniform_gray(100), 128).unwrap();
        assert!(dark.data().iter().all(|&v| v == 0));
        assert_eq!(dark.width(), 4);
        assert_eq!(dark.height(), 3);
        assert_eq!(dark.channels(), Channels::Gray);

        let bright = threshold(&uniform_gray(200), 128).unwrap();
        assert!(bright.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_threshold_is_strict_greater_than() {
        let at_cutoff = threshold(&uniform_gray(128), 128).unwrap();
        assert!(at_cutoff.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_threshold_out_of_range_cutoffs() {
        let all_white = threshold(&uniform_gray(0), -1).unwrap();
        assert!(all_white.data().iter().all(|&v| v == 255));

        let all_black = threshold(&uniform_gray(255), 999).unwrap();
        assert!(all_black.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_threshold_grayscales_color_input() {
        let mut buf = PixelBuffer::new(1, 1, Channels::Bgr).unwrap();
        buf.set_sample(0, 0, 0, 255);
        buf.set_sample(0, 0, 1, 255);
        buf.set_sample(0, 0, 2, 255);
        let out = threshold(&buf, 128).unwrap();
        assert_eq!(out.channels(), Channels::Gray);
        assert_eq!(out.sample(0, 0, 0), 255);
    }
}
