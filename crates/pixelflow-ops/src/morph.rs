//! Morphological erosion
//!
//! Erosion replaces each pixel with the minimum value in its
//! structuring-element neighborhood, shrinking bright regions and
//! growing dark ones. The product exposes a single structuring element:
//! a 5x5 all-ones brick, applied a caller-chosen number of times with
//! each pass feeding the next.
//!
//! Border handling replicates edge samples; duplicating an edge value
//! never changes a neighborhood minimum, so this is equivalent to
//! ignoring samples outside the image.

use crate::{OpsError, OpsResult};
use pixelflow_core::PixelBuffer;

/// Structuring element half-width (5x5 brick).
const SE_RADIUS: i32 = 2;

/// Erode an image with a 5x5 all-ones structuring element.
///
/// Each channel is eroded independently. `iterations` passes are
/// applied sequentially.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `iterations` is 0.
pub fn erode(buf: &PixelBuffer, iterations: u32) -> OpsResult<PixelBuffer> {
    if iterations == 0 {
        return Err(OpsError::InvalidParameter(
            "erosion iterations must be at least 1".into(),
        ));
    }

    let mut current = erode_once(buf)?;
    for _ in 1..iterations {
        current = erode_once(&current)?;
    }
    Ok(current)
}

fn erode_once(buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let w = buf.width();
    let h = buf.height();
    let channels = buf.channels().count();

    let mut out = PixelBuffer::new(w, h, buf.channels())?;

    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut min = u8::MAX;
                for dy in -SE_RADIUS..=SE_RADIUS {
                    for dx in -SE_RADIUS..=SE_RADIUS {
                        let sx = (x as i32 + dx).clamp(0, w as i32 - 1) as u32;
                        let sy = (y as i32 + dy).clamp(0, h as i32 - 1) as u32;
                        min = min.min(buf.sample(sx, sy, c));
                    }
                }
                out.set_sample(x, y, c, min);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_core::Channels;

    fn bright_spot() -> PixelBuffer {
        // Dark field with a bright 3x3 block in the middle
        let mut buf = PixelBuffer::new(9, 9, Channels::Gray).unwrap();
        for y in 3..6 {
            for x in 3..6 {
                buf.set_sample(x, y, 0, 200);
            }
        }
        buf
    }

    #[test]
    fn test_erode_rejects_zero_iterations() {
        let buf = bright_spot();
        assert!(matches!(
            erode(&buf, 0),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_erode_removes_small_bright_region() {
        // A 3x3 bright block has no pixel whose 5x5 neighborhood is
        // entirely bright, so one pass erases it
        let out = erode(&bright_spot(), 1).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_erode_constant_image_unchanged() {
        let buf = PixelBuffer::from_raw(7, 7, Channels::Gray, vec![130; 49]).unwrap();
        let out = erode(&buf, 3).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_erode_monotone_in_iterations() {
        let mut buf = PixelBuffer::new(12, 12, Channels::Gray).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                buf.set_sample(x, y, 0, ((x * 20 + y * 17) % 256) as u8);
            }
        }
        let once = erode(&buf, 1).unwrap();
        let thrice = erode(&buf, 3).unwrap();
        for (&a, &b) in thrice.data().iter().zip(once.data().iter()) {
            assert!(a <= b);
        }
    }

    #[test]
    fn test_erode_color_per_channel() {
        let mut buf = PixelBuffer::new(6, 6, Channels::Bgr).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                buf.set_sample(x, y, 0, 50);
                buf.set_sample(x, y, 1, 100);
                buf.set_sample(x, y, 2, 150);
            }
        }
        // One darker pixel in the green channel only
        buf.set_sample(3, 3, 1, 10);

        let out = erode(&buf, 1).unwrap();
        assert_eq!(out.sample(3, 3, 0), 50);
        assert_eq!(out.sample(3, 3, 1), 10);
        assert_eq!(out.sample(3, 3, 2), 150);
        // The dark green value spreads over the 5x5 neighborhood
        assert_eq!(out.sample(1, 1, 1), 10);
        assert_eq!(out.sample(5, 5, 1), 10);
    }
}
