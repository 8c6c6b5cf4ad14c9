//! Image enhancement operations
//!
//! Histogram equalization and Laplacian sharpening.

use crate::gray::to_gray;
use crate::{Kernel, OpsError, OpsResult};
use pixelflow_core::{PixelBuffer, cumulative_distribution, intensity_histogram};

/// Equalize the intensity histogram of an image.
///
/// Multi-channel input is converted to grayscale first. Each pixel is
/// remapped through the cumulative distribution of the 256-bin
/// intensity histogram:
///
/// `new = round((cdf[v] - cdf_min) / (n - cdf_min) * 255)`
///
/// where `cdf_min` is the CDF value of the lowest occurring intensity.
/// The mapping is monotonic non-decreasing and stretches the occupied
/// intensity range to the full [0, 255] span. A constant image maps to
/// itself.
pub fn equalize_hist(buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let gray = to_gray(buf)?;

    let hist = intensity_histogram(&gray)?;
    let cdf = cumulative_distribution(&hist);
    let n = gray.pixel_count() as u64;

    // CDF value of the darkest occupied bin
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);

    if n == cdf_min {
        // Single occupied bin: equalization is the identity
        return Ok(gray);
    }

    let scale = 255.0 / (n - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        let mapped = (cdf[v].saturating_sub(cdf_min)) as f64 * scale;
        *entry = mapped.round().clamp(0.0, 255.0) as u8;
    }

    let mut out = PixelBuffer::new(gray.width(), gray.height(), gray.channels())?;
    for (&v, dst) in gray.data().iter().zip(out.data_mut().iter_mut()) {
        *dst = lut[v as usize];
    }
    Ok(out)
}

/// Sharpen an image by subtracting a scaled Laplacian.
///
/// The 4-neighbor Laplacian is computed per channel in f32 (no
/// intermediate clamping), then `clamp(v - strength * lap, 0, 255)` is
/// rounded back to 8 bits. Strength 0 returns the original image;
/// larger values increase edge contrast. Overflow clamps, never wraps.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `strength` is negative or
/// not finite.
pub fn sharpen(buf: &PixelBuffer, strength: f32) -> OpsResult<PixelBuffer> {
    if !strength.is_finite() || strength < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "sharpen strength must be finite and non-negative, got {}",
            strength
        )));
    }

    let w = buf.width();
    let h = buf.height();
    let channels = buf.channels().count();
    let kernel = Kernel::laplacian();
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;

    let mut out = PixelBuffer::new(w, h, buf.channels())?;

    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut lap = 0.0f32;
                for ky in 0..kernel.height() {
                    for kx in 0..kernel.width() {
                        let sx = (x as i32 + kx as i32 - kcx).clamp(0, w as i32 - 1) as u32;
                        let sy = (y as i32 + ky as i32 - kcy).clamp(0, h as i32 - 1) as u32;
                        lap += buf.sample(sx, sy, c) as f32 * kernel.get(kx, ky);
                    }
                }

                let v = buf.sample(x, y, c) as f32 - strength * lap;
                out.set_sample(x, y, c, v.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    Ok(out)
}
