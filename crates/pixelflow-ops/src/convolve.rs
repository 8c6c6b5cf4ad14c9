//! Convolution operations
//!
//! Implements replicate-border convolution over grayscale and BGR
//! buffers, and the Gaussian blur built on top of it.

use crate::{Kernel, OpsError, OpsResult};
use pixelflow_core::PixelBuffer;

/// Convolve a buffer with a kernel
///
/// Uses replicate (clamp) border handling: samples outside the image
/// boundary take the value of the nearest edge pixel. Each channel is
/// convolved independently; accumulation happens in f32 and the result
/// is rounded and clamped to [0, 255].
pub fn convolve(buf: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    let w = buf.width();
    let h = buf.height();
    let channels = buf.channels().count();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;

    let mut out = PixelBuffer::new(w, h, buf.channels())?;

    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut sum = 0.0f32;

                for ky in 0..kh {
                    for kx in 0..kw {
                        let sx = x as i32 + (kx as i32 - kcx);
                        let sy = y as i32 + (ky as i32 - kcy);

                        // Clamp to image boundaries (replicate border)
                        let sx = sx.clamp(0, w as i32 - 1) as u32;
                        let sy = sy.clamp(0, h as i32 - 1) as u32;

                        sum += buf.sample(sx, sy, c) as f32 * kernel.get(kx, ky);
                    }
                }

                let result = sum.round().clamp(0.0, 255.0) as u8;
                out.set_sample(x, y, c, result);
            }
        }
    }

    Ok(out)
}

/// Apply Gaussian blur with the given kernel size
///
/// `kernel_size` must be odd and positive; even values are rejected
/// here. The pipeline layer is responsible for bumping a stored even
/// slider value to the next odd size before calling in.
///
/// Sigma is derived automatically from the kernel size; see
/// [`Kernel::gaussian`]. Channel count is preserved.
pub fn gaussian_blur(buf: &PixelBuffer, kernel_size: u32) -> OpsResult<PixelBuffer> {
    if kernel_size == 0 {
        return Err(OpsError::InvalidParameter(
            "blur kernel size must be positive".into(),
        ));
    }
    if kernel_size % 2 == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "blur kernel size must be odd, got {}",
            kernel_size
        )));
    }

    let kernel = Kernel::gaussian(kernel_size)?;
    convolve(buf, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_core::Channels;

    fn gradient_gray() -> PixelBuffer {
        let mut buf = PixelBuffer::new(5, 5, Channels::Gray).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                buf.set_sample(x, y, 0, (x * 50 + y * 10) as u8);
            }
        }
        buf
    }

    fn uniform_bgr(b: u8, g: u8, r: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(6, 4, Channels::Bgr).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                buf.set_sample(x, y, 0, b);
                buf.set_sample(x, y, 1, g);
                buf.set_sample(x, y, 2, r);
            }
        }
        buf
    }

    #[test]
    fn test_convolve_identity_kernel() {
        let buf = gradient_gray();
        let kernel = Kernel::from_slice(1, 1, &[1.0]).unwrap();
        let result = convolve(&buf, &kernel).unwrap();
        assert_eq!(result, buf);
    }

    #[test]
    fn test_blur_preserves_dimensions_and_channels() {
        let buf = uniform_bgr(10, 20, 30);
        let blurred = gaussian_blur(&buf, 5).unwrap();
        assert_eq!(blurred.width(), buf.width());
        assert_eq!(blurred.height(), buf.height());
        assert_eq!(blurred.channels(), Channels::Bgr);
    }

    #[test]
    fn test_blur_of_constant_field_is_identity() {
        let buf = uniform_bgr(77, 128, 200);
        let blurred = gaussian_blur(&buf, 7).unwrap();
        assert_eq!(blurred, buf);
    }

    #[test]
    fn test_blur_rejects_even_and_zero_size() {
        let buf = gradient_gray();
        assert!(matches!(
            gaussian_blur(&buf, 4),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(matches!(
            gaussian_blur(&buf, 0),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_blur_smooths_gradient() {
        // Interior pixels of a blurred step edge move toward the mean
        let mut buf = PixelBuffer::new(6, 1, Channels::Gray).unwrap();
        for x in 0..6 {
            buf.set_sample(x, 0, 0, if x < 3 { 0 } else { 255 });
        }
        let blurred = gaussian_blur(&buf, 3).unwrap();
        let left_of_edge = blurred.sample(2, 0, 0);
        let right_of_edge = blurred.sample(3, 0, 0);
        assert!(left_of_edge > 0);
        assert!(right_of_edge < 255);
    }
}
