//! Convolution kernels
//!
//! Defines the kernel structure used by the blur and sharpen filters.

use crate::{OpsError, OpsResult};

/// A 2D convolution kernel
///
/// Weights are stored row-major; `(cx, cy)` is the anchor aligned with
/// the output pixel during convolution.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from a slice of values, centered.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or if `data` does not hold
    /// exactly `width * height` values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if data.len() != (width as usize) * (height as usize) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Kernel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: data.to_vec(),
        })
    }

    /// Create a normalized 2D Gaussian kernel of the given odd size.
    ///
    /// The standard deviation is derived from the size with the usual
    /// convention `sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8`, which is
    /// what an "automatic sigma" blur call uses. Weights sum to 1, so a
    /// constant image passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or even.
    pub fn gaussian(size: u32) -> OpsResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "gaussian kernel size must be odd and positive, got {}",
                size
            )));
        }

        let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let center = (size / 2) as i32;

        let mut data = Vec::with_capacity((size * size) as usize);
        let mut sum = 0.0f32;
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let dx = (x - center) as f32;
                let dy = (y - center) as f32;
                let w = (-(dx * dx + dy * dy) / two_sigma_sq).exp();
                data.push(w);
                sum += w;
            }
        }
        for w in &mut data {
            *w /= sum;
        }

        Ok(Kernel {
            width: size,
            height: size,
            cx: size / 2,
            cy: size / 2,
            data,
        })
    }

    /// Create the 4-neighbor discrete Laplacian kernel.
    ///
    /// `[0 1 0; 1 -4 1; 0 1 0]` - a second-derivative edge response,
    /// used by the sharpen filter.
    pub fn laplacian() -> Self {
        Kernel {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0],
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get a kernel element, row-major.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }

    /// Sum of all kernel weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_validates() {
        assert!(Kernel::from_slice(3, 3, &[0.0; 9]).is_ok());
        assert!(Kernel::from_slice(3, 3, &[0.0; 8]).is_err());
        assert!(Kernel::from_slice(0, 3, &[]).is_err());
    }

    #[test]
    fn test_gaussian_normalized() {
        for size in [1, 3, 5, 7, 31] {
            let k = Kernel::gaussian(size).unwrap();
            assert_eq!(k.width(), size);
            assert_eq!(k.height(), size);
            assert!((k.sum() - 1.0).abs() < 1e-5, "size {} sum {}", size, k.sum());
        }
    }

    #[test]
    fn test_gaussian_rejects_even_and_zero() {
        assert!(Kernel::gaussian(0).is_err());
        assert!(Kernel::gaussian(4).is_err());
    }

    #[test]
    fn test_gaussian_peak_at_center() {
        let k = Kernel::gaussian(5).unwrap();
        let center = k.get(2, 2);
        for y in 0..5 {
            for x in 0..5 {
                assert!(k.get(x, y) <= center);
            }
        }
    }

    #[test]
    fn test_laplacian_sums_to_zero() {
        let k = Kernel::laplacian();
        assert_eq!(k.width(), 3);
        assert!((k.sum()).abs() < 1e-6);
        assert_eq!(k.get(1, 1), -4.0);
    }
}
