//! pixelflow-ops - The filter operation library
//!
//! Pure functions over [`PixelBuffer`](pixelflow_core::PixelBuffer),
//! each returning a newly allocated result:
//!
//! - Grayscale conversion (BT.601 luminance)
//! - Histogram equalization
//! - Gaussian blur (kernel generation + replicate-border convolution)
//! - Laplacian sharpening
//! - Binary thresholding
//! - Morphological erosion (5x5 brick, iterated)
//!
//! None of these touch I/O or global state; parameter validation
//! happens up front and failures surface as [`OpsError`].

pub mod convolve;
mod error;
pub mod enhance;
pub mod gray;
pub mod kernel;
pub mod morph;

pub use error::{OpsError, OpsResult};
pub use kernel::Kernel;

// Re-export the operation entry points
pub use convolve::{convolve, gaussian_blur};
pub use enhance::{equalize_hist, sharpen};
pub use gray::{threshold, to_gray};
pub use morph::erode;
