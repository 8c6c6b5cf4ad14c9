//! pixelflow-core - Basic data structures for the filter pipeline
//!
//! This crate provides the fundamental types used throughout pixelflow:
//!
//! - [`PixelBuffer`] - In-memory raster image (owned, row-major u8 samples)
//! - [`Channels`] - Sample layout (grayscale or interleaved BGR)
//! - [`Error`] / [`Result`] - Core error type shared by the operation crates
//! - Intensity histogram and CDF helpers used by histogram equalization

pub mod buffer;
pub mod error;
pub mod histogram;

pub use buffer::{Channels, PixelBuffer};
pub use error::{Error, Result};
pub use histogram::{cumulative_distribution, intensity_histogram};
