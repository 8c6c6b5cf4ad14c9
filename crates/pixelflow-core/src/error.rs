//! Error types for pixelflow-core
//!
//! Provides a unified error type for buffer construction and the
//! operations built on top of it. Each variant captures enough context
//! for diagnostics without exposing internal representation details.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid number of samples per pixel
    #[error("invalid channel count: {0} (expected 1 or 3)")]
    InvalidChannelCount(u32),

    /// Pixel data length does not match width * height * channels
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Channel layout not supported by this operation
    #[error("unsupported channel count for this operation: {0}")]
    UnsupportedChannels(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
