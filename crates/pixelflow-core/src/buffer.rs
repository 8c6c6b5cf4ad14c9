//! PixelBuffer - the in-memory raster image
//!
//! # Pixel layout
//!
//! - Samples are unsigned 8-bit, stored row-major with channels
//!   interleaved: `data[(y * width + x) * channels + c]`
//! - Grayscale images have one sample per pixel
//! - Color images have three samples per pixel in BGR order
//!
//! # Ownership model
//!
//! A `PixelBuffer` owns its samples outright. Filter operations take a
//! reference and return a freshly allocated buffer; nothing mutates an
//! input in place. The preview path relies on this: the original buffer
//! stays alive and unmodified while the user re-filters it with
//! different parameters, and `Clone` yields a fully independent copy.

use crate::error::{Error, Result};

/// Sample layout of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// 1 sample per pixel, intensity only
    Gray = 1,
    /// 3 samples per pixel, blue-green-red order
    Bgr = 3,
}

impl Channels {
    /// Create `Channels` from a raw samples-per-pixel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Bgr),
            _ => Err(Error::InvalidChannelCount(count)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// In-memory raster image
///
/// # Examples
///
/// ```
/// use pixelflow_core::{Channels, PixelBuffer};
///
/// let buf = PixelBuffer::new(640, 480, Channels::Gray).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.height(), 480);
/// assert_eq!(buf.data().len(), 640 * 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = Self::sample_len(width, height, channels);
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Create a buffer from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions, or
    /// [`Error::BufferSizeMismatch`] if `data.len()` is not exactly
    /// `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = Self::sample_len(width, height, channels);
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    fn sample_len(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * height as usize * channels.count() as usize
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the sample layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Check whether this is a single-channel image.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.channels == Channels::Gray
    }

    /// Get the number of pixels (ignoring channels).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get read access to the raw samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the raw samples.
    ///
    /// Only the owner of a buffer can reach this; filter operations
    /// use it on their freshly allocated output, never on their input.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get one sample. Coordinates and channel must be in range.
    ///
    /// # Panics
    ///
    /// Panics if `x`, `y`, or `c` is out of bounds (debug-friendly slice
    /// indexing; the operation crates always iterate within bounds).
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: u32) -> u8 {
        let idx = self.sample_index(x, y, c);
        self.data[idx]
    }

    /// Set one sample. Coordinates and channel must be in range.
    #[inline]
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, value: u8) {
        let idx = self.sample_index(x, y, c);
        self.data[idx] = value;
    }

    #[inline]
    fn sample_index(&self, x: u32, y: u32, c: u32) -> usize {
        ((y as usize * self.width as usize + x as usize) * self.channels.count() as usize)
            + c as usize
    }

    /// Get one full row of samples.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * self.channels.count() as usize;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}
