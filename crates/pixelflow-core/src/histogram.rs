//! Intensity histogram helpers
//!
//! Counts pixel value distributions for 8-bit grayscale buffers. These
//! feed histogram equalization and the contrast-related tests.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Number of intensity bins for 8-bit samples.
pub const BINS: usize = 256;

/// Compute the 256-bin intensity histogram of a grayscale buffer.
///
/// Bins are `u64` so counts stay exact for any addressable image size.
///
/// # Errors
///
/// Returns [`Error::UnsupportedChannels`] if the buffer is not
/// single-channel; callers convert to grayscale first.
pub fn intensity_histogram(buf: &PixelBuffer) -> Result<[u64; BINS]> {
    if !buf.is_gray() {
        return Err(Error::UnsupportedChannels(buf.channels().count()));
    }

    let mut hist = [0u64; BINS];
    for &v in buf.data() {
        hist[v as usize] += 1;
    }
    Ok(hist)
}

/// Compute the cumulative distribution of a 256-bin histogram.
///
/// `cdf[v]` is the number of pixels with intensity <= `v`; the mapping
/// is monotonic non-decreasing and `cdf[255]` equals the pixel count.
pub fn cumulative_distribution(hist: &[u64; BINS]) -> [u64; BINS] {
    let mut cdf = [0u64; BINS];
    let mut running = 0u64;
    for (bin, &count) in hist.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }
    cdf
}
