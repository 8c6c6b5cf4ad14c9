//! pixelflow-io - Boundary image file I/O
//!
//! Decodes image files into [`PixelBuffer`]s and encodes buffers back
//! out. The load path detects the format from the file's magic number;
//! the save path picks the format from the destination extension,
//! defaulting to PNG.
//!
//! Supported formats: PNG, JPEG, BMP.

pub mod bmp;
mod error;
pub mod format;
pub mod jpeg;
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, format_for_path};

use pixelflow_core::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let data = std::fs::read(path)?;
    read_image_from_bytes(&data)
}

/// Read an image from an in-memory encoded file.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<PixelBuffer> {
    match detect_format(data)? {
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        ImageFormat::Bmp => bmp::read_bmp(Cursor::new(data)),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unrecognized image format".to_string(),
        )),
    }
}

/// Write an image to a file path.
///
/// The output format follows the path's extension; missing or
/// unrecognized extensions write PNG.
pub fn write_image<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match format_for_path(path) {
        ImageFormat::Png | ImageFormat::Unknown => png::write_png(buf, writer),
        ImageFormat::Jpeg => jpeg::write_jpeg(buf, writer),
        ImageFormat::Bmp => bmp::write_bmp(buf, writer),
    }
}
