//! JPEG image format support

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use jpeg_encoder::ColorType;
use pixelflow_core::{Channels, PixelBuffer};
use std::io::{Read, Write};

/// Encoder quality for saved JPEGs.
const JPEG_QUALITY: u8 = 90;

/// Read a JPEG image
///
/// Grayscale JPEGs decode to grayscale buffers; color JPEGs decode to
/// BGR.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    match info.pixel_format {
        PixelFormat::L8 => Ok(PixelBuffer::from_raw(
            width,
            height,
            Channels::Gray,
            pixels,
        )?),
        PixelFormat::RGB24 => {
            let mut bgr = Vec::with_capacity(pixels.len());
            for px in pixels.chunks_exact(3) {
                bgr.extend_from_slice(&[px[2], px[1], px[0]]);
            }
            Ok(PixelBuffer::from_raw(width, height, Channels::Bgr, bgr)?)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported JPEG pixel format: {:?}",
            other
        ))),
    }
}

/// Write a JPEG image at quality 90
pub fn write_jpeg<W: Write>(buf: &PixelBuffer, mut writer: W) -> IoResult<()> {
    let width = u16::try_from(buf.width())
        .map_err(|_| IoError::EncodeError("image too wide for JPEG".to_string()))?;
    let height = u16::try_from(buf.height())
        .map_err(|_| IoError::EncodeError("image too tall for JPEG".to_string()))?;

    let color_type = match buf.channels() {
        Channels::Gray => ColorType::Luma,
        Channels::Bgr => ColorType::Bgr,
    };

    let mut encoded: Vec<u8> = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut encoded, JPEG_QUALITY);
    encoder
        .encode(buf.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&encoded)?;
    Ok(())
}
