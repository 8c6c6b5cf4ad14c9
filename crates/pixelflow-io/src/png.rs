//! PNG image format support

use crate::{IoError, IoResult};
use pixelflow_core::{Channels, PixelBuffer};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palette, sub-byte, and 16-bit inputs are normalized to 8-bit color
/// by the decoder; gray and gray-alpha decode to grayscale buffers,
/// RGB and RGBA to BGR (alpha is dropped).
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let data = &buf[..output_info.buffer_size()];
    let line_size = output_info.line_size;

    match output_info.color_type {
        ColorType::Grayscale => {
            rows_to_buffer(width, height, Channels::Gray, data, line_size, 1, |px, out| {
                out.push(px[0]);
            })
        }
        ColorType::GrayscaleAlpha => {
            rows_to_buffer(width, height, Channels::Gray, data, line_size, 2, |px, out| {
                out.push(px[0]);
            })
        }
        ColorType::Rgb => {
            rows_to_buffer(width, height, Channels::Bgr, data, line_size, 3, |px, out| {
                out.extend_from_slice(&[px[2], px[1], px[0]]);
            })
        }
        ColorType::Rgba => {
            rows_to_buffer(width, height, Channels::Bgr, data, line_size, 4, |px, out| {
                out.extend_from_slice(&[px[2], px[1], px[0]]);
            })
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG color type after normalization: {:?}",
            other
        ))),
    }
}

fn rows_to_buffer(
    width: u32,
    height: u32,
    channels: Channels,
    data: &[u8],
    line_size: usize,
    src_samples: usize,
    mut emit: impl FnMut(&[u8], &mut Vec<u8>),
) -> IoResult<PixelBuffer> {
    let mut samples =
        Vec::with_capacity(width as usize * height as usize * channels.count() as usize);
    for y in 0..height as usize {
        let row = &data[y * line_size..y * line_size + width as usize * src_samples];
        for px in row.chunks_exact(src_samples) {
            emit(px, &mut samples);
        }
    }
    Ok(PixelBuffer::from_raw(width, height, channels, samples)?)
}

/// Write a PNG image
///
/// Grayscale buffers encode as 8-bit grayscale, BGR buffers as 8-bit
/// RGB.
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, buf.width(), buf.height());
    encoder.set_depth(BitDepth::Eight);

    let data = match buf.channels() {
        Channels::Gray => {
            encoder.set_color(ColorType::Grayscale);
            buf.data().to_vec()
        }
        Channels::Bgr => {
            encoder.set_color(ColorType::Rgb);
            let mut rgb = Vec::with_capacity(buf.data().len());
            for px in buf.data().chunks_exact(3) {
                rgb.extend_from_slice(&[px[2], px[1], px[0]]);
            }
            rgb
        }
    };

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_round_trip_gray() {
        let original =
            PixelBuffer::from_raw(3, 2, Channels::Gray, vec![0, 50, 100, 150, 200, 250]).unwrap();

        let mut encoded = Vec::new();
        write_png(&original, &mut encoded).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_png_round_trip_bgr() {
        let mut original = PixelBuffer::new(2, 2, Channels::Bgr).unwrap();
        original.set_sample(0, 0, 0, 255);
        original.set_sample(1, 0, 1, 128);
        original.set_sample(0, 1, 2, 64);

        let mut encoded = Vec::new();
        write_png(&original, &mut encoded).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_png_read_rejects_garbage() {
        let result = read_png(Cursor::new(vec![1u8, 2, 3, 4, 5, 6, 7, 8]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
