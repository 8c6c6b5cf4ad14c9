//! BMP image format support
//!
//! Reads and writes Windows Bitmap (BMP) files without an external
//! codec. Supported variants: uncompressed 24-bit BGR, and 8-bit
//! paletted (a grayscale palette decodes to a grayscale buffer, any
//! other palette expands to BGR). Rows are 4-byte aligned; positive
//! heights are bottom-up, negative heights top-down.

use crate::{IoError, IoResult};
use pixelflow_core::{Channels, PixelBuffer};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<PixelBuffer> {
    // File header (14 bytes)
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = u32::from_le_bytes([
        file_header[10],
        file_header[11],
        file_header[12],
        file_header[13],
    ]) as usize;

    // Info header (minimum 40 bytes)
    let mut info_header = [0u8; 40];
    reader.read_exact(&mut info_header)?;

    let header_size = u32::from_le_bytes([
        info_header[0],
        info_header[1],
        info_header[2],
        info_header[3],
    ]);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let raw_width = i32::from_le_bytes([
        info_header[4],
        info_header[5],
        info_header[6],
        info_header[7],
    ]);
    let raw_height = i32::from_le_bytes([
        info_header[8],
        info_header[9],
        info_header[10],
        info_header[11],
    ]);
    let bit_count = u16::from_le_bytes([info_header[14], info_header[15]]);
    let compression = u32::from_le_bytes([
        info_header[16],
        info_header[17],
        info_header[18],
        info_header[19],
    ]);
    let clr_used = u32::from_le_bytes([
        info_header[32],
        info_header[33],
        info_header[34],
        info_header[35],
    ]);

    if compression != 0 {
        return Err(IoError::UnsupportedFormat(format!(
            "compressed BMP (type {}) not supported",
            compression
        )));
    }
    if raw_width <= 0 || raw_height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid BMP dimensions: {}x{}",
            raw_width, raw_height
        )));
    }

    let width = raw_width as u32;
    let top_down = raw_height < 0;
    let height = raw_height.unsigned_abs();
    let mut consumed = BMP_FILE_HEADER_SIZE + 40;

    // Extended info headers carry fields we don't need
    if header_size > BMP_INFO_HEADER_SIZE {
        skip(&mut reader, (header_size - BMP_INFO_HEADER_SIZE) as usize)?;
        consumed += (header_size - BMP_INFO_HEADER_SIZE) as usize;
    }

    // Palette (8-bit only): BGRA quads, at most 2^8 entries
    let palette = if bit_count == 8 {
        let entries = if clr_used == 0 { 256 } else { clr_used as usize };
        if entries > 256 {
            return Err(IoError::InvalidData(format!(
                "BMP palette too large: {} entries",
                entries
            )));
        }
        let mut raw = vec![0u8; entries * 4];
        reader.read_exact(&mut raw)?;
        consumed += raw.len();
        Some(
            raw.chunks_exact(4)
                .map(|q| [q[0], q[1], q[2]]) // b, g, r
                .collect::<Vec<[u8; 3]>>(),
        )
    } else {
        None
    };

    if pixel_offset < consumed {
        return Err(IoError::InvalidData(
            "BMP pixel data offset overlaps headers".to_string(),
        ));
    }
    skip(&mut reader, pixel_offset - consumed)?;

    match bit_count {
        24 => read_pixels_24(reader, width, height, top_down),
        8 => {
            let palette = palette.unwrap_or_default();
            read_pixels_8(reader, width, height, top_down, &palette)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            other
        ))),
    }
}

fn read_pixels_24<R: Read>(
    mut reader: R,
    width: u32,
    height: u32,
    top_down: bool,
) -> IoResult<PixelBuffer> {
    let stride = row_stride(width, 24);
    let mut row = vec![0u8; stride];
    let mut out = PixelBuffer::new(width, height, Channels::Bgr)?;

    for i in 0..height {
        reader.read_exact(&mut row)?;
        let y = if top_down { i } else { height - 1 - i };
        for x in 0..width {
            let src = x as usize * 3;
            out.set_sample(x, y, 0, row[src]);
            out.set_sample(x, y, 1, row[src + 1]);
            out.set_sample(x, y, 2, row[src + 2]);
        }
    }
    Ok(out)
}

fn read_pixels_8<R: Read>(
    mut reader: R,
    width: u32,
    height: u32,
    top_down: bool,
    palette: &[[u8; 3]],
) -> IoResult<PixelBuffer> {
    let grayscale = !palette.is_empty() && palette.iter().all(|&[b, g, r]| b == g && g == r);
    let stride = row_stride(width, 8);
    let mut row = vec![0u8; stride];

    let channels = if grayscale { Channels::Gray } else { Channels::Bgr };
    let mut out = PixelBuffer::new(width, height, channels)?;

    for i in 0..height {
        reader.read_exact(&mut row)?;
        let y = if top_down { i } else { height - 1 - i };
        for x in 0..width {
            let idx = row[x as usize] as usize;
            let entry = palette.get(idx).copied().unwrap_or([0, 0, 0]);
            if grayscale {
                out.set_sample(x, y, 0, entry[0]);
            } else {
                out.set_sample(x, y, 0, entry[0]);
                out.set_sample(x, y, 1, entry[1]);
                out.set_sample(x, y, 2, entry[2]);
            }
        }
    }
    Ok(out)
}

/// Write a BMP image
///
/// Grayscale buffers write as 8-bit with a 256-entry gray palette,
/// BGR buffers as uncompressed 24-bit. Rows are written bottom-up.
pub fn write_bmp<W: Write>(buf: &PixelBuffer, mut writer: W) -> IoResult<()> {
    let width = buf.width();
    let height = buf.height();

    let (bit_count, palette_size) = match buf.channels() {
        Channels::Gray => (8u16, 256 * 4usize),
        Channels::Bgr => (24u16, 0usize),
    };
    let stride = row_stride(width, bit_count as u32);
    let pixel_offset = BMP_FILE_HEADER_SIZE + 40 + palette_size;
    let file_size = pixel_offset + stride * height as usize;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&(file_size as u32).to_le_bytes())?;
    writer.write_all(&[0u8; 4])?;
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // planes
    writer.write_all(&bit_count.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // BI_RGB
    writer.write_all(&((stride * height as usize) as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // x ppm
    writer.write_all(&0i32.to_le_bytes())?; // y ppm
    writer.write_all(&0u32.to_le_bytes())?; // colors used
    writer.write_all(&0u32.to_le_bytes())?; // colors important

    // Grayscale palette
    if buf.channels() == Channels::Gray {
        for v in 0..=255u8 {
            writer.write_all(&[v, v, v, 0])?;
        }
    }

    // Pixel rows, bottom-up, padded to 4 bytes
    let samples = buf.channels().count() as usize;
    let pad = vec![0u8; stride - width as usize * samples];
    for y in (0..height).rev() {
        writer.write_all(buf.row(y))?;
        writer.write_all(&pad)?;
    }

    Ok(())
}

#[inline]
fn row_stride(width: u32, bits: u32) -> usize {
    ((width as usize * bits as usize).div_ceil(8)).div_ceil(4) * 4
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    std::io::copy(
        &mut reader.by_ref().take(count as u64),
        &mut std::io::sink(),
    )?;
    Ok(())
}
