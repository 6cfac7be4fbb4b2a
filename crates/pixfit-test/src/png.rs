//! PNG dump of pixel buffers
//!
//! Only used to look at intermediate results; nothing reads these files back.
//! Every pixel format is widened to 8-bit grayscale, gray+alpha, RGB or RGBA.

use crate::TestResult;
use pixfit_core::{PixelBuffer, PixelFormat, color};
use png::{BitDepth, ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Expand a 4-bit field to 8 bits.
#[inline]
fn expand4(v: u16) -> u8 {
    let v = (v & 0x0f) as u8;
    (v << 4) | v
}

/// Expand a 5-bit field to 8 bits.
#[inline]
fn expand5(v: u16) -> u8 {
    let v = (v & 0x1f) as u8;
    (v << 3) | (v >> 2)
}

/// PNG color type used for a pixel format.
fn color_type_for(format: PixelFormat) -> ColorType {
    match format {
        PixelFormat::A8 | PixelFormat::L8 => ColorType::Grayscale,
        PixelFormat::La88 => ColorType::GrayscaleAlpha,
        PixelFormat::Rgb565 | PixelFormat::Rgb888 | PixelFormat::Rgbx8888 => ColorType::Rgb,
        PixelFormat::Rgba8888
        | PixelFormat::Bgra8888
        | PixelFormat::Rgba4444
        | PixelFormat::Rgba5551 => ColorType::Rgba,
    }
}

/// Convert one pixel to the PNG sample layout, appending to `out`.
fn push_samples(format: PixelFormat, pixel: &[u8], out: &mut Vec<u8>) {
    match format {
        PixelFormat::A8
        | PixelFormat::L8
        | PixelFormat::La88
        | PixelFormat::Rgb888
        | PixelFormat::Rgba8888 => out.extend_from_slice(pixel),
        PixelFormat::Bgra8888 => out.extend_from_slice(&[pixel[2], pixel[1], pixel[0], pixel[3]]),
        PixelFormat::Rgbx8888 => out.extend_from_slice(&pixel[..3]),
        PixelFormat::Rgb565 => out.extend_from_slice(&color::rgb565_to_rgb888(
            color::read_rgb565(pixel),
        )),
        PixelFormat::Rgba4444 => {
            let w = u16::from_le_bytes([pixel[0], pixel[1]]);
            out.extend_from_slice(&[expand4(w >> 12), expand4(w >> 8), expand4(w >> 4), expand4(w)]);
        }
        PixelFormat::Rgba5551 => {
            let w = u16::from_le_bytes([pixel[0], pixel[1]]);
            let a = if w & 1 != 0 { 255 } else { 0 };
            out.extend_from_slice(&[expand5(w >> 11), expand5(w >> 6), expand5(w >> 1), a]);
        }
    }
}

/// Write a buffer as an 8-bit PNG image
///
/// # Errors
///
/// Returns [`TestError::Encode`](crate::TestError::Encode) if the encoder
/// rejects the image, e.g. for a zero-area buffer.
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> TestResult<()> {
    let format = buf.format();
    let color_type = color_type_for(format);

    let mut encoder = Encoder::new(writer, buf.width(), buf.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let samples = color_type.samples();
    let mut data =
        Vec::with_capacity(buf.width() as usize * buf.height() as usize * samples);
    for pixel in buf.data().chunks_exact(format.bytes_per_pixel()) {
        push_samples(format, pixel, &mut data);
    }

    writer.write_image_data(&data)?;
    Ok(())
}

/// Write a buffer to a PNG file at `path`.
pub fn write_png_file<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> TestResult<()> {
    let file = File::create(path)?;
    write_png(buf, BufWriter::new(file))
}
