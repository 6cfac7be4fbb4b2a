//! Per-format scanline operators for the box filter
//!
//! Each filter provides two operations over tightly packed scanlines:
//!
//! - halving a scanline in place, averaging horizontally adjacent pixel
//!   pairs into the front half (a trailing odd pixel is dropped)
//! - averaging two scanlines pixel by pixel into an output scanline
//!
//! The box filter writes its output over the scanlines it has just read, so
//! the averaging operation comes in two flavours: one for a disjoint output
//! and one that accumulates into the first input.

use crate::average::{average_byte, average_pixel_rgb565, average_pixel_rgba8888};

/// Format-specific halving and averaging used by the iterated box filter.
pub trait BoxFilter {
    /// Bytes occupied by one pixel.
    const BYTES_PER_PIXEL: usize;

    /// Average pairs of neighbouring pixels of a `width`-pixel scanline,
    /// packing the `width / 2` results at the start of `pixels`.
    fn halve_scanline_in_place(pixels: &mut [u8], width: usize);

    /// Average `width` pixels of `scanline1` and `scanline2` into `output`.
    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize);

    /// Average `width` pixels of `other` into `accumulator`.
    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize);
}

// ============================================================================
// Byte-component formats
// ============================================================================

/// Halve a scanline whose pixels are `bpp` independent byte components.
#[inline]
fn halve_components(pixels: &mut [u8], width: usize, bpp: usize) {
    debug_assert!(pixels.len() >= width * bpp, "scanline shorter than width");
    for out in 0..width / 2 {
        let left = out * 2 * bpp;
        let right = left + bpp;
        for c in 0..bpp {
            pixels[out * bpp + c] = average_byte(pixels[left + c], pixels[right + c]);
        }
    }
}

#[inline]
fn average_components(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], len: usize) {
    for ((o, &a), &b) in output[..len]
        .iter_mut()
        .zip(&scanline1[..len])
        .zip(&scanline2[..len])
    {
        *o = average_byte(a, b);
    }
}

#[inline]
fn average_components_in_place(accumulator: &mut [u8], other: &[u8], len: usize) {
    for (o, &b) in accumulator[..len].iter_mut().zip(&other[..len]) {
        *o = average_byte(*o, b);
    }
}

/// One byte per pixel (`L8`, `A8`)
#[derive(Debug, Clone, Copy)]
pub struct SingleByte;

impl BoxFilter for SingleByte {
    const BYTES_PER_PIXEL: usize = 1;

    fn halve_scanline_in_place(pixels: &mut [u8], width: usize) {
        halve_components(pixels, width, Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize) {
        average_components(scanline1, scanline2, output, width * Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize) {
        average_components_in_place(accumulator, other, width * Self::BYTES_PER_PIXEL);
    }
}

/// Two independent bytes per pixel (`La88`)
#[derive(Debug, Clone, Copy)]
pub struct ComponentPair;

impl BoxFilter for ComponentPair {
    const BYTES_PER_PIXEL: usize = 2;

    fn halve_scanline_in_place(pixels: &mut [u8], width: usize) {
        halve_components(pixels, width, Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize) {
        average_components(scanline1, scanline2, output, width * Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize) {
        average_components_in_place(accumulator, other, width * Self::BYTES_PER_PIXEL);
    }
}

/// Three bytes per pixel (`Rgb888`)
#[derive(Debug, Clone, Copy)]
pub struct Rgb888;

impl BoxFilter for Rgb888 {
    const BYTES_PER_PIXEL: usize = 3;

    fn halve_scanline_in_place(pixels: &mut [u8], width: usize) {
        halve_components(pixels, width, Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize) {
        average_components(scanline1, scanline2, output, width * Self::BYTES_PER_PIXEL);
    }

    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize) {
        average_components_in_place(accumulator, other, width * Self::BYTES_PER_PIXEL);
    }
}

// ============================================================================
// Word formats
// ============================================================================

#[inline]
fn load_u32(bytes: &[u8], pixel: usize) -> u32 {
    let i = pixel * 4;
    u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
}

#[inline]
fn store_u32(bytes: &mut [u8], pixel: usize, value: u32) {
    bytes[pixel * 4..pixel * 4 + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn load_u16(bytes: &[u8], pixel: usize) -> u16 {
    u16::from_le_bytes([bytes[pixel * 2], bytes[pixel * 2 + 1]])
}

#[inline]
fn store_u16(bytes: &mut [u8], pixel: usize, value: u16) {
    bytes[pixel * 2..pixel * 2 + 2].copy_from_slice(&value.to_le_bytes());
}

/// Four bytes per pixel averaged as one word (`Rgba8888`)
#[derive(Debug, Clone, Copy)]
pub struct Rgba8888;

impl BoxFilter for Rgba8888 {
    const BYTES_PER_PIXEL: usize = 4;

    fn halve_scanline_in_place(pixels: &mut [u8], width: usize) {
        for out in 0..width / 2 {
            let averaged =
                average_pixel_rgba8888(load_u32(pixels, out * 2), load_u32(pixels, out * 2 + 1));
            store_u32(pixels, out, averaged);
        }
    }

    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize) {
        for p in 0..width {
            let averaged = average_pixel_rgba8888(load_u32(scanline1, p), load_u32(scanline2, p));
            store_u32(output, p, averaged);
        }
    }

    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize) {
        for p in 0..width {
            let averaged = average_pixel_rgba8888(load_u32(accumulator, p), load_u32(other, p));
            store_u32(accumulator, p, averaged);
        }
    }
}

/// Packed 16-bit RGB averaged field by field (`Rgb565`)
#[derive(Debug, Clone, Copy)]
pub struct Rgb565;

impl BoxFilter for Rgb565 {
    const BYTES_PER_PIXEL: usize = 2;

    fn halve_scanline_in_place(pixels: &mut [u8], width: usize) {
        for out in 0..width / 2 {
            let averaged =
                average_pixel_rgb565(load_u16(pixels, out * 2), load_u16(pixels, out * 2 + 1));
            store_u16(pixels, out, averaged);
        }
    }

    fn average_scanlines(scanline1: &[u8], scanline2: &[u8], output: &mut [u8], width: usize) {
        for p in 0..width {
            let averaged = average_pixel_rgb565(load_u16(scanline1, p), load_u16(scanline2, p));
            store_u16(output, p, averaged);
        }
    }

    fn average_scanlines_in_place(accumulator: &mut [u8], other: &[u8], width: usize) {
        for p in 0..width {
            let averaged = average_pixel_rgb565(load_u16(accumulator, p), load_u16(other, p));
            store_u16(accumulator, p, averaged);
        }
    }
}
