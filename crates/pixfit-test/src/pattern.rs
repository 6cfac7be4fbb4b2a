//! Synthetic test images
//!
//! "Black" is a pixel with every byte zero and "white" a pixel with every
//! byte 0xff, which is full scale in every format.

use pixfit_core::{PixelBuffer, PixelBufferMut, PixelFormat};

fn build(
    width: u32,
    height: u32,
    format: PixelFormat,
    mut f: impl FnMut(u32, u32, &mut [u8]),
) -> PixelBuffer {
    let mut buf = PixelBufferMut::new(width, height, format).expect("test image size");
    let bpp = format.bytes_per_pixel();
    for y in 0..height {
        let row = buf.row_mut(y);
        for (x, pixel) in row.chunks_exact_mut(bpp).enumerate() {
            f(x as u32, y, pixel);
        }
    }
    buf.into()
}

/// A checkerboard of single black and white pixels, white at (0, 0).
pub fn checkerboard(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
    build(width, height, format, |x, y, px| {
        px.fill(if (x + y) % 2 == 0 { 0xff } else { 0x00 });
    })
}

/// A black image with one white pixel at (`px`, `py`).
pub fn single_pixel(width: u32, height: u32, format: PixelFormat, px: u32, py: u32) -> PixelBuffer {
    build(width, height, format, |x, y, p| {
        p.fill(if x == px && y == py { 0xff } else { 0x00 });
    })
}

/// An image with every pixel set to `value`.
///
/// # Panics
///
/// Panics if `value` is not exactly one pixel wide.
pub fn solid(width: u32, height: u32, format: PixelFormat, value: &[u8]) -> PixelBuffer {
    assert_eq!(value.len(), format.bytes_per_pixel(), "pixel value width");
    build(width, height, format, |_, _, p| p.copy_from_slice(value))
}

/// An image whose pixels encode their own position.
///
/// Pixel (x, y) holds the little-endian bytes of `y * width + x + 1`,
/// truncated to the pixel width. Every pixel is distinct as long as the image
/// has fewer than `256^bpp` pixels, which makes any reordering visible.
pub fn marker_image(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
    build(width, height, format, |x, y, p| {
        let id = (y * width + x + 1).to_le_bytes();
        for (i, b) in p.iter_mut().enumerate() {
            *b = id.get(i).copied().unwrap_or(0);
        }
    })
}

/// Position encoded by [`marker_image`] at pixel bytes `pixel`.
pub fn marker_id(pixel: &[u8]) -> u32 {
    let mut id = [0u8; 4];
    for (dst, src) in id.iter_mut().zip(pixel) {
        *dst = *src;
    }
    u32::from_le_bytes(id)
}

/// A horizontal ramp: each byte of pixel (x, y) holds `x * 255 / (width - 1)`.
pub fn horizontal_ramp(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
    let span = width.saturating_sub(1).max(1);
    build(width, height, format, |x, _, p| {
        p.fill((x * 255 / span) as u8);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard() {
        let buf = checkerboard(2, 2, PixelFormat::Rgb888);
        assert_eq!(buf.data(), &[255, 255, 255, 0, 0, 0, 0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_single_pixel() {
        let buf = single_pixel(3, 3, PixelFormat::L8, 1, 2);
        assert_eq!(buf.data(), &[0, 0, 0, 0, 0, 0, 0, 255, 0]);
    }

    #[test]
    fn test_marker_unique() {
        let buf = marker_image(5, 7, PixelFormat::La88);
        let mut ids: Vec<u32> = buf.data().chunks_exact(2).map(marker_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 35);
        assert_eq!(marker_id(buf.pixel(0, 0).unwrap()), 1);
    }

    #[test]
    fn test_ramp_ends() {
        let buf = horizontal_ramp(4, 1, PixelFormat::L8);
        assert_eq!(buf.data(), &[0, 85, 170, 255]);
    }
}
