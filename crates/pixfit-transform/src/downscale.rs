//! Iterated power-of-two box filter
//!
//! The image is halved in both dimensions, 2x2 pixels at a time, until the
//! next halving would take it below the desired size in the dimensions the
//! [`BoxDimensionTest`] cares about, or would take either side below one
//! pixel. The filter works inside the caller's buffer: output rows are
//! written over the input rows they were computed from, and no other memory
//! is allocated.
//!
//! # Aliasing
//!
//! For output row `y` of a pass, the source rows are `2y` and `2y + 1` of
//! the previous (twice as wide) image. Output row 0 lands exactly on top of
//! source row 0, so it is accumulated in place. Every later output row ends
//! before its first source row starts, so it is written through a disjoint
//! slice.

use crate::request::BoxDimensionTest;
use crate::scanline::{BoxFilter, ComponentPair, Rgb565, Rgb888, Rgba8888, SingleByte};
use crate::TransformResult;
use pixfit_core::{ImageDimensions, PixelBufferMut, PixelFormat};

/// Check whether halving `scaled` once more still satisfies `test`.
///
/// Returns `false` if either halved side would be zero.
///
/// # Examples
///
/// ```
/// use pixfit_transform::{BoxDimensionTest, continue_scaling};
/// use pixfit_core::ImageDimensions;
///
/// let scaled = ImageDimensions::new(8, 4);
/// let desired = ImageDimensions::new(4, 4);
/// assert!(continue_scaling(BoxDimensionTest::X, scaled, desired));
/// assert!(!continue_scaling(BoxDimensionTest::Both, scaled, desired));
/// ```
pub fn continue_scaling(
    test: BoxDimensionTest,
    scaled: ImageDimensions,
    desired: ImageDimensions,
) -> bool {
    let next_width = scaled.width >> 1;
    let next_height = scaled.height >> 1;

    if next_width < 1 || next_height < 1 {
        return false;
    }

    let width_ok = next_width >= desired.width;
    let height_ok = next_height >= desired.height;
    match test {
        BoxDimensionTest::Either => width_ok || height_ok,
        BoxDimensionTest::Both => width_ok && height_ok,
        BoxDimensionTest::X => width_ok,
        BoxDimensionTest::Y => height_ok,
    }
}

/// Box-filter `pixels` in place for pixel layout `F`.
///
/// `pixels` holds an `input`-sized image. Returns the dimensions of the
/// image now packed at the start of `pixels`; bytes past it are garbage.
///
/// # Panics
///
/// Panics if `pixels` is shorter than `input` requires.
pub fn downscale_in_place_pow2<F: BoxFilter>(
    pixels: &mut [u8],
    input: ImageDimensions,
    desired: ImageDimensions,
    test: BoxDimensionTest,
) -> ImageDimensions {
    let bpp = F::BYTES_PER_PIXEL;
    assert!(
        pixels.len() >= input.width as usize * input.height as usize * bpp,
        "pixel data shorter than {input}"
    );

    let mut scaled = input;
    while continue_scaling(test, scaled, desired) {
        let last_width = scaled.width as usize;
        scaled = ImageDimensions::new(scaled.width >> 1, scaled.height >> 1);
        log::debug!("box filter pass to {scaled}");

        let in_span = last_width * bpp;
        let out_width = scaled.width as usize;
        let out_span = out_width * bpp;

        for y in 0..scaled.height as usize {
            let row1 = 2 * y * in_span;
            let row2 = row1 + in_span;

            F::halve_scanline_in_place(&mut pixels[row1..row2], last_width);
            F::halve_scanline_in_place(&mut pixels[row2..row2 + in_span], last_width);

            let out = y * out_span;
            if out == row1 {
                let (head, tail) = pixels.split_at_mut(row2);
                F::average_scanlines_in_place(&mut head[row1..row1 + out_span], tail, out_width);
            } else {
                debug_assert!(out + out_span <= row1, "output row overlaps its sources");
                let (head, tail) = pixels.split_at_mut(row1);
                let (scanline1, scanline2) = tail.split_at(in_span);
                F::average_scanlines(scanline1, scanline2, &mut head[out..], out_width);
            }
        }
    }

    scaled
}

/// Check whether the box filter can average pixels of `format`.
pub fn box_filter_supports(format: PixelFormat) -> bool {
    matches!(
        format,
        PixelFormat::Rgba8888
            | PixelFormat::Rgb888
            | PixelFormat::Rgb565
            | PixelFormat::La88
            | PixelFormat::L8
            | PixelFormat::A8
    )
}

/// Box-filter a buffer in place towards `desired`.
///
/// The buffer is reinterpreted at the reduced size; its allocation is kept.
/// Formats the box filter cannot average are left untouched.
///
/// # Returns
///
/// The final buffer dimensions, never larger than the input.
///
/// # Examples
///
/// ```
/// use pixfit_core::{ImageDimensions, PixelBufferMut, PixelFormat};
/// use pixfit_transform::{BoxDimensionTest, downscale_in_place};
///
/// let mut buf = PixelBufferMut::new(16, 8, PixelFormat::Rgb888).unwrap();
/// let out = downscale_in_place(&mut buf, ImageDimensions::new(4, 4), BoxDimensionTest::Either)
///     .unwrap();
/// assert_eq!(out, ImageDimensions::new(4, 2));
/// assert_eq!(buf.dimensions(), out);
/// ```
pub fn downscale_in_place(
    buf: &mut PixelBufferMut,
    desired: ImageDimensions,
    test: BoxDimensionTest,
) -> TransformResult<ImageDimensions> {
    let input = buf.dimensions();
    let format = buf.format();
    let data = buf.data_mut();

    let output = match format {
        PixelFormat::Rgba8888 => downscale_in_place_pow2::<Rgba8888>(data, input, desired, test),
        PixelFormat::Rgb888 => downscale_in_place_pow2::<Rgb888>(data, input, desired, test),
        PixelFormat::Rgb565 => downscale_in_place_pow2::<Rgb565>(data, input, desired, test),
        PixelFormat::La88 => downscale_in_place_pow2::<ComponentPair>(data, input, desired, test),
        PixelFormat::L8 | PixelFormat::A8 => {
            downscale_in_place_pow2::<SingleByte>(data, input, desired, test)
        }
        PixelFormat::Bgra8888
        | PixelFormat::Rgbx8888
        | PixelFormat::Rgba4444
        | PixelFormat::Rgba5551 => {
            log::debug!("bitmap was not shrunk: unsupported pixel format {format:?}");
            return Ok(input);
        }
    };

    if output != input {
        log::debug!("box filtered {input} to {output} (desired {desired}, {test:?})");
        buf.set_dimensions(output.width, output.height)?;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> ImageDimensions {
        ImageDimensions::new(w, h)
    }

    #[test]
    fn test_continue_scaling_tests() {
        let scaled = dims(8, 8);
        // next is 4x4
        assert!(continue_scaling(BoxDimensionTest::Both, scaled, dims(4, 4)));
        assert!(!continue_scaling(BoxDimensionTest::Both, scaled, dims(4, 5)));
        assert!(continue_scaling(BoxDimensionTest::Either, scaled, dims(4, 5)));
        assert!(!continue_scaling(BoxDimensionTest::Either, scaled, dims(5, 5)));
        assert!(continue_scaling(BoxDimensionTest::X, scaled, dims(4, 100)));
        assert!(!continue_scaling(BoxDimensionTest::X, scaled, dims(5, 1)));
        assert!(continue_scaling(BoxDimensionTest::Y, scaled, dims(100, 4)));
        assert!(!continue_scaling(BoxDimensionTest::Y, scaled, dims(1, 5)));
    }

    #[test]
    fn test_continue_scaling_stops_at_one() {
        assert!(!continue_scaling(BoxDimensionTest::Either, dims(1, 64), dims(0, 0)));
        assert!(!continue_scaling(BoxDimensionTest::Either, dims(64, 1), dims(0, 0)));
        assert!(continue_scaling(BoxDimensionTest::Either, dims(2, 2), dims(0, 0)));
        assert!(!continue_scaling(BoxDimensionTest::Both, dims(0, 0), dims(0, 0)));
    }

    #[test]
    fn test_pow2_single_byte_values() {
        // 4x2 -> 2x1
        let mut pixels = vec![
            0, 4, 8, 12, //
            2, 6, 10, 14,
        ];
        let out = downscale_in_place_pow2::<SingleByte>(
            &mut pixels,
            dims(4, 2),
            dims(2, 1),
            BoxDimensionTest::Both,
        );
        assert_eq!(out, dims(2, 1));
        // Row averages (2, 10) and (4, 12) then vertical (3, 11)
        assert_eq!(&pixels[..2], &[3, 11]);
    }

    #[test]
    fn test_pow2_odd_dimensions_drop_trailing() {
        // 5x3 -> 2x1; column 4 and row 2 are ignored
        let mut pixels = vec![
            10, 10, 20, 20, 255, //
            10, 10, 20, 20, 255, //
            255, 255, 255, 255, 255,
        ];
        let out = downscale_in_place_pow2::<SingleByte>(
            &mut pixels,
            dims(5, 3),
            dims(1, 1),
            BoxDimensionTest::Either,
        );
        assert_eq!(out, dims(2, 1));
        assert_eq!(&pixels[..2], &[10, 20]);
    }

    #[test]
    fn test_pow2_multi_row_output() {
        // 2x4 L8 -> 1x2: output row 1 is written below its sources
        let mut pixels = vec![0, 2, 4, 6, 100, 102, 104, 106];
        let out = downscale_in_place_pow2::<SingleByte>(
            &mut pixels,
            dims(2, 4),
            dims(1, 2),
            BoxDimensionTest::Both,
        );
        assert_eq!(out, dims(1, 2));
        assert_eq!(&pixels[..2], &[3, 103]);
    }

    #[test]
    fn test_downscale_buffer_unsupported_format() {
        let mut buf = PixelBufferMut::new(8, 8, PixelFormat::Bgra8888).unwrap();
        buf.fill(&[1, 2, 3, 4]).unwrap();
        let out = downscale_in_place(&mut buf, dims(2, 2), BoxDimensionTest::Both).unwrap();
        assert_eq!(out, dims(8, 8));
        assert_eq!(buf.dimensions(), dims(8, 8));
        assert!(buf.data().chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn test_downscale_buffer_zero_area() {
        let mut buf = PixelBufferMut::new(0, 8, PixelFormat::L8).unwrap();
        let out = downscale_in_place(&mut buf, dims(1, 1), BoxDimensionTest::Either).unwrap();
        assert_eq!(out, dims(0, 8));
    }

    #[test]
    fn test_downscale_buffer_truncates() {
        let mut buf = PixelBufferMut::new(8, 8, PixelFormat::Rgb565).unwrap();
        let out = downscale_in_place(&mut buf, dims(2, 2), BoxDimensionTest::Both).unwrap();
        assert_eq!(out, dims(2, 2));
        assert_eq!(buf.data().len(), 2 * 2 * 2);
    }
}
