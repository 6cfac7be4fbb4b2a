//! Nearest and bilinear resampling
//!
//! Both samplers step through the output in whole pixels while tracking the
//! matching input position in 16.16 fixed point. They run after the box
//! filter to go from a power-of-two reduction to the exact fitted size.

use crate::request::SamplingPass;
use crate::{TransformError, TransformResult};
use pixfit_core::{ImageDimensions, PixelBuffer, PixelBufferMut, PixelFormat, color};

/// 16.16 fixed-point step from one output pixel to the next.
#[inline]
fn fixed_delta(input: u32, output: u32) -> u64 {
    (u64::from(input) << 16) / u64::from(output)
}

/// Nearest-neighbour resample of packed `bpp`-byte pixels.
///
/// Works for any pixel format, since pixels are copied whole.
/// Does nothing if either size has a zero side.
///
/// # Panics
///
/// Panics if `input_pixels` or `output_pixels` is too short for its size.
pub fn point_sample(
    input_pixels: &[u8],
    input: ImageDimensions,
    bpp: usize,
    output_pixels: &mut [u8],
    desired: ImageDimensions,
) {
    if input.is_empty() || desired.is_empty() {
        return;
    }
    let in_span = input.width as usize * bpp;
    let out_span = desired.width as usize * bpp;
    let delta_x = fixed_delta(input.width, desired.width);
    let delta_y = fixed_delta(input.height, desired.height);
    let max_x = u64::from(input.width - 1);
    let max_y = u64::from(input.height - 1);

    let mut in_y = 0u64;
    for out_row in output_pixels.chunks_exact_mut(out_span).take(desired.height as usize) {
        // Round to the nearest input row
        let y = ((in_y + (1 << 15)) >> 16).min(max_y) as usize;
        let in_row = &input_pixels[y * in_span..(y + 1) * in_span];

        let mut in_x = 0u64;
        for out_pixel in out_row.chunks_exact_mut(bpp) {
            let x = ((in_x + (1 << 15)) >> 16).min(max_x) as usize;
            out_pixel.copy_from_slice(&in_row[x * bpp..(x + 1) * bpp]);
            in_x += delta_x;
        }
        in_y += delta_y;
    }
}

/// Blend four samples with 0.16 fixed-point horizontal and vertical weights.
///
/// Rounds to nearest. A uniform neighbourhood blends to itself.
#[inline]
pub fn bilinear_component(tl: u32, tr: u32, bl: u32, br: u32, fx: u32, fy: u32) -> u32 {
    debug_assert!(fx < 65536 && fy < 65536, "weights are 0.16 fixed point");
    let (fx, fy) = (u64::from(fx), u64::from(fy));
    let top = u64::from(tl) * (65536 - fx) + u64::from(tr) * fx;
    let bottom = u64::from(bl) * (65536 - fx) + u64::from(br) * fx;
    let blended = top * (65536 - fy) + bottom * fy;
    ((blended + (1 << 31)) >> 32) as u32
}

/// How one pixel of a format is blended.
#[derive(Clone, Copy)]
enum Blend {
    /// `n` independent byte components
    Bytes(usize),
    /// RGB565 bit fields
    Rgb565,
}

impl Blend {
    fn for_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Rgb565 => Some(Blend::Rgb565),
            PixelFormat::Rgba4444 | PixelFormat::Rgba5551 => None,
            other => Some(Blend::Bytes(other.bytes_per_pixel())),
        }
    }

    /// Blend `[top-left, top-right, bottom-left, bottom-right]` into `out`.
    #[inline]
    fn apply(self, [tl, tr, bl, br]: [&[u8]; 4], fx: u32, fy: u32, out: &mut [u8]) {
        match self {
            Blend::Bytes(n) => {
                for c in 0..n {
                    let v = bilinear_component(
                        u32::from(tl[c]),
                        u32::from(tr[c]),
                        u32::from(bl[c]),
                        u32::from(br[c]),
                        fx,
                        fy,
                    );
                    out[c] = v as u8;
                }
            }
            Blend::Rgb565 => {
                let (r1, g1, b1) = color::rgb565_components(color::read_rgb565(tl));
                let (r2, g2, b2) = color::rgb565_components(color::read_rgb565(tr));
                let (r3, g3, b3) = color::rgb565_components(color::read_rgb565(bl));
                let (r4, g4, b4) = color::rgb565_components(color::read_rgb565(br));
                let field = |a: u8, b: u8, c: u8, d: u8| {
                    bilinear_component(a.into(), b.into(), c.into(), d.into(), fx, fy) as u8
                };
                let word = color::compose_rgb565(
                    field(r1, r2, r3, r4),
                    field(g1, g2, g3, g4),
                    field(b1, b2, b3, b4),
                );
                out[..2].copy_from_slice(&word.to_le_bytes());
            }
        }
    }
}

/// Bilinear resample.
///
/// Samples past the last row or column reuse the last row or column.
/// Does nothing if either size has a zero side.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedFormat`] for `Rgba4444` and
/// `Rgba5551`, whose 4- and 5-bit fields are not blended.
pub fn linear_sample(
    input_pixels: &[u8],
    input: ImageDimensions,
    format: PixelFormat,
    output_pixels: &mut [u8],
    desired: ImageDimensions,
) -> TransformResult<()> {
    let blend = Blend::for_format(format).ok_or(TransformError::UnsupportedFormat(format))?;
    if input.is_empty() || desired.is_empty() {
        return Ok(());
    }

    let bpp = format.bytes_per_pixel();
    let in_span = input.width as usize * bpp;
    let out_span = desired.width as usize * bpp;
    let delta_x = fixed_delta(input.width, desired.width);
    let delta_y = fixed_delta(input.height, desired.height);
    let last_x = input.width as usize - 1;
    let last_y = input.height as usize - 1;

    let px = |x: usize| x * bpp..(x + 1) * bpp;

    let mut in_y = 0u64;
    for out_row in output_pixels.chunks_exact_mut(out_span).take(desired.height as usize) {
        let y1 = ((in_y >> 16) as usize).min(last_y);
        let y2 = (y1 + 1).min(last_y);
        let fy = (in_y & 0xffff) as u32;
        let row1 = &input_pixels[y1 * in_span..(y1 + 1) * in_span];
        let row2 = &input_pixels[y2 * in_span..(y2 + 1) * in_span];

        let mut in_x = 0u64;
        for out_pixel in out_row.chunks_exact_mut(bpp) {
            let x1 = ((in_x >> 16) as usize).min(last_x);
            let x2 = (x1 + 1).min(last_x);
            let fx = (in_x & 0xffff) as u32;
            let corners = [&row1[px(x1)], &row1[px(x2)], &row2[px(x1)], &row2[px(x2)]];
            blend.apply(corners, fx, fy, out_pixel);
            in_x += delta_x;
        }
        in_y += delta_y;
    }
    Ok(())
}

/// Resample a buffer into a newly allocated one of size `desired`.
///
/// A linear pass over a format it cannot blend falls back to nearest
/// sampling.
pub fn resample(
    buf: &PixelBuffer,
    desired: ImageDimensions,
    pass: SamplingPass,
) -> TransformResult<PixelBuffer> {
    let format = buf.format();
    let mut out = PixelBufferMut::new(desired.width, desired.height, format)?;

    if pass == SamplingPass::Linear {
        match linear_sample(buf.data(), buf.dimensions(), format, out.data_mut(), desired) {
            Ok(()) => return Ok(out.into()),
            Err(TransformError::UnsupportedFormat(_)) => {
                log::debug!("no linear filter for {format:?}, sampling nearest instead");
            }
            Err(e) => return Err(e),
        }
    }

    point_sample(
        buf.data(),
        buf.dimensions(),
        format.bytes_per_pixel(),
        out.data_mut(),
        desired,
    );
    Ok(out.into())
}
