//! Fitting policies
//!
//! After box filtering, an image is within a factor of two of the desired
//! size but usually has the wrong aspect ratio. This module computes exact
//! fits and cuts or pads buffers to match a [`FittingMode`]:
//!
//! - [`fit_to_scaling_mode`] - uniform scaling that honours the mode
//! - [`crop_for_scale_to_fill`] - centred crop to the desired aspect
//! - [`crop_and_pad_for_fitting_mode`] - centred crop or letterboxing for
//!   every mode
//! - [`calculate_desired_dimensions`] - resolves zero request components

use crate::TransformResult;
use crate::request::FittingMode;
use pixfit_core::{ImageDimensions, PixelBuffer, PixelBufferMut};

/// Value written into letterbox borders.
pub const BORDER_FILL_VALUE: u8 = 0x00;

/// Largest side length produced by crop-and-pad.
pub const MAXIMUM_TARGET_BITMAP_SIZE: u32 = (1 << 16) - 1;

// ============================================================================
// Exact fits
// ============================================================================

fn scale_uniformly(source: ImageDimensions, scale: f64) -> ImageDimensions {
    // Never enlarge
    if scale >= 1.0 {
        return source;
    }
    ImageDimensions::new(
        (f64::from(source.width) * scale + 0.5) as u32,
        (f64::from(source.height) * scale + 0.5) as u32,
    )
}

/// Size of `source` uniformly scaled as `mode` requires to meet `target`.
///
/// - `ShrinkToFit`: the smaller of the two axis scales
/// - `ScaleToFill`: the larger of the two axis scales
/// - `FitWidth` / `FitHeight`: the named axis scale
///
/// The result is never larger than `source` and is rounded to the nearest
/// pixel. A source with a zero side is returned unchanged.
///
/// # Examples
///
/// ```
/// use pixfit_core::ImageDimensions;
/// use pixfit_transform::{FittingMode, fit_to_scaling_mode};
///
/// let fit = fit_to_scaling_mode(
///     ImageDimensions::new(100, 100),
///     ImageDimensions::new(400, 200),
///     FittingMode::ShrinkToFit,
/// );
/// assert_eq!(fit, ImageDimensions::new(100, 50));
/// ```
pub fn fit_to_scaling_mode(
    target: ImageDimensions,
    source: ImageDimensions,
    mode: FittingMode,
) -> ImageDimensions {
    if source.is_empty() {
        return source;
    }
    let width_scale = f64::from(target.width) / f64::from(source.width);
    let height_scale = f64::from(target.height) / f64::from(source.height);
    let scale = match mode {
        FittingMode::ShrinkToFit => width_scale.min(height_scale),
        FittingMode::ScaleToFill => width_scale.max(height_scale),
        FittingMode::FitWidth => width_scale,
        FittingMode::FitHeight => height_scale,
    };
    scale_uniformly(source, scale)
}

// ============================================================================
// ScaleToFill crop
// ============================================================================

/// Crop the centre of `buf` to the aspect ratio of `desired`.
///
/// The desired rectangle is scaled up to touch the buffer edges once by
/// width and once by height; the smaller of the two candidates is the one
/// that fits inside the buffer. Equal numbers of rows (or columns) are then
/// trimmed from both sides.
///
/// Returns `buf` itself when nothing needs trimming, or when `desired` has a
/// zero side (logged as a warning). Otherwise a new buffer is returned.
pub fn crop_for_scale_to_fill(
    buf: PixelBuffer,
    desired: ImageDimensions,
) -> TransformResult<PixelBuffer> {
    let loaded = buf.dimensions();

    if desired.is_empty() {
        log::warn!("image scaling aborted as desired dimensions too small ({desired})");
        return Ok(buf);
    }
    if loaded == desired || loaded.is_empty() {
        return Ok(buf);
    }

    let (dw, dh) = (f64::from(desired.width), f64::from(desired.height));
    let (lw, lh) = (f64::from(loaded.width), f64::from(loaded.height));

    let widths_ratio = lw / dw;
    let by_width = (dw * widths_ratio, dh * widths_ratio);
    let heights_ratio = lh / dh;
    let by_height = (dw * heights_ratio, dh * heights_ratio);

    let trim_top_and_bottom = by_width.0 * by_width.1 < by_height.0 * by_height.1;
    let (scanlines_to_trim, columns_to_trim) = if trim_top_and_bottom {
        (((by_width.1 - lh) * 0.5).abs() as u32, 0)
    } else {
        (0, ((by_height.0 - lw) * 0.5).abs() as u32)
    };

    log::debug!(
        "scale-to-fill: desired {desired}, loaded {loaded}, trimmed ({columns_to_trim}, {scanlines_to_trim})"
    );

    if scanlines_to_trim == 0 && columns_to_trim == 0 {
        return Ok(buf);
    }

    let new_width = loaded.width - 2 * columns_to_trim;
    let new_height = loaded.height - 2 * scanlines_to_trim;
    let bpp = buf.format().bytes_per_pixel();
    let mut cropped = PixelBufferMut::new(new_width, new_height, buf.format())?;

    let in_span = buf.stride();
    let out_span = cropped.stride();
    let src = &buf.data()[scanlines_to_trim as usize * in_span..];

    if trim_top_and_bottom {
        let len = out_span * new_height as usize;
        cropped.data_mut().copy_from_slice(&src[..len]);
    } else {
        let offset = columns_to_trim as usize * bpp;
        for (y, out_row) in cropped.data_mut().chunks_exact_mut(out_span).enumerate() {
            let start = y * in_span + offset;
            out_row.copy_from_slice(&src[start..start + out_span]);
        }
    }

    Ok(cropped.into())
}

// ============================================================================
// Crop and pad
// ============================================================================

/// Geometry of a crop-and-pad operation.
///
/// Positive counts are removed from the source, negative counts are added
/// as borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    /// Final buffer size
    pub target: ImageDimensions,
    /// Rows to remove (positive) or add (negative), split over both sides
    pub scanlines_to_crop: i64,
    /// Columns to remove (positive) or add (negative), split over both sides
    pub columns_to_crop: i64,
}

/// Work out how `source` must be cropped or padded to reach the aspect
/// ratio of `requested` under `mode`.
///
/// The target keeps one source axis and derives the other from the
/// requested aspect, so a source smaller than `requested` is never
/// enlarged, only bordered.
///
/// `requested` and `source` must have no zero side.
pub fn calculate_borders(
    source: ImageDimensions,
    mode: FittingMode,
    requested: ImageDimensions,
) -> Borders {
    debug_assert!(!source.is_empty() && !requested.is_empty());
    let (sw, sh) = (i64::from(source.width), i64::from(source.height));
    let target_aspect = f64::from(requested.width) / f64::from(requested.height);
    let source_aspect = f64::from(source.width) / f64::from(source.height);

    let keep_width = || {
        let h = (f64::from(source.width) / target_aspect) as i64;
        (sw, h, 0, -(h - sh))
    };
    let keep_height = || {
        let w = (f64::from(source.height) * target_aspect) as i64;
        (w, sh, -(w - sw), 0)
    };

    let (width, height, columns_to_crop, scanlines_to_crop) = match mode {
        FittingMode::FitWidth => keep_width(),
        FittingMode::FitHeight => keep_height(),
        FittingMode::ShrinkToFit if source_aspect > target_aspect => keep_width(),
        FittingMode::ShrinkToFit => keep_height(),
        FittingMode::ScaleToFill if source_aspect > target_aspect => keep_height(),
        FittingMode::ScaleToFill => keep_width(),
    };

    let clamp = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
    Borders {
        target: ImageDimensions::new(clamp(width), clamp(height)),
        scanlines_to_crop,
        columns_to_crop,
    }
}

/// Fill the letterbox borders of a `target`-sized image.
///
/// `pad` holds the number of columns and rows to fill. The top (or left)
/// border gets the smaller half of an odd count. Only one axis is padded;
/// rows take precedence.
pub fn add_borders(pixels: &mut [u8], bpp: usize, target: ImageDimensions, pad: ImageDimensions) {
    let out_span = target.width as usize * bpp;
    let height = target.height as usize;

    if pad.height > 0 {
        let top = (pad.height / 2) as usize;
        let bottom = pad.height as usize - top;
        pixels[..top * out_span].fill(BORDER_FILL_VALUE);
        pixels[(height - bottom) * out_span..height * out_span].fill(BORDER_FILL_VALUE);
    } else if pad.width > 0 {
        let left = (pad.width / 2) as usize * bpp;
        let right = (pad.width - pad.width / 2) as usize * bpp;
        for row in pixels.chunks_exact_mut(out_span).take(height) {
            row[..left].fill(BORDER_FILL_VALUE);
            row[out_span - right..].fill(BORDER_FILL_VALUE);
        }
    }
}

/// Crop or letterbox `buf` to the aspect ratio of `desired`.
///
/// Centred rows or columns are cut when the buffer is too large along one
/// axis and zero-filled borders are added when it is too small. The source
/// is never scaled up, so the result can be smaller than `desired` while
/// having its aspect ratio.
///
/// Returns `buf` itself if no change is needed, if `desired` has a zero
/// side, or if the result would exceed [`MAXIMUM_TARGET_BITMAP_SIZE`] on a
/// side; the last two are logged as warnings.
///
/// # Examples
///
/// ```
/// use pixfit_core::{ImageDimensions, PixelBuffer, PixelFormat};
/// use pixfit_transform::{FittingMode, crop_and_pad_for_fitting_mode};
///
/// let buf = PixelBuffer::from_raw(4, 2, PixelFormat::L8, vec![9; 8]).unwrap();
/// let out = crop_and_pad_for_fitting_mode(buf, ImageDimensions::new(4, 4), FittingMode::FitWidth)
///     .unwrap();
/// assert_eq!(out.dimensions(), ImageDimensions::new(4, 4));
/// assert_eq!(out.row(0), &[0, 0, 0, 0]);
/// assert_eq!(out.row(1), &[9, 9, 9, 9]);
/// ```
pub fn crop_and_pad_for_fitting_mode(
    buf: PixelBuffer,
    desired: ImageDimensions,
    mode: FittingMode,
) -> TransformResult<PixelBuffer> {
    let input = buf.dimensions();

    if desired.is_empty() {
        log::warn!("image scaling aborted as desired dimensions too small ({desired})");
        return Ok(buf);
    }
    if input == desired || input.is_empty() {
        return Ok(buf);
    }

    let borders = calculate_borders(input, mode, desired);
    if borders.scanlines_to_crop == 0 && borders.columns_to_crop == 0 {
        return Ok(buf);
    }

    let target = borders.target;
    let scanlines_to_pad = (-borders.scanlines_to_crop).max(0) as u64;
    let columns_to_pad = (-borders.columns_to_crop).max(0) as u64;
    let scanlines_to_crop = borders.scanlines_to_crop.max(0) as usize;
    let columns_to_crop = borders.columns_to_crop.max(0) as usize;

    let limit = u64::from(MAXIMUM_TARGET_BITMAP_SIZE);
    if u64::from(target.width) > limit
        || u64::from(target.height) > limit
        || columns_to_pad > limit
        || scanlines_to_pad > limit
    {
        log::warn!("image scaling aborted as final dimensions too large ({target})");
        return Ok(buf);
    }
    if target.is_empty() {
        log::warn!("image scaling aborted as final dimensions too small ({target})");
        return Ok(buf);
    }

    log::debug!(
        "crop and pad {input} to {target}: crop ({columns_to_crop}, {scanlines_to_crop}), pad ({columns_to_pad}, {scanlines_to_pad})"
    );

    let format = buf.format();
    let bpp = format.bytes_per_pixel();
    let mut out = PixelBufferMut::new(target.width, target.height, format)?;

    let in_span = buf.stride();
    let out_span = out.stride();
    let src_offset = (scanlines_to_crop / 2) * in_span + (columns_to_crop / 2) * bpp;
    let dst_offset = (scanlines_to_pad as usize / 2) * out_span + (columns_to_pad as usize / 2) * bpp;
    let rows_to_copy = target.height as usize - scanlines_to_pad as usize;

    let src = &buf.data()[src_offset..];
    {
        let dst = &mut out.data_mut()[dst_offset..];
        if columns_to_crop == 0 && columns_to_pad == 0 {
            let len = rows_to_copy * out_span;
            dst[..len].copy_from_slice(&src[..len]);
        } else {
            let copy_span = (target.width as usize - columns_to_pad as usize) * bpp;
            for y in 0..rows_to_copy {
                let d = y * out_span;
                let s = y * in_span;
                dst[d..d + copy_span].copy_from_slice(&src[s..s + copy_span]);
            }
        }
    }

    let pad = ImageDimensions::new(columns_to_pad as u32, scanlines_to_pad as u32);
    add_borders(out.data_mut(), bpp, target, pad);
    Ok(out.into())
}

// ============================================================================
// Desired size
// ============================================================================

/// Scale `(long, short)` so that `long` becomes `max`, rounding `short`.
fn clamp_to(long: u32, short: u32, max: u32) -> u32 {
    (f64::from(short) * f64::from(max) / f64::from(long) + 0.5) as u32
}

/// Resolve a requested size against the source and the texture size limit.
///
/// - Both components zero: the source size.
/// - Both components set: the requested size.
/// - One component zero: derived from the other and the source aspect ratio.
///
/// A result larger than `max_texture_size` on either side is shrunk to fit,
/// keeping its aspect ratio. A single requested component is clamped to
/// the limit before the other is derived.
///
/// # Examples
///
/// ```
/// use pixfit_core::ImageDimensions;
/// use pixfit_transform::calculate_desired_dimensions;
///
/// let source = ImageDimensions::new(400, 200);
/// let desired = calculate_desired_dimensions(source, ImageDimensions::new(100, 0), None);
/// assert_eq!(desired, ImageDimensions::new(100, 50));
/// ```
pub fn calculate_desired_dimensions(
    source: ImageDimensions,
    requested: ImageDimensions,
    max_texture_size: Option<u32>,
) -> ImageDimensions {
    let max = max_texture_size.unwrap_or(u32::MAX);

    let fit_max = |dims: ImageDimensions| {
        if dims.width <= max && dims.height <= max {
            dims
        } else if dims.width > dims.height {
            ImageDimensions::new(max, clamp_to(dims.width, dims.height, max))
        } else {
            ImageDimensions::new(clamp_to(dims.height, dims.width, max), max)
        }
    };

    match (requested.width, requested.height) {
        (0, 0) => fit_max(source),
        (w, h) if w != 0 && h != 0 => fit_max(requested),
        _ if source.is_empty() => requested,
        (w, 0) => {
            let w = w.min(max);
            let h = f64::from(source.height) / f64::from(source.width) * f64::from(w) + 0.5;
            ImageDimensions::new(w, h as u32)
        }
        (_, h) => {
            let h = h.min(max);
            let w = f64::from(source.width) / f64::from(source.height) * f64::from(h) + 0.5;
            ImageDimensions::new(w as u32, h)
        }
    }
}
