//! Load-time scaling pipeline
//!
//! [`apply_attributes`] takes a freshly decoded buffer and a
//! [`ScalingRequest`] and runs, in order:
//!
//! 1. desired-size resolution ([`calculate_desired_dimensions`])
//! 2. the iterated box filter, when the filter mode allows it, the format is
//!    supported and the image is larger than desired
//! 3. an optional nearest or bilinear pass down to the exact fit
//! 4. crop (ScaleToFill) or crop-and-pad (`pad_to_desired`)
//! 5. the alpha-usage scan
//!
//! The returned buffer is the input object when no stage changed anything
//! and a different one otherwise; use [`PixelBuffer::ptr_eq`] to tell.

use crate::downscale::{box_filter_supports, continue_scaling, downscale_in_place};
use crate::fit::{
    calculate_desired_dimensions, crop_and_pad_for_fitting_mode, crop_for_scale_to_fill,
    fit_to_scaling_mode,
};
use crate::orientation::{Orientation, apply_orientation};
use crate::request::{FittingMode, ScalingRequest};
use crate::sample::resample;
use crate::TransformResult;
use pixfit_core::{ImageDimensions, PixelBuffer, PixelFormat};

/// Output of the pipeline, ready for upload
#[derive(Debug, Clone)]
pub struct ScaledImage {
    /// Final pixels
    pub buffer: PixelBuffer,
    /// Whether any pixel is less than fully opaque
    pub alpha_used: bool,
}

impl ScaledImage {
    fn new(buffer: PixelBuffer) -> Self {
        let alpha_used = buffer.uses_alpha();
        Self { buffer, alpha_used }
    }

    /// Final image size.
    pub fn dimensions(&self) -> ImageDimensions {
        self.buffer.dimensions()
    }

    /// Pixel format, always the decoder's.
    pub fn format(&self) -> PixelFormat {
        self.buffer.format()
    }
}

/// What a decoder hands over
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Decoded pixels
    pub buffer: PixelBuffer,
    /// Raw EXIF orientation code, if the file carried one
    pub orientation: Option<u8>,
}

impl DecodedImage {
    /// Wrap a buffer with no orientation tag.
    pub fn new(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            orientation: None,
        }
    }

    /// Attach an EXIF orientation code.
    pub fn with_orientation(mut self, code: u8) -> Self {
        self.orientation = Some(code);
        self
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Shrink and fit a decoded buffer as `request` describes, then scan alpha.
///
/// Orientation is not handled here; see [`process_decoded`].
///
/// # Examples
///
/// ```
/// use pixfit_core::{ImageDimensions, PixelBuffer, PixelFormat};
/// use pixfit_transform::{FittingMode, ScalingRequest, apply_attributes};
///
/// let buf = PixelBuffer::new(8, 4, PixelFormat::Rgb888).unwrap();
/// let request = ScalingRequest::new(4, 4).fitting_mode(FittingMode::ScaleToFill);
/// let image = apply_attributes(buf, &request).unwrap();
/// assert_eq!(image.dimensions(), ImageDimensions::new(4, 4));
/// assert!(!image.alpha_used);
/// ```
pub fn apply_attributes(
    buf: PixelBuffer,
    request: &ScalingRequest,
) -> TransformResult<ScaledImage> {
    let input = buf.dimensions();
    if input.is_empty() {
        log::debug!("empty {input} bitmap passed through");
        return Ok(ScaledImage::new(buf));
    }

    let desired =
        calculate_desired_dimensions(input, request.desired(), request.max_texture_size);

    let buf = if !desired.is_empty()
        && (desired.width < input.width || desired.height < input.height)
    {
        downscale(buf, desired, request)?
    } else {
        buf
    };

    let buf = if request.pad_to_desired {
        crop_and_pad_for_fitting_mode(buf, desired, request.fitting_mode)?
    } else if request.fitting_mode == FittingMode::ScaleToFill {
        crop_for_scale_to_fill(buf, desired)?
    } else {
        buf
    };

    Ok(ScaledImage::new(buf))
}

/// Box filter, then the optional sampling pass.
fn downscale(
    buf: PixelBuffer,
    desired: ImageDimensions,
    request: &ScalingRequest,
) -> TransformResult<PixelBuffer> {
    let test = request.fitting_mode.dimension_test();
    let format = buf.format();
    let mut buf = buf;

    if request.filter_mode.uses_box() {
        if !box_filter_supports(format) {
            log::debug!("bitmap was not shrunk: unsupported pixel format {format:?}");
        } else if continue_scaling(test, buf.dimensions(), desired) {
            let mut shrinking = buf.into_mut();
            downscale_in_place(&mut shrinking, desired, test)?;
            buf = shrinking.into();
        }
    }

    if let Some(pass) = request.filter_mode.secondary() {
        let shrunk = buf.dimensions();
        let fit = fit_to_scaling_mode(desired, shrunk, request.fitting_mode);
        if !fit.is_empty() && (fit.width < shrunk.width || fit.height < shrunk.height) {
            log::debug!("{pass:?} sampling {shrunk} to {fit}");
            buf = resample(&buf, fit, pass)?;
        }
    }

    Ok(buf)
}

/// Correct orientation, then run [`apply_attributes`].
///
/// The orientation tag is ignored when
/// [`ScalingRequest::orientation_correction`] is off. The request size
/// applies to the upright image.
pub fn process_decoded(
    decoded: DecodedImage,
    request: &ScalingRequest,
) -> TransformResult<ScaledImage> {
    let DecodedImage {
        mut buffer,
        orientation,
    } = decoded;

    if let Some(code) = orientation.filter(|_| request.orientation_correction) {
        let orientation = Orientation::from_exif(code);
        if orientation != Orientation::Identity && !buffer.is_empty() {
            let mut upright = buffer.into_mut();
            apply_orientation(&mut upright, orientation)?;
            buffer = upright.into();
        }
    }

    apply_attributes(buffer, request)
}
