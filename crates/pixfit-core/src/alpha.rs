//! Alpha usage detection
//!
//! A renderer can skip blending for images whose alpha channel is fully
//! opaque, so the scaling pipeline reports whether alpha is actually used.

use crate::PixelFormat;

/// Check whether any pixel in `data` is not fully opaque.
///
/// A pixel counts as opaque when every bit of its alpha field is set. Formats
/// without an alpha channel always return `false`. A trailing partial pixel
/// is ignored.
///
/// # Examples
///
/// ```
/// use pixfit_core::{PixelFormat, alpha::alpha_used};
///
/// assert!(!alpha_used(&[1, 2, 3, 255, 4, 5, 6, 255], PixelFormat::Rgba8888));
/// assert!(alpha_used(&[1, 2, 3, 255, 4, 5, 6, 254], PixelFormat::Rgba8888));
/// assert!(!alpha_used(&[0, 0, 0], PixelFormat::Rgb888));
/// ```
pub fn alpha_used(data: &[u8], format: PixelFormat) -> bool {
    let Some(alpha) = format.alpha_channel() else {
        return false;
    };
    data.chunks_exact(format.bytes_per_pixel())
        .any(|pixel| pixel[alpha.byte_offset] & alpha.mask != alpha.mask)
}
