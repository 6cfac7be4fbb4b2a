//! EXIF orientation correction
//!
//! Cameras record how the sensor was held in an EXIF orientation tag (1-8)
//! rather than rotating the pixels. [`apply_orientation`] reorders a decoded
//! buffer so it displays upright.
//!
//! Every transform except [`Orientation::Identity`] and
//! [`Orientation::FlipHorizontal`] makes one full-size scratch copy of the
//! pixel bytes; the result is written back into the caller's allocation.

use crate::TransformResult;
use pixfit_core::{ImageDimensions, PixelBufferMut};

// ============================================================================
// Orientation codes
// ============================================================================

/// Pixel reordering that makes an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// EXIF 1: already upright
    #[default]
    Identity,
    /// EXIF 2: mirror left-right
    FlipHorizontal,
    /// EXIF 3: rotate by 180 degrees
    Rotate180,
    /// EXIF 4: mirror top-bottom
    FlipVertical,
    /// EXIF 5: reflect across the main diagonal
    Transpose,
    /// EXIF 6: rotate 90 degrees clockwise
    Rotate90,
    /// EXIF 7: reflect across the anti-diagonal
    Transverse,
    /// EXIF 8: rotate 270 degrees clockwise
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation code, or `None` outside 1..=8.
    pub fn try_from_exif(code: u8) -> Option<Self> {
        Some(match code {
            1 => Orientation::Identity,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => return None,
        })
    }

    /// Map an EXIF orientation code.
    ///
    /// Codes outside 1..=8 are logged and treated as
    /// [`Orientation::Identity`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfit_transform::Orientation;
    ///
    /// assert_eq!(Orientation::from_exif(6), Orientation::Rotate90);
    /// assert_eq!(Orientation::from_exif(0), Orientation::Identity);
    /// ```
    pub fn from_exif(code: u8) -> Self {
        Self::try_from_exif(code).unwrap_or_else(|| {
            log::warn!("unknown EXIF orientation {code}, ignoring");
            Orientation::Identity
        })
    }

    /// The EXIF code for this orientation.
    pub fn exif_code(self) -> u8 {
        match self {
            Orientation::Identity => 1,
            Orientation::FlipHorizontal => 2,
            Orientation::Rotate180 => 3,
            Orientation::FlipVertical => 4,
            Orientation::Transpose => 5,
            Orientation::Rotate90 => 6,
            Orientation::Transverse => 7,
            Orientation::Rotate270 => 8,
        }
    }

    /// Check whether the transform exchanges width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90
                | Orientation::Transverse
                | Orientation::Rotate270
        )
    }

    /// The transform that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Rotate90 => Orientation::Rotate270,
            Orientation::Rotate270 => Orientation::Rotate90,
            other => other,
        }
    }

    /// Size of a `source`-sized image after the transform.
    pub fn output_dimensions(self, source: ImageDimensions) -> ImageDimensions {
        if self.swaps_dimensions() {
            source.swapped()
        } else {
            source
        }
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// Reorder the pixels of `buf` according to `orientation`.
///
/// Width and height are exchanged for the transposing orientations. The
/// buffer keeps its allocation and pixel format.
///
/// # Examples
///
/// ```
/// use pixfit_core::{PixelBufferMut, PixelFormat};
/// use pixfit_transform::{Orientation, apply_orientation};
///
/// let mut buf = PixelBufferMut::new(3, 1, PixelFormat::L8).unwrap();
/// buf.data_mut().copy_from_slice(&[1, 2, 3]);
/// apply_orientation(&mut buf, Orientation::Rotate90).unwrap();
/// assert_eq!((buf.width(), buf.height()), (1, 3));
/// assert_eq!(buf.data(), &[1, 2, 3]);
/// ```
pub fn apply_orientation(buf: &mut PixelBufferMut, orientation: Orientation) -> TransformResult<()> {
    if buf.is_empty() {
        return Ok(());
    }
    log::debug!(
        "orientation {:?} on {}x{}",
        orientation,
        buf.width(),
        buf.height()
    );
    match orientation {
        Orientation::Identity => Ok(()),
        Orientation::FlipHorizontal => {
            flip_horizontal_in_place(buf);
            Ok(())
        }
        Orientation::FlipVertical => remap(buf, orientation, |_, h, x, y| (x, h - 1 - y)),
        Orientation::Rotate180 => remap(buf, orientation, |w, h, x, y| (w - 1 - x, h - 1 - y)),
        Orientation::Transpose => remap(buf, orientation, |_, _, x, y| (y, x)),
        Orientation::Rotate90 => remap(buf, orientation, |_, h, x, y| (y, h - 1 - x)),
        Orientation::Transverse => remap(buf, orientation, |w, h, x, y| (w - 1 - y, h - 1 - x)),
        Orientation::Rotate270 => remap(buf, orientation, |w, _, x, y| (w - 1 - y, x)),
    }
}

/// Mirror every row, swapping pixels from both ends.
fn flip_horizontal_in_place(buf: &mut PixelBufferMut) {
    let bpp = buf.format().bytes_per_pixel();
    let width = buf.width() as usize;
    let stride = buf.stride();
    for row in buf.data_mut().chunks_exact_mut(stride) {
        for x in 0..width / 2 {
            let (left, right) = row.split_at_mut((width - 1 - x) * bpp);
            left[x * bpp..(x + 1) * bpp].swap_with_slice(&mut right[..bpp]);
        }
    }
}

/// Write each destination pixel from a scratch copy of the source.
///
/// `source_of(w, h, x, y)` maps destination `(x, y)` to a source position,
/// where `w` and `h` are the source dimensions.
fn remap<F>(buf: &mut PixelBufferMut, orientation: Orientation, source_of: F) -> TransformResult<()>
where
    F: Fn(usize, usize, usize, usize) -> (usize, usize),
{
    let bpp = buf.format().bytes_per_pixel();
    let src_w = buf.width() as usize;
    let src_h = buf.height() as usize;
    let src_stride = buf.stride();
    let scratch = buf.data().to_vec();

    let out = orientation.output_dimensions(buf.dimensions());
    if out != buf.dimensions() {
        buf.set_dimensions(out.width, out.height)?;
    }
    let out_w = out.width as usize;
    let out_stride = buf.stride();

    for (y, row) in buf.data_mut().chunks_exact_mut(out_stride).enumerate() {
        for x in 0..out_w {
            let (sx, sy) = source_of(src_w, src_h, x, y);
            debug_assert!(sx < src_w && sy < src_h);
            let s = sy * src_stride + sx * bpp;
            row[x * bpp..(x + 1) * bpp].copy_from_slice(&scratch[s..s + bpp]);
        }
    }
    Ok(())
}
