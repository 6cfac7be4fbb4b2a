//! Pixel buffers
//!
//! The buffer types carry decoded pixels between the decoder, the scaling
//! stages and the renderer.
//!
//! # Pixel layout
//!
//! - Bytes are tightly packed, row-major, with no row padding
//! - Row `y` starts at byte `y * width * bytes_per_pixel`
//! - Any texture-size rounding is the renderer's concern
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared, read-only ownership).
//! To modify pixels, convert to `PixelBufferMut` via
//! [`PixelBuffer::try_into_mut`] (no copy when the handle is unique) or
//! [`PixelBuffer::to_mut`] (always copies), then convert back with
//! `Into<PixelBuffer>`.
//!
//! A `PixelBufferMut` is exclusively owned by one thread for as long as it
//! exists. In-place stages such as the box filter overwrite it progressively;
//! once such a stage has run, only the bytes covered by the new
//! [`width`](PixelBufferMut::width) x [`height`](PixelBufferMut::height) are
//! meaningful, even though the allocation is reused.

use crate::error::{Error, Result};
use crate::{ImageDimensions, PixelFormat};
use std::sync::Arc;

/// Internal buffer data
#[derive(Debug, Clone, PartialEq, Eq)]
struct BufferData {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl BufferData {
    fn zeroed(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = byte_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0u8; len],
        })
    }

    #[inline]
    fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.stride() + x as usize * self.format.bytes_per_pixel())
    }
}

/// Byte length of a `width` x `height` image in `format`.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if the size overflows `usize`.
pub fn byte_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
        .ok_or(Error::InvalidDimension { width, height })
}

/// Immutable pixel buffer
///
/// # Examples
///
/// ```
/// use pixfit_core::{PixelBuffer, PixelFormat};
///
/// let buf = PixelBuffer::new(64, 32, PixelFormat::Rgb888).unwrap();
/// assert_eq!(buf.width(), 64);
/// assert_eq!(buf.data().len(), 64 * 32 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// Zero-area buffers are allowed; every stage treats them as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the byte size overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(BufferData::zeroed(width, height, format)?),
        })
    }

    /// Wrap bytes produced by a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` is not exactly
    /// `width * height * bytes_per_pixel`.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, format)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                format,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            inner: Arc::new(BufferData {
                width,
                height,
                format,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.inner.width, self.inner.height)
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    /// Check whether the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Get raw access to the pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.inner.height, "row {y} out of range");
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Get the bytes of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let offset = self.inner.pixel_offset(x, y).ok()?;
        Some(&self.inner.data[offset..offset + self.format().bytes_per_pixel()])
    }

    /// Get the number of strong references to this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two handles refer to the same buffer object.
    #[inline]
    pub fn ptr_eq(&self, other: &PixelBuffer) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check whether two buffers hold identical pixels.
    pub fn equals(&self, other: &PixelBuffer) -> bool {
        self.inner == other.inner
    }

    /// Check whether any pixel is not fully opaque.
    ///
    /// Always `false` for formats without an alpha channel.
    pub fn uses_alpha(&self) -> bool {
        crate::alpha::alpha_used(self.data(), self.format())
    }

    /// Create an independent copy.
    pub fn deep_clone(&self) -> Self {
        Self {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access without copying.
    ///
    /// Succeeds only if this is the only handle to the buffer.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixelBufferMut { inner }),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// Get mutable access, copying only if the buffer is shared.
    pub fn into_mut(self) -> PixelBufferMut {
        match self.try_into_mut() {
            Ok(buf) => buf,
            Err(shared) => shared.to_mut(),
        }
    }

    /// Create a mutable copy.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Take the pixel bytes, copying only if the buffer is shared.
    pub fn into_raw(self) -> Vec<u8> {
        self.into_mut().into_raw()
    }
}

/// Mutable pixel buffer
///
/// Exclusive ownership is enforced at compile time: a stage holding
/// `&mut PixelBufferMut` is the only reader and writer for the duration of the
/// call.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Create a zero-filled mutable buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the byte size overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(Self {
            inner: BufferData::zeroed(width, height, format)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.inner.width, self.inner.height)
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Get raw access to the pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the pixel bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.inner.height, "row {y} out of range");
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Get the bytes of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let offset = self.inner.pixel_offset(x, y).ok()?;
        Some(&self.inner.data[offset..offset + self.format().bytes_per_pixel()])
    }

    /// Overwrite the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for coordinates outside the image
    /// and [`Error::PixelSizeMismatch`] if `value` is not one pixel wide.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        let bpp = self.format().bytes_per_pixel();
        if value.len() != bpp {
            return Err(Error::PixelSizeMismatch {
                format: self.format(),
                expected: bpp,
                actual: value.len(),
            });
        }
        let offset = self.inner.pixel_offset(x, y)?;
        self.inner.data[offset..offset + bpp].copy_from_slice(value);
        Ok(())
    }

    /// Set every pixel to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelSizeMismatch`] if `value` is not one pixel wide.
    pub fn fill(&mut self, value: &[u8]) -> Result<()> {
        let bpp = self.format().bytes_per_pixel();
        if value.len() != bpp {
            return Err(Error::PixelSizeMismatch {
                format: self.format(),
                expected: bpp,
                actual: value.len(),
            });
        }
        for pixel in self.inner.data.chunks_exact_mut(bpp) {
            pixel.copy_from_slice(value);
        }
        Ok(())
    }

    /// Reinterpret the leading bytes as a `width` x `height` image.
    ///
    /// Used after an in-place stage has packed a smaller (or transposed)
    /// image at the start of the allocation. Trailing bytes are dropped; the
    /// allocation itself is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotGrow`] if the new shape needs more bytes than
    /// the buffer currently holds.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        let len = byte_len(width, height, self.format())?;
        if len > self.inner.data.len() {
            return Err(Error::CannotGrow {
                width,
                height,
                capacity: self.inner.data.len(),
            });
        }
        self.inner.data.truncate(len);
        self.inner.width = width;
        self.inner.height = height;
        Ok(())
    }

    /// Take the pixel bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.inner.data
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(buf.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        let err = PixelBuffer::from_raw(2, 2, PixelFormat::Rgb888, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 12,
                actual: 11,
                ..
            }
        ));
        assert!(PixelBuffer::from_raw(2, 2, PixelFormat::Rgb888, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_zero_area_allowed() {
        let buf = PixelBuffer::new(0, 10, PixelFormat::L8).unwrap();
        assert!(buf.is_empty());
        assert!(buf.data().is_empty());
    }

    #[test]
    fn test_overflowing_dimensions() {
        let err = byte_len(u32::MAX, u32::MAX, PixelFormat::Rgba8888);
        if usize::BITS <= 64 {
            assert!(err.is_err());
        }
    }

    #[test]
    fn test_pixel_access() {
        let mut buf = PixelBufferMut::new(3, 2, PixelFormat::La88).unwrap();
        buf.set_pixel(2, 1, &[7, 9]).unwrap();
        assert_eq!(buf.pixel(2, 1), Some(&[7u8, 9][..]));
        assert!(buf.pixel(3, 0).is_none());
        assert!(matches!(
            buf.set_pixel(0, 2, &[0, 0]),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            buf.set_pixel(0, 0, &[0]),
            Err(Error::PixelSizeMismatch { .. })
        ));
        let buf: PixelBuffer = buf.into();
        assert_eq!(buf.row(1), &[0, 0, 0, 0, 7, 9]);
    }

    #[test]
    fn test_try_into_mut_respects_sharing() {
        let buf = PixelBuffer::new(2, 2, PixelFormat::L8).unwrap();
        let shared = buf.clone();
        assert_eq!(buf.ref_count(), 2);
        let buf = buf.try_into_mut().unwrap_err();
        drop(shared);
        assert!(buf.try_into_mut().is_ok());
    }

    #[test]
    fn test_into_mut_copies_shared() {
        let buf = PixelBuffer::from_raw(2, 1, PixelFormat::L8, vec![1, 2]).unwrap();
        let keep = buf.clone();
        let mut m = buf.into_mut();
        m.data_mut()[0] = 99;
        assert_eq!(keep.data(), &[1, 2]);
    }

    #[test]
    fn test_set_dimensions_shrinks_only() {
        let mut buf = PixelBufferMut::new(4, 4, PixelFormat::Rgb565).unwrap();
        buf.set_dimensions(2, 2).unwrap();
        assert_eq!(buf.data().len(), 8);
        assert!(matches!(
            buf.set_dimensions(3, 2),
            Err(Error::CannotGrow { .. })
        ));
        buf.set_dimensions(1, 4).unwrap();
        assert_eq!(buf.dimensions(), ImageDimensions::new(1, 4));
    }

    #[test]
    fn test_fill_and_equals() {
        let mut a = PixelBufferMut::new(2, 2, PixelFormat::Rgb888).unwrap();
        a.fill(&[1, 2, 3]).unwrap();
        let a: PixelBuffer = a.into();
        let b = PixelBuffer::from_raw(2, 2, PixelFormat::Rgb888, [1, 2, 3].repeat(4)).unwrap();
        assert!(a.equals(&b));
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&a.deep_clone()));
    }
}
