//! Error types for pixfit-core
//!
//! Provides a unified error type for buffer construction and pixel access.
//! Scaling stages never surface these for degenerate input; they are raised
//! only when a caller hands over bytes that disagree with the shape they
//! describe.

use crate::PixelFormat;
use thiserror::Error;

/// pixfit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Dimensions whose byte size does not fit in memory
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw pixel data has the wrong length for its dimensions and format
    #[error("buffer size mismatch for {format:?}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },

    /// Pixel coordinates out of bounds
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A pixel value of the wrong byte width
    #[error("pixel value has {actual} bytes, format {format:?} needs {expected}")]
    PixelSizeMismatch {
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },

    /// Attempt to reinterpret a buffer at a larger size than it holds
    #[error("cannot grow buffer from {capacity} bytes to {width}x{height}")]
    CannotGrow {
        width: u32,
        height: u32,
        capacity: usize,
    },
}

/// Result type alias for pixfit-core operations
pub type Result<T> = std::result::Result<T, Error>;
