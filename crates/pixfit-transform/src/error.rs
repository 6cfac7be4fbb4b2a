//! Error types for pixfit-transform
//!
//! Degenerate requests (zero-area buffers, desired sizes below one pixel,
//! formats the box filter cannot average, unknown orientation codes) are not
//! errors: the stages log them and pass the buffer through.

use pixfit_core::PixelFormat;
use thiserror::Error;

/// Errors that can occur while scaling, fitting or reorienting a buffer
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixfit_core::Error),

    /// Pixel format not handled by the requested operation
    #[error("unsupported pixel format: {0:?}")]
    UnsupportedFormat(PixelFormat),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
