//! pixfit - Decode-time image scaling for rendering engines
//!
//! Decoded images are usually larger than the rectangle they will be shown
//! in. pixfit shrinks them on the CPU before upload, reconciles their aspect
//! ratio with the requested size and turns camera photos upright.
//!
//! # Overview
//!
//! - Iterated 2x2 box filtering in place, with optional nearest or bilinear
//!   sampling to an exact size
//! - Fitting modes: ScaleToFill, ShrinkToFit, FitWidth, FitHeight
//! - Optional letterboxing to the exact requested size
//! - EXIF orientation correction
//! - Alpha-usage detection for the renderer's opaque fast path
//!
//! # Example
//!
//! ```
//! use pixfit::{DecodedImage, FittingMode, PixelBuffer, PixelFormat, ScalingRequest};
//!
//! let decoded = DecodedImage::new(PixelBuffer::new(640, 480, PixelFormat::Rgb888).unwrap())
//!     .with_orientation(6);
//! let request = ScalingRequest::new(120, 160).fitting_mode(FittingMode::ScaleToFill);
//! let image = pixfit::process_decoded(decoded, &request).unwrap();
//! assert_eq!((image.dimensions().width, image.dimensions().height), (120, 160));
//! assert!(!image.alpha_used);
//! ```

// Re-export core types (buffers, formats, dimensions)
pub use pixfit_core::*;

// Pipeline entry points
pub use pixfit_transform::{
    DecodedImage, FilterMode, FittingMode, Orientation, ScaledImage, ScalingRequest,
    TransformError, TransformResult, apply_attributes, process_decoded,
};

// Individual stages
pub use pixfit_transform as transform;
