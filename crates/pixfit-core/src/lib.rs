//! Pixfit Core - Pixel buffers shared by the scaling pipeline
//!
//! This crate provides the fundamental data structures passed between the
//! image decoder, the load-time scaling stages and the renderer:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - Pixel storage (shared / exclusive)
//! - [`PixelFormat`] - Memory layout of one pixel
//! - [`ImageDimensions`] - Width and height in pixels
//! - [`alpha`] - Detection of non-opaque pixels
//! - [`color`] - Packed 16-bit color helpers

pub mod alpha;
mod buffer;
pub mod color;
mod dimensions;
pub mod error;
mod format;

pub use buffer::{PixelBuffer, PixelBufferMut, byte_len};
pub use dimensions::ImageDimensions;
pub use error::{Error, Result};
pub use format::{AlphaChannel, PixelFormat};
