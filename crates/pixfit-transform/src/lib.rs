//! pixfit-transform - Load-time scaling for decoded images
//!
//! This crate shrinks and reorients decoded pixel buffers before they are
//! handed to a renderer:
//!
//! - Iterated power-of-two box filtering, in place, for six pixel layouts
//! - Nearest and bilinear resampling to an exact size
//! - Fitting policies (ScaleToFill crop, letterboxing crop-and-pad)
//! - EXIF orientation correction (flips, rotations, transposes)
//! - A pipeline running all of the above from a [`ScalingRequest`]

pub mod average;
pub mod downscale;
mod error;
pub mod fit;
pub mod orientation;
pub mod pipeline;
pub mod request;
pub mod sample;
pub mod scanline;

pub use downscale::{
    box_filter_supports, continue_scaling, downscale_in_place, downscale_in_place_pow2,
};
pub use error::{TransformError, TransformResult};
pub use fit::{
    BORDER_FILL_VALUE, Borders, MAXIMUM_TARGET_BITMAP_SIZE, add_borders, calculate_borders,
    calculate_desired_dimensions, crop_and_pad_for_fitting_mode, crop_for_scale_to_fill,
    fit_to_scaling_mode,
};
pub use orientation::{Orientation, apply_orientation};
pub use pipeline::{DecodedImage, ScaledImage, apply_attributes, process_decoded};
pub use request::{BoxDimensionTest, FilterMode, FittingMode, SamplingPass, ScalingRequest};
pub use sample::{linear_sample, point_sample, resample};
