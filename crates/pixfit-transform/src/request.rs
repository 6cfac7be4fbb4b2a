//! Scaling request configuration
//!
//! A [`ScalingRequest`] carries everything the client asked for when the
//! image was loaded: the rectangle to fit into, how to reconcile aspect
//! ratios, which filters may be used and whether EXIF orientation is
//! honoured.

use pixfit_core::ImageDimensions;

/// Policy for reconciling the image aspect ratio with the requested size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FittingMode {
    /// Fill the whole rectangle, cropping whatever overhangs
    ScaleToFill,
    /// Fit entirely inside the rectangle, leaving empty space on one axis
    #[default]
    ShrinkToFit,
    /// Match the requested width
    FitWidth,
    /// Match the requested height
    FitHeight,
}

/// Which dimensions must stay at or above the desired size while halving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxDimensionTest {
    /// Keep going while either dimension stays large enough
    Either,
    /// Keep going only while both dimensions stay large enough
    Both,
    /// Only the width matters
    X,
    /// Only the height matters
    Y,
}

impl FittingMode {
    /// Box-filter stopping rule for this fitting mode.
    pub fn dimension_test(self) -> BoxDimensionTest {
        match self {
            // One dimension may undershoot as long as the other still fits
            FittingMode::ShrinkToFit => BoxDimensionTest::Either,
            FittingMode::ScaleToFill => BoxDimensionTest::Both,
            FittingMode::FitWidth => BoxDimensionTest::X,
            FittingMode::FitHeight => BoxDimensionTest::Y,
        }
    }
}

/// Filtering to use when shrinking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Iterated 2x2 box filter only
    #[default]
    Box,
    /// Box filter, then nearest-neighbour sampling to the exact fit
    BoxThenNearest,
    /// Box filter, then bilinear sampling to the exact fit
    BoxThenLinear,
    /// No CPU-side filtering
    NoFilter,
    /// Nearest-neighbour sampling only
    Nearest,
    /// Bilinear sampling only
    Linear,
    /// Let the implementation choose; currently no CPU-side filtering
    DontCare,
}

impl FilterMode {
    /// Check whether the iterated box filter runs for this mode.
    pub fn uses_box(self) -> bool {
        matches!(
            self,
            FilterMode::Box | FilterMode::BoxThenNearest | FilterMode::BoxThenLinear
        )
    }

    /// Sampler to run after the box pass, if any.
    pub fn secondary(self) -> Option<SamplingPass> {
        match self {
            FilterMode::Nearest | FilterMode::BoxThenNearest => Some(SamplingPass::Nearest),
            FilterMode::Linear | FilterMode::BoxThenLinear => Some(SamplingPass::Linear),
            FilterMode::Box | FilterMode::NoFilter | FilterMode::DontCare => None,
        }
    }
}

/// Resampling pass that brings a box-filtered image to its exact fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPass {
    Nearest,
    Linear,
}

/// Options for load-time scaling
///
/// # Examples
///
/// ```
/// use pixfit_transform::{FilterMode, FittingMode, ScalingRequest};
///
/// let request = ScalingRequest::new(256, 256)
///     .fitting_mode(FittingMode::ScaleToFill)
///     .filter_mode(FilterMode::BoxThenLinear);
/// assert!(request.orientation_correction);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingRequest {
    /// Desired width; 0 means "derive from the source"
    pub desired_width: u32,
    /// Desired height; 0 means "derive from the source"
    pub desired_height: u32,
    /// Aspect-ratio policy
    pub fitting_mode: FittingMode,
    /// Shrinking filter
    pub filter_mode: FilterMode,
    /// Apply the EXIF orientation reported by the decoder
    pub orientation_correction: bool,
    /// Letterbox or crop the result to the desired aspect ratio for every
    /// fitting mode, instead of cropping for `ScaleToFill` only
    pub pad_to_desired: bool,
    /// Largest texture the renderer accepts on either side
    pub max_texture_size: Option<u32>,
}

impl Default for ScalingRequest {
    fn default() -> Self {
        Self {
            desired_width: 0,
            desired_height: 0,
            fitting_mode: FittingMode::default(),
            filter_mode: FilterMode::default(),
            orientation_correction: true,
            pad_to_desired: false,
            max_texture_size: None,
        }
    }
}

impl ScalingRequest {
    /// Create a request for the given size with default options
    pub fn new(desired_width: u32, desired_height: u32) -> Self {
        Self {
            desired_width,
            desired_height,
            ..Default::default()
        }
    }

    /// Desired size as dimensions.
    pub fn desired(&self) -> ImageDimensions {
        ImageDimensions::new(self.desired_width, self.desired_height)
    }

    /// Set the fitting mode
    pub fn fitting_mode(mut self, mode: FittingMode) -> Self {
        self.fitting_mode = mode;
        self
    }

    /// Set the filter mode
    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Set whether EXIF orientation is applied
    pub fn orientation_correction(mut self, enabled: bool) -> Self {
        self.orientation_correction = enabled;
        self
    }

    /// Set whether the result is padded or cropped to the desired aspect
    pub fn pad_to_desired(mut self, enabled: bool) -> Self {
        self.pad_to_desired = enabled;
        self
    }

    /// Set the renderer's texture size limit
    pub fn max_texture_size(mut self, max: u32) -> Self {
        self.max_texture_size = Some(max);
        self
    }
}
