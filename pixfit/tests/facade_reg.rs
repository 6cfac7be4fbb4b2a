//! Facade regression test
//!
//! The re-exported pipeline and stage modules work together.

use pixfit::transform::{BoxDimensionTest, downscale_in_place};
use pixfit::{FittingMode, ImageDimensions, PixelFormat, ScalingRequest, apply_attributes};
use pixfit_test::{RegParams, pattern};

#[test]
fn facade_reg() {
    let mut rp = RegParams::new("facade");

    let src = pattern::checkerboard(32, 32, PixelFormat::Rgb888);

    // Stage by stage
    let mut m = src.to_mut();
    let shrunk = downscale_in_place(&mut m, ImageDimensions::new(8, 8), BoxDimensionTest::Both)
        .expect("downscale");
    rp.compare_values(8.0, shrunk.width as f64, 0.0);

    // Whole pipeline gives the same pixels
    let request = ScalingRequest::new(8, 8).fitting_mode(FittingMode::ScaleToFill);
    let image = apply_attributes(src, &request).expect("pipeline");
    let staged: pixfit::PixelBuffer = m.into();
    rp.compare_buffers(&staged, &image.buffer);

    assert!(rp.cleanup(), "facade regression test failed");
}
