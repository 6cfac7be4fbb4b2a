//! Scaling pipeline regression test
//!
//! Runs decoded buffers through the full request handling: desired size
//! resolution, box filter, sampling pass, fitting and alpha scan.

use pixfit_core::{ImageDimensions, PixelBuffer, PixelFormat};
use pixfit_test::{RegParams, pattern};
use pixfit_transform::{
    DecodedImage, FilterMode, FittingMode, ScalingRequest, apply_attributes, process_decoded,
};

fn dims(w: u32, h: u32) -> ImageDimensions {
    ImageDimensions::new(w, h)
}

#[test]
fn pipeline_fitting_reg() {
    let mut rp = RegParams::new("pipeline_fit");
    let white = [0xff, 0xff, 0xff];

    // --- FitWidth, 8x4 into 4x4, letterboxed ---
    let src = pattern::solid(8, 4, PixelFormat::Rgb888, &white);
    let request = ScalingRequest::new(4, 4)
        .fitting_mode(FittingMode::FitWidth)
        .pad_to_desired(true);
    let image = apply_attributes(src, &request).expect("fit width");
    rp.write_buffer(&image.buffer, "fit_width").expect("write");
    rp.compare_values(4.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(4.0, image.dimensions().height as f64, 0.0);
    rp.compare_bytes(&[0; 12], image.buffer.row(0));
    rp.compare_bytes(&[0xff; 12], image.buffer.row(1));
    rp.compare_bytes(&[0xff; 12], image.buffer.row(2));
    rp.compare_bytes(&[0; 12], image.buffer.row(3));

    // --- FitWidth without padding stops at 4x2 ---
    let src = pattern::solid(8, 4, PixelFormat::Rgb888, &white);
    let request = ScalingRequest::new(4, 4).fitting_mode(FittingMode::FitWidth);
    let image = apply_attributes(src, &request).expect("fit width");
    rp.compare_values(4.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(2.0, image.dimensions().height as f64, 0.0);

    // --- ScaleToFill, 8x4 into 4x4, cropped ---
    let src = pattern::marker_image(8, 4, PixelFormat::Rgb888);
    let request = ScalingRequest::new(4, 4).fitting_mode(FittingMode::ScaleToFill);
    let image = apply_attributes(src.clone(), &request).expect("scale to fill");
    rp.compare_values(4.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(4.0, image.dimensions().height as f64, 0.0);
    rp.compare_values(0.0, image.buffer.ptr_eq(&src) as u8 as f64, 0.0);
    // Centre columns, no borders
    rp.compare_bytes(&src.row(0)[6..18], image.buffer.row(0));
    rp.compare_bytes(&src.row(3)[6..18], image.buffer.row(3));

    // --- ShrinkToFit keeps the aspect ratio ---
    let src = pattern::checkerboard(64, 32, PixelFormat::L8);
    let image = apply_attributes(src, &ScalingRequest::new(16, 16)).expect("shrink");
    rp.compare_values(16.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(8.0, image.dimensions().height as f64, 0.0);

    assert!(rp.cleanup(), "pipeline fitting regression test failed");
}

#[test]
fn pipeline_filter_reg() {
    let mut rp = RegParams::new("pipeline_filter");

    // Box only: stops at the power of two
    let src = pattern::horizontal_ramp(100, 100, PixelFormat::Rgba8888);
    let image = apply_attributes(src.clone(), &ScalingRequest::new(30, 30)).expect("box");
    rp.compare_values(50.0, image.dimensions().width as f64, 0.0);

    // Box then linear reaches the exact fit
    let request = ScalingRequest::new(30, 30).filter_mode(FilterMode::BoxThenLinear);
    let image = apply_attributes(src.clone(), &request).expect("box then linear");
    rp.compare_values(30.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(30.0, image.dimensions().height as f64, 0.0);
    rp.write_buffer(&image.buffer, "box_linear").expect("write");

    // Nearest alone skips the box filter and samples straight down
    let request = ScalingRequest::new(30, 30).filter_mode(FilterMode::Nearest);
    let image = apply_attributes(src.clone(), &request).expect("nearest");
    rp.compare_values(30.0, image.dimensions().width as f64, 0.0);

    // No CPU filtering leaves the buffer alone
    for mode in [FilterMode::NoFilter, FilterMode::DontCare] {
        let request = ScalingRequest::new(30, 30).filter_mode(mode);
        let image = apply_attributes(src.clone(), &request).expect("no filter");
        rp.compare_values(1.0, image.buffer.ptr_eq(&src) as u8 as f64, 0.0);
    }

    // Uniform images stay uniform through linear sampling
    let src = pattern::solid(90, 45, PixelFormat::Rgb565, &[0x1f, 0xf8]);
    let request = ScalingRequest::new(20, 0).filter_mode(FilterMode::BoxThenLinear);
    let image = apply_attributes(src, &request).expect("uniform");
    rp.compare_values(20.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(10.0, image.dimensions().height as f64, 0.0);
    let expected = pattern::solid(20, 10, PixelFormat::Rgb565, &[0x1f, 0xf8]);
    rp.compare_buffers(&expected, &image.buffer);

    assert!(rp.cleanup(), "pipeline filter regression test failed");
}

#[test]
fn pipeline_passthrough_reg() {
    let mut rp = RegParams::new("pipeline_passthrough");

    // Already small enough: same object back
    let src = pattern::checkerboard(10, 10, PixelFormat::La88);
    let image = apply_attributes(src.clone(), &ScalingRequest::new(20, 20)).expect("small");
    rp.compare_values(1.0, image.buffer.ptr_eq(&src) as u8 as f64, 0.0);

    // Empty buffers pass through
    let empty = PixelBuffer::new(0, 0, PixelFormat::Rgb888).expect("empty");
    let image = apply_attributes(empty.clone(), &ScalingRequest::new(4, 4)).expect("empty");
    rp.compare_values(1.0, image.buffer.ptr_eq(&empty) as u8 as f64, 0.0);

    // Unsupported box format: untouched
    let src = pattern::marker_image(16, 16, PixelFormat::Rgba4444);
    let image = apply_attributes(src.clone(), &ScalingRequest::new(4, 4)).expect("4444");
    rp.compare_values(1.0, image.buffer.ptr_eq(&src) as u8 as f64, 0.0);

    // Max texture size clamps a full-size request
    let src = PixelBuffer::new(64, 32, PixelFormat::A8).expect("a8");
    let request = ScalingRequest::default().max_texture_size(16);
    let image = apply_attributes(src, &request).expect("max texture");
    rp.compare_values(16.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(8.0, image.dimensions().height as f64, 0.0);

    assert!(rp.cleanup(), "pipeline passthrough regression test failed");
}

#[test]
fn pipeline_alpha_reg() {
    let mut rp = RegParams::new("pipeline_alpha");

    let opaque = pattern::solid(8, 8, PixelFormat::Rgba8888, &[10, 20, 30, 0xff]);
    let image = apply_attributes(opaque, &ScalingRequest::new(2, 2)).expect("opaque");
    rp.compare_values(0.0, image.alpha_used as u8 as f64, 0.0);

    let clear = pattern::single_pixel(8, 8, PixelFormat::La88, 3, 3);
    let image = apply_attributes(clear, &ScalingRequest::new(2, 2)).expect("clear");
    rp.compare_values(1.0, image.alpha_used as u8 as f64, 0.0);

    let no_alpha = PixelBuffer::new(8, 8, PixelFormat::Rgb888).expect("rgb");
    let image = apply_attributes(no_alpha, &ScalingRequest::new(2, 2)).expect("rgb");
    rp.compare_values(0.0, image.alpha_used as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pipeline alpha regression test failed");
}

#[test]
fn pipeline_orientation_reg() {
    let mut rp = RegParams::new("pipeline_orientation");

    // Portrait photo stored sideways
    let src = pattern::marker_image(6, 4, PixelFormat::Rgb888);
    let decoded = DecodedImage::new(src.clone()).with_orientation(6);
    let image = process_decoded(decoded, &ScalingRequest::default()).expect("rotate");
    rp.compare_values(4.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(6.0, image.dimensions().height as f64, 0.0);
    // Bottom-left source pixel becomes the top-left
    let corner = image.buffer.pixel(0, 0).expect("pixel");
    rp.compare_values(19.0, pattern::marker_id(corner) as f64, 0.0);

    // Out-of-range codes load upright
    let decoded = DecodedImage::new(src.clone()).with_orientation(9);
    let image = process_decoded(decoded, &ScalingRequest::default()).expect("bad code");
    rp.compare_values(1.0, image.buffer.ptr_eq(&src) as u8 as f64, 0.0);

    // Size request applies to the upright image
    let decoded = DecodedImage::new(pattern::checkerboard(32, 16, PixelFormat::L8))
        .with_orientation(8);
    let image = process_decoded(decoded, &ScalingRequest::new(8, 16)).expect("rotate + shrink");
    rp.compare_values(8.0, image.dimensions().width as f64, 0.0);
    rp.compare_values(16.0, image.dimensions().height as f64, 0.0);

    assert!(rp.cleanup(), "pipeline orientation regression test failed");
}
