//! Orientation regression test
//!
//! EXIF方向タグ(1-8)による画素並べ替えをテスト。
//! 位置マーカー画像で各変換の対応関係を検証。

use pixfit_core::{PixelBuffer, PixelFormat};
use pixfit_test::{RegParams, pattern};
use pixfit_transform::{Orientation, apply_orientation};

fn orient(buf: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    let mut m = buf.to_mut();
    apply_orientation(&mut m, orientation).expect("orientation");
    m.into()
}

/// Marker id at destination (x, y)
fn id_at(buf: &PixelBuffer, x: u32, y: u32) -> u32 {
    pattern::marker_id(buf.pixel(x, y).expect("pixel in range"))
}

#[test]
fn orientation_reg() {
    let mut rp = RegParams::new("orientation");
    let (w, h) = (5u32, 3u32);

    for format in PixelFormat::ALL {
        if format.bytes_per_pixel() < 2 {
            continue;
        }
        let src = pattern::marker_image(w, h, format);
        let src_id = |x: u32, y: u32| y * w + x + 1;

        for code in 1..=8u8 {
            let orientation = Orientation::from_exif(code);
            let out = orient(&src, orientation);
            let (ow, oh) = if orientation.swaps_dimensions() { (h, w) } else { (w, h) };
            rp.compare_values(ow as f64, out.width() as f64, 0.0);
            rp.compare_values(oh as f64, out.height() as f64, 0.0);
            rp.compare_values(1.0, (out.format() == format) as u8 as f64, 0.0);

            // Destination (x, y) reads source position `from(x, y)`
            let from = |x: u32, y: u32| match orientation {
                Orientation::Identity => (x, y),
                Orientation::FlipHorizontal => (w - 1 - x, y),
                Orientation::Rotate180 => (w - 1 - x, h - 1 - y),
                Orientation::FlipVertical => (x, h - 1 - y),
                Orientation::Transpose => (y, x),
                Orientation::Rotate90 => (y, h - 1 - x),
                Orientation::Transverse => (w - 1 - y, h - 1 - x),
                Orientation::Rotate270 => (w - 1 - y, x),
            };
            for y in 0..oh {
                for x in 0..ow {
                    let (sx, sy) = from(x, y);
                    rp.compare_values(src_id(sx, sy) as f64, id_at(&out, x, y) as f64, 0.0);
                }
            }

            if format == PixelFormat::Rgb888 {
                rp.write_buffer(&out, &format!("exif{code}")).expect("write");
            }
        }
    }

    assert!(rp.cleanup(), "orientation regression test failed");
}

#[test]
fn orientation_flip_vertical_reg() {
    let mut rp = RegParams::new("orientation_flipv");

    // A mirror top-bottom keeps pixel order inside each row
    let src = pattern::marker_image(4, 3, PixelFormat::Rgba8888);
    let out = orient(&src, Orientation::FlipVertical);
    rp.compare_bytes(src.row(0), out.row(2));
    rp.compare_bytes(src.row(1), out.row(1));
    rp.compare_bytes(src.row(2), out.row(0));

    // and differs from a 180 degree turn
    let turned = orient(&src, Orientation::Rotate180);
    rp.compare_values(0.0, out.equals(&turned) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "orientation flip vertical regression test failed");
}

#[test]
fn orientation_inverse_reg() {
    let mut rp = RegParams::new("orientation_inverse");
    let src = pattern::marker_image(7, 4, PixelFormat::Rgb565);

    for code in 1..=8u8 {
        let orientation = Orientation::from_exif(code);
        let there = orient(&src, orientation);
        let back = orient(&there, orientation.inverse());
        rp.compare_buffers(&src, &back);
    }

    // Rot90 then Rot270
    let back = orient(&orient(&src, Orientation::Rotate90), Orientation::Rotate270);
    rp.compare_buffers(&src, &back);

    // Four quarter turns
    let mut buf = src.clone();
    for _ in 0..4 {
        buf = orient(&buf, Orientation::Rotate90);
    }
    rp.compare_buffers(&src, &buf);

    // Unknown codes are ignored
    let out = orient(&src, Orientation::from_exif(42));
    rp.compare_buffers(&src, &out);

    assert!(rp.cleanup(), "orientation inverse regression test failed");
}
