//! Pixel formats
//!
//! Every format is tightly packed, one pixel after another with no row
//! padding. Multi-byte packed formats (`Rgb565`, `Rgba4444`, `Rgba5551`) are
//! stored as little-endian 16-bit words.

/// Memory layout of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit alpha only
    A8,
    /// 8-bit luminance
    L8,
    /// 8-bit luminance followed by 8-bit alpha
    La88,
    /// 16-bit packed red 5, green 6, blue 5
    Rgb565,
    /// 8-bit red, green, blue
    Rgb888,
    /// 8-bit red, green, blue, alpha
    Rgba8888,
    /// 8-bit blue, green, red, alpha
    Bgra8888,
    /// 8-bit red, green, blue and an unused padding byte
    Rgbx8888,
    /// 16-bit packed red, green, blue, alpha, 4 bits each
    Rgba4444,
    /// 16-bit packed red 5, green 5, blue 5, alpha 1
    Rgba5551,
}

/// Location of the alpha bits inside one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaChannel {
    /// Byte offset from the start of the pixel
    pub byte_offset: usize,
    /// Bits of that byte holding alpha; all set means opaque
    pub mask: u8,
}

impl PixelFormat {
    /// All formats, in declaration order.
    pub const ALL: [PixelFormat; 10] = [
        PixelFormat::A8,
        PixelFormat::L8,
        PixelFormat::La88,
        PixelFormat::Rgb565,
        PixelFormat::Rgb888,
        PixelFormat::Rgba8888,
        PixelFormat::Bgra8888,
        PixelFormat::Rgbx8888,
        PixelFormat::Rgba4444,
        PixelFormat::Rgba5551,
    ];

    /// Number of bytes one pixel occupies.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::A8 | PixelFormat::L8 => 1,
            PixelFormat::La88
            | PixelFormat::Rgb565
            | PixelFormat::Rgba4444
            | PixelFormat::Rgba5551 => 2,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgba8888 | PixelFormat::Bgra8888 | PixelFormat::Rgbx8888 => 4,
        }
    }

    /// Where the alpha bits live, or `None` for formats without alpha.
    pub fn alpha_channel(self) -> Option<AlphaChannel> {
        let (byte_offset, mask) = match self {
            PixelFormat::A8 => (0, 0xff),
            PixelFormat::La88 => (1, 0xff),
            PixelFormat::Rgba8888 | PixelFormat::Bgra8888 => (3, 0xff),
            // Low nibble / low bit of the little-endian word
            PixelFormat::Rgba4444 => (0, 0x0f),
            PixelFormat::Rgba5551 => (0, 0x01),
            PixelFormat::L8 | PixelFormat::Rgb565 | PixelFormat::Rgb888 | PixelFormat::Rgbx8888 => {
                return None;
            }
        };
        Some(AlphaChannel { byte_offset, mask })
    }

    /// Check whether the format carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self.alpha_channel().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::L8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::La88.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb888.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Rgba8888.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_alpha_presence() {
        let with_alpha: Vec<_> = PixelFormat::ALL
            .iter()
            .filter(|f| f.has_alpha())
            .copied()
            .collect();
        assert_eq!(
            with_alpha,
            vec![
                PixelFormat::A8,
                PixelFormat::La88,
                PixelFormat::Rgba8888,
                PixelFormat::Bgra8888,
                PixelFormat::Rgba4444,
                PixelFormat::Rgba5551,
            ]
        );
    }

    #[test]
    fn test_alpha_channel_fits_pixel() {
        for format in PixelFormat::ALL {
            if let Some(alpha) = format.alpha_channel() {
                assert!(alpha.byte_offset < format.bytes_per_pixel(), "{format:?}");
                assert_ne!(alpha.mask, 0);
            }
        }
    }
}
