//! Packed 16-bit color helpers
//!
//! `Rgb565` words hold red in bits 11-15, green in bits 5-10 and blue in bits
//! 0-4. Words are stored little-endian in pixel buffers.

/// Mask of the red field of an RGB565 word.
pub const RGB565_RED_MASK: u16 = 0xf800;
/// Mask of the green field of an RGB565 word.
pub const RGB565_GREEN_MASK: u16 = 0x07e0;
/// Mask of the blue field of an RGB565 word.
pub const RGB565_BLUE_MASK: u16 = 0x001f;

/// Compose an RGB565 word from its raw 5/6/5-bit fields.
///
/// Out-of-range field values are masked.
#[inline]
pub fn compose_rgb565(r5: u8, g6: u8, b5: u8) -> u16 {
    ((u16::from(r5) & 0x1f) << 11) | ((u16::from(g6) & 0x3f) << 5) | (u16::from(b5) & 0x1f)
}

/// Extract the raw 5/6/5-bit fields of an RGB565 word.
#[inline]
pub fn rgb565_components(word: u16) -> (u8, u8, u8) {
    (
        ((word & RGB565_RED_MASK) >> 11) as u8,
        ((word & RGB565_GREEN_MASK) >> 5) as u8,
        (word & RGB565_BLUE_MASK) as u8,
    )
}

/// Expand an RGB565 word to 8-bit red, green, blue.
///
/// High bits are replicated into the low bits so that full-scale fields map
/// to 255.
#[inline]
pub fn rgb565_to_rgb888(word: u16) -> [u8; 3] {
    let (r, g, b) = rgb565_components(word);
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

/// Read the little-endian RGB565 word at the start of `bytes`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than two bytes.
#[inline]
pub fn read_rgb565(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}
