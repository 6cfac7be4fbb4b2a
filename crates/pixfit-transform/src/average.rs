//! Component and pixel averaging
//!
//! All averages round down: `(a + b) >> 1`. Packed formats average each
//! field on its own, so no carry crosses a field boundary.

/// Average two unsigned components, rounding down.
///
/// The sum is formed in 64 bits, so the result is exact for every pair of
/// `u32` inputs.
///
/// # Examples
///
/// ```
/// use pixfit_transform::average::average_component;
///
/// assert_eq!(average_component(3, 4), 3);
/// assert_eq!(average_component(0xFFFF_FFFE, 1), 0x7FFF_FFFF);
/// ```
#[inline]
pub fn average_component(a: u32, b: u32) -> u32 {
    ((u64::from(a) + u64::from(b)) >> 1) as u32
}

/// Average two byte components, rounding down.
#[inline]
pub fn average_byte(a: u8, b: u8) -> u8 {
    average_component(u32::from(a), u32::from(b)) as u8
}

/// Average two RGBA8888 pixels held in 32-bit words, byte lane by byte lane.
///
/// Byte order inside the word does not matter; every lane is treated alike.
#[inline]
pub fn average_pixel_rgba8888(a: u32, b: u32) -> u32 {
    // Half of the differing bits plus the shared bits, with the low bit of
    // each lane masked off before the shift so nothing leaks downwards
    (((a ^ b) & 0xfefe_fefe) >> 1) + (a & b)
}

/// Average two RGB565 pixels field by field.
#[inline]
pub fn average_pixel_rgb565(a: u16, b: u16) -> u16 {
    (((a ^ b) & 0xf7de) >> 1) + (a & b)
}
