/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems. The result never
/// exceeds `value`, and a scale of 0 always yields 0.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Triangle wave over one 8-bit period
///
/// Rises from 0 at `phase = 0` to 254 around the middle and falls back
/// towards 0 at `phase = 255`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn tri8(phase: u8) -> u8 {
    let half = if phase < 128 { phase } else { 255 - phase };
    (half as u16 * 2) as u8
}

/// Convert a unit fraction (0.0-1.0) to the 0-255 scale
///
/// Values outside the range (and NaN) are clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fraction8(fraction: f32) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    libm::roundf(fraction.clamp(0.0, 1.0) * 255.0) as u8
}
