use crate::color::Color;

/// Clamp a requested pixel count to what is actually available
pub const fn clamp_len(requested: usize, available: usize) -> usize {
    if requested > available {
        available
    } else {
        requested
    }
}

/// Get the first `len` pixels, clamped to the buffer length
pub(crate) fn bounded(leds: &mut [Color], len: usize) -> &mut [Color] {
    let len = clamp_len(len, leds.len());
    &mut leds[..len]
}
