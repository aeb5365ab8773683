//! Pixel color type and conversions
//!
//! Colors carry four 8-bit channels. The white channel is passed through
//! untouched by HSV conversion and only matters for RGBW strips.

use rand::{Rng, RngCore};
use smart_leds::{RGB8, hsv::Hsv as HSV, hsv::hsv2rgb};

use crate::math8::scale8;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Color of a single addressable pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create an RGB color with the white channel off
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, w: 0 }
    }

    pub const fn new_rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Convert a hue/saturation/value triple (all 0-255)
    pub fn from_hsv(hue: u8, sat: u8, val: u8) -> Self {
        hsv2rgb(Hsv { hue, sat, val }).into()
    }

    /// Random color at full brightness
    ///
    /// Channels are drawn independently and then stretched so the brightest
    /// one reaches 255.
    #[allow(clippy::cast_possible_truncation)]
    pub fn random(rng: &mut dyn RngCore) -> Self {
        let r: u8 = rng.gen_range(0..=u8::MAX);
        let g: u8 = rng.gen_range(0..=u8::MAX);
        let b: u8 = rng.gen_range(0..=u8::MAX);
        let max = u16::from(r.max(g).max(b));
        if max == 0 {
            return Self::WHITE;
        }
        let stretch = |c: u8| ((u16::from(c) * 255) / max) as u8;
        Self::new(stretch(r), stretch(g), stretch(b))
    }

    /// Scale every channel by `factor` (0-255 = 0.0-1.0)
    #[must_use]
    pub const fn scale(self, factor: u8) -> Self {
        Self {
            r: scale8(self.r, factor),
            g: scale8(self.g, factor),
            b: scale8(self.b, factor),
            w: scale8(self.w, factor),
        }
    }

    /// Add two colors channel-wise, saturating at 255
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            w: self.w.saturating_add(other.w),
        }
    }

    /// Brightest of the four channels
    pub const fn max_channel(self) -> u8 {
        let mut max = self.r;
        if self.g > max {
            max = self.g;
        }
        if self.b > max {
            max = self.b;
        }
        if self.w > max {
            max = self.w;
        }
        max
    }

    pub const fn is_black(self) -> bool {
        self.max_channel() == 0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}
