//! Rainbow cycling effect
//!
//! Spreads `width` degrees of hue across the whole strip and rotates it by
//! `speed` degrees per second. Hue math is done in millidegrees so no
//! floating point is needed.

use embassy_time::Instant;

use super::{Effect, Progress, Tick};
use crate::{
    color::Color,
    error::EffectError,
    timing::{elapsed_ms, millis32},
};

const DEFAULT_SPEED: u32 = 10;
const DEFAULT_WIDTH: u32 = 50;
const SATURATION: u8 = 240;
const VALUE: u8 = 255;

/// One full turn of the hue circle in millidegrees
const FULL_TURN_MDEG: u32 = 360_000;

/// Rainbow effect with a continuously rotating phase
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Hue degrees advanced per second
    speed: u32,
    /// Hue degrees spanned by the whole strip
    width: u32,
    /// Current phase in millidegrees, always below a full turn
    phase: u32,
    last_update: u32,
}

impl Default for RainbowEffect {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            width: DEFAULT_WIDTH,
            phase: 0,
            last_update: 0,
        }
    }
}

impl RainbowEffect {
    /// Set the rotation speed
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the hue span across the strip
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Current phase in millidegrees
    pub const fn phase_mdeg(&self) -> u32 {
        self.phase
    }

    /// Hue of pixel `index` out of `count`, in millidegrees
    #[allow(clippy::cast_possible_truncation)]
    pub fn hue_mdeg(&self, index: usize, count: usize) -> u32 {
        if count == 0 {
            return self.phase;
        }
        let offset = (index as u64 * u64::from(self.width) * 1000) / count as u64;
        ((u64::from(self.phase) + offset) % u64::from(FULL_TURN_MDEG)) as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    fn advance(&mut self, elapsed: u32) {
        // speed deg/s * elapsed ms == speed * elapsed millidegrees
        let step = u64::from(self.speed) * u64::from(elapsed);
        self.phase = ((u64::from(self.phase) + step) % u64::from(FULL_TURN_MDEG)) as u32;
    }
}

impl Effect for RainbowEffect {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        self.last_update = millis32(now);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        let now = millis32(tick.now);
        self.advance(elapsed_ms(now, self.last_update));
        self.last_update = now;

        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            let hue = u64::from(self.hue_mdeg(i, count)) * 256 / u64::from(FULL_TURN_MDEG);
            *led = Color::from_hsv(hue as u8, SATURATION, VALUE);
        }
        Progress::Rendered
    }
}
