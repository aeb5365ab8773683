//! Flicker effect
//!
//! Pulls every pixel towards a randomly dimmed version of the nominal color,
//! which makes the light look like an unstable flame or a failing bulb.

use embassy_time::Instant;
use rand::Rng;

use super::{Effect, Progress, Tick};
use crate::{color::Color, error::EffectError, math8::fraction8, timing::Gate};

const DEFAULT_UPDATE_INTERVAL_MS: u32 = 16;
const DEFAULT_INTENSITY: u8 = 13;

#[derive(Debug, Clone)]
pub struct FlickerEffect {
    gate: Gate,
    /// Depth of the brightness dips (0-255)
    intensity: u8,
}

impl Default for FlickerEffect {
    fn default() -> Self {
        Self {
            gate: Gate::new(DEFAULT_UPDATE_INTERVAL_MS),
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl FlickerEffect {
    #[must_use]
    pub fn with_update_interval(mut self, interval_ms: u32) -> Self {
        self.set_update_interval(interval_ms);
        self
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn set_update_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
    }

    /// Set the intensity as a fraction (0.0-1.0)
    pub fn set_intensity_fraction(&mut self, fraction: f32) {
        self.intensity = fraction8(fraction);
    }

    pub const fn intensity(&self) -> u8 {
        self.intensity
    }
}

impl Effect for FlickerEffect {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        let keep = 255 - self.intensity;
        for led in leds.iter_mut() {
            let flicker = if self.intensity == 0 {
                0
            } else {
                tick.rng.gen_range(0..self.intensity)
            };
            *led = led.scale(keep).saturating_add(tick.color.scale(flicker));
        }
        Progress::Rendered
    }
}
