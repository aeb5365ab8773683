//! Fireworks effect
//!
//! Sparks ignite at random positions and fade out over time.

use embassy_time::Instant;
use rand::Rng;

use super::{Effect, Progress, Tick, chance, clamp_probability};
use crate::{color::Color, error::EffectError, timing::Gate};

const DEFAULT_UPDATE_INTERVAL_MS: u32 = 32;
const DEFAULT_SPARK_PROBABILITY: f32 = 0.10;
const DEFAULT_FADE_OUT_RATE: u8 = 120;

/// Upper bound on ignitions per update
const MAX_SPARKS_PER_UPDATE: usize = 4;

/// Pixels dimmer than this fade with an additional factor
const TAIL_THRESHOLD: u8 = 64;
const TAIL_SCALE: u8 = 170;

#[derive(Debug, Clone)]
pub struct FireworksEffect {
    gate: Gate,
    spark_probability: f32,
    fade_out_rate: u8,
    use_random_color: bool,
}

impl Default for FireworksEffect {
    fn default() -> Self {
        Self {
            gate: Gate::new(DEFAULT_UPDATE_INTERVAL_MS),
            spark_probability: DEFAULT_SPARK_PROBABILITY,
            fade_out_rate: DEFAULT_FADE_OUT_RATE,
            use_random_color: false,
        }
    }
}

impl FireworksEffect {
    #[must_use]
    pub fn with_update_interval(mut self, interval_ms: u32) -> Self {
        self.set_update_interval(interval_ms);
        self
    }

    #[must_use]
    pub fn with_spark_probability(mut self, probability: f32) -> Self {
        self.set_spark_probability(probability);
        self
    }

    #[must_use]
    pub fn with_fade_out_rate(mut self, rate: u8) -> Self {
        self.fade_out_rate = rate;
        self
    }

    #[must_use]
    pub fn with_random_color(mut self, use_random_color: bool) -> Self {
        self.use_random_color = use_random_color;
        self
    }

    pub fn set_update_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    /// Set the spark probability, clamped to [0, 1]
    pub fn set_spark_probability(&mut self, probability: f32) {
        self.spark_probability = clamp_probability(probability);
    }

    /// Set how fast sparks fade; 255 turns a pixel off in one update
    pub fn set_fade_out_rate(&mut self, rate: u8) {
        self.fade_out_rate = rate;
    }

    pub fn set_use_random_color(&mut self, use_random_color: bool) {
        self.use_random_color = use_random_color;
    }

    /// Fade one pixel; the result is never brighter than the input
    fn fade(&self, color: Color) -> Color {
        let faded = color.scale(255 - self.fade_out_rate);
        if faded.max_channel() < TAIL_THRESHOLD {
            faded.scale(TAIL_SCALE)
        } else {
            faded
        }
    }
}

impl Effect for FireworksEffect {
    fn start(&mut self, now: Instant, leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        leds.fill(Color::BLACK);
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        for led in leds.iter_mut() {
            *led = self.fade(*led);
        }

        if leds.is_empty() {
            return Progress::Rendered;
        }
        for _ in 0..MAX_SPARKS_PER_UPDATE {
            if !chance(tick.rng, self.spark_probability) {
                break;
            }
            let pos = tick.rng.gen_range(0..leds.len());
            leds[pos] = if self.use_random_color {
                Color::random(tick.rng)
            } else {
                tick.color
            };
        }
        Progress::Rendered
    }
}
