//! Twinkle effects
//!
//! Every pixel carries an 8-bit phase. A dark pixel lights up with the
//! configured probability on each progress step; a lit pixel advances its
//! phase by a fixed step, following a triangular brightness curve, and goes
//! dark again when the phase overflows.

use embassy_time::Instant;
use rand::Rng;

use super::{Effect, Progress, Tick, chance, clamp_probability};
use crate::{
    bounds::clamp_len,
    color::Color,
    error::EffectError,
    math8::tri8,
    timing::Gate,
};

const DEFAULT_TWINKLE_PROBABILITY: f32 = 0.05;
const DEFAULT_PROGRESS_INTERVAL_MS: u32 = 4;
const DEFAULT_RANDOM_PROGRESS_INTERVAL_MS: u32 = 32;

// Both variants take roughly half a second to a second per twinkle at their
// default intervals.
const PHASE_STEP: u8 = 2;
const RANDOM_PHASE_STEP: u8 = 8;

const RANDOM_SATURATION: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwinkleVariant {
    /// Twinkle in the nominal color
    Nominal,
    /// Each twinkle gets its own random hue
    RandomHue,
}

/// Twinkle effect with per-pixel state for up to `N` pixels
#[derive(Debug, Clone)]
pub struct TwinkleEffect<const N: usize> {
    variant: TwinkleVariant,
    probability: f32,
    gate: Gate,
    phase_step: u8,
    phases: [u8; N],
    hues: [u8; N],
}

impl<const N: usize> Default for TwinkleEffect<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TwinkleEffect<N> {
    /// Twinkle in the nominal color
    pub const fn new() -> Self {
        Self {
            variant: TwinkleVariant::Nominal,
            probability: DEFAULT_TWINKLE_PROBABILITY,
            gate: Gate::new(DEFAULT_PROGRESS_INTERVAL_MS),
            phase_step: PHASE_STEP,
            phases: [0; N],
            hues: [0; N],
        }
    }

    /// Twinkle with a random hue per twinkle
    pub const fn random() -> Self {
        Self {
            variant: TwinkleVariant::RandomHue,
            probability: DEFAULT_TWINKLE_PROBABILITY,
            gate: Gate::new(DEFAULT_RANDOM_PROGRESS_INTERVAL_MS),
            phase_step: RANDOM_PHASE_STEP,
            phases: [0; N],
            hues: [0; N],
        }
    }

    #[must_use]
    pub fn with_twinkle_probability(mut self, probability: f32) -> Self {
        self.set_twinkle_probability(probability);
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval_ms: u32) -> Self {
        self.set_progress_interval(interval_ms);
        self
    }

    /// Set the per-pixel probability, clamped to [0, 1]
    pub fn set_twinkle_probability(&mut self, probability: f32) {
        self.probability = clamp_probability(probability);
    }

    pub fn set_progress_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub const fn variant(&self) -> TwinkleVariant {
        self.variant
    }

    pub const fn twinkle_probability(&self) -> f32 {
        self.probability
    }

    pub const fn progress_interval(&self) -> u32 {
        self.gate.interval_ms()
    }

    fn color_of(&self, index: usize, nominal: Color) -> Color {
        let phase = self.phases[index];
        if phase == 0 {
            return Color::BLACK;
        }
        match self.variant {
            TwinkleVariant::Nominal => nominal.scale(tri8(phase)),
            TwinkleVariant::RandomHue => {
                Color::from_hsv(self.hues[index], RANDOM_SATURATION, tri8(phase))
            }
        }
    }
}

impl<const N: usize> Effect for TwinkleEffect<N> {
    fn start(&mut self, now: Instant, leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        self.phases = [0; N];
        leds.fill(Color::BLACK);
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        let count = clamp_len(leds.len(), N);
        for (i, led) in leds.iter_mut().take(count).enumerate() {
            let phase = self.phases[i];
            if phase != 0 {
                self.phases[i] = phase.checked_add(self.phase_step).unwrap_or(0);
            } else if chance(tick.rng, self.probability) {
                self.phases[i] = self.phase_step;
                if self.variant == TwinkleVariant::RandomHue {
                    self.hues[i] = tick.rng.gen_range(0..=u8::MAX);
                }
            }
            *led = self.color_of(i, tick.color);
        }
        Progress::Rendered
    }
}
