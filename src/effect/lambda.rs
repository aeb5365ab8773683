//! Caller-supplied effect

use embassy_time::Instant;

use super::{Effect, Progress, Tick};
use crate::{color::Color, error::EffectError, timing::Gate};

/// Per-buffer callback run by [`LambdaEffect`]
///
/// The callback may capture state; it is borrowed for the life of the effect.
pub type LambdaFn<'a> = dyn FnMut(&mut [Color], &mut Tick<'_>) + 'a;

const DEFAULT_UPDATE_INTERVAL_MS: u32 = 0;

/// Runs a callback at most once per update interval
pub struct LambdaEffect<'a> {
    callback: &'a mut LambdaFn<'a>,
    gate: Gate,
}

impl<'a> LambdaEffect<'a> {
    /// Create an effect running `callback` on every tick
    pub const fn new(callback: &'a mut LambdaFn<'a>) -> Self {
        Self {
            callback,
            gate: Gate::new(DEFAULT_UPDATE_INTERVAL_MS),
        }
    }

    #[must_use]
    pub fn with_update_interval(mut self, interval_ms: u32) -> Self {
        self.set_update_interval(interval_ms);
        self
    }

    pub fn set_update_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub const fn update_interval(&self) -> u32 {
        self.gate.interval_ms()
    }
}

impl Effect for LambdaEffect<'_> {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }
        (self.callback)(leds, tick);
        Progress::Rendered
    }
}
