//! Scan effect
//!
//! A dot of the nominal color bouncing between both ends of the strip.

use embassy_time::Instant;

use super::{Effect, Progress, Tick};
use crate::{bounds::clamp_len, color::Color, error::EffectError, timing::Gate};

const DEFAULT_MOVE_INTERVAL_MS: u32 = 100;
const DEFAULT_SCAN_WIDTH: usize = 1;

#[derive(Debug, Clone)]
pub struct ScanEffect {
    gate: Gate,
    scan_width: usize,
    /// First lit pixel, within `0..=len - width`
    position: usize,
    forward: bool,
}

impl Default for ScanEffect {
    fn default() -> Self {
        Self {
            gate: Gate::new(DEFAULT_MOVE_INTERVAL_MS),
            scan_width: DEFAULT_SCAN_WIDTH,
            position: 0,
            forward: true,
        }
    }
}

impl ScanEffect {
    #[must_use]
    pub fn with_move_interval(mut self, interval_ms: u32) -> Self {
        self.set_move_interval(interval_ms);
        self
    }

    /// Set the dot width, at least one pixel
    #[must_use]
    pub fn with_scan_width(mut self, width: usize) -> Self {
        self.set_scan_width(width);
        self
    }

    pub fn set_move_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub fn set_scan_width(&mut self, width: usize) {
        self.scan_width = width.max(1);
    }

    /// Position that will be lit on the next move
    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn is_forward(&self) -> bool {
        self.forward
    }

    fn step(&mut self, last: usize) {
        if self.forward {
            self.position += 1;
            if self.position >= last {
                self.position = last;
                self.forward = false;
            }
        } else {
            self.position = self.position.saturating_sub(1);
            if self.position == 0 {
                self.forward = true;
            }
        }
    }
}

impl Effect for ScanEffect {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        self.position = 0;
        self.forward = true;
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if leds.is_empty() || !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        let width = clamp_len(self.scan_width, leds.len());
        let last = leds.len() - width;
        self.position = self.position.min(last);

        leds.fill(Color::BLACK);
        leds[self.position..self.position + width].fill(tick.color);

        self.step(last);
        Progress::Rendered
    }
}
