//! Color wipe effect
//!
//! Paints the strip pixel by pixel with the current color, then moves on to
//! the next color of the list and starts over from the first pixel.

use embassy_time::Instant;
use heapless::Vec;
use rand::RngCore;

use super::{Effect, Progress, Tick};
use crate::{bounds::clamp_len, color::Color, error::EffectError, timing::Gate};

/// Most colors a single wipe can cycle through
pub const MAX_WIPE_COLORS: usize = 16;

const DEFAULT_ADD_LED_INTERVAL_MS: u32 = 100;

/// One entry of the wipe color list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeColor {
    pub color: Color,
    /// Draw a new random color each time this entry becomes current
    pub random: bool,
    /// Pixels painted before switching to the next entry.
    /// `None` paints the whole strip.
    pub num_leds: Option<usize>,
}

impl WipeColor {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            random: false,
            num_leds: None,
        }
    }

    pub const fn random() -> Self {
        Self {
            color: Color::WHITE,
            random: true,
            num_leds: None,
        }
    }

    #[must_use]
    pub const fn with_num_leds(mut self, num_leds: usize) -> Self {
        self.num_leds = Some(num_leds);
        self
    }

    fn resolve(self, rng: &mut dyn RngCore) -> Color {
        if self.random {
            Color::random(rng)
        } else {
            self.color
        }
    }
}

/// Progressive pixel-by-pixel fill
#[derive(Debug, Clone)]
pub struct ColorWipeEffect {
    colors: Vec<WipeColor, MAX_WIPE_COLORS>,
    gate: Gate,
    reverse: bool,
    /// Index of the current entry in `colors`
    at_color: usize,
    /// Pixels painted with the current entry
    leds_added: usize,
    /// Resolved color of the current entry, drawn on first use
    current: Option<Color>,
}

impl Default for ColorWipeEffect {
    fn default() -> Self {
        Self {
            colors: Vec::from_slice(&[WipeColor::random()]).unwrap_or_default(),
            gate: Gate::new(DEFAULT_ADD_LED_INTERVAL_MS),
            reverse: false,
            at_color: 0,
            leds_added: 0,
            current: None,
        }
    }
}

impl ColorWipeEffect {
    /// Replace the color list
    pub fn with_colors(mut self, colors: &[WipeColor]) -> Result<Self, EffectError> {
        self.set_colors(colors)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_add_led_interval(mut self, interval_ms: u32) -> Self {
        self.set_add_led_interval(interval_ms);
        self
    }

    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Replace the color list
    ///
    /// An empty list is accepted here but refused on activation.
    pub fn set_colors(&mut self, colors: &[WipeColor]) -> Result<(), EffectError> {
        self.colors =
            Vec::from_slice(colors).map_err(|()| EffectError::TooManyColors(MAX_WIPE_COLORS))?;
        Ok(())
    }

    pub fn set_add_led_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    pub fn colors(&self) -> &[WipeColor] {
        &self.colors
    }

    /// Index of the color currently being painted
    pub const fn at_color(&self) -> usize {
        self.at_color
    }

    /// Pixels painted with the current color so far
    pub const fn leds_added(&self) -> usize {
        self.leds_added
    }
}

impl Effect for ColorWipeEffect {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        if self.colors.is_empty() {
            return Err(EffectError::EmptyColorList);
        }
        self.gate.reset(now);
        self.at_color = 0;
        self.leds_added = 0;
        self.current = None;
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        let Some(entry) = self.colors.get(self.at_color).copied() else {
            return Progress::Skipped;
        };
        if leds.is_empty() || !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        let len = leds.len();
        let span = entry.num_leds.map_or(len, |n| clamp_len(n, len)).max(1);
        let offset = self.leds_added.min(len - 1);
        let index = if self.reverse { len - 1 - offset } else { offset };

        let color = *self.current.get_or_insert_with(|| entry.resolve(&mut *tick.rng));
        leds[index] = color;

        self.leds_added += 1;
        if self.leds_added >= span {
            self.leds_added = 0;
            self.at_color = (self.at_color + 1) % self.colors.len();
            self.current = None;
        }
        Progress::Rendered
    }
}
