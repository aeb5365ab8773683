use embassy_time::Instant;
use rand::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::bounds::{bounded, clamp_len};
use crate::color::Color;
use crate::effect::{AddressableEffect, Progress, Tick};
use crate::error::EffectError;
use crate::tick_rate::TickRateCounter;

/// Configuration for the effect host
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Pixels on the strip; clamped to the host capacity
    pub pixel_count: usize,
    /// Initial nominal color
    pub color: Color,
}

/// Effect host - owns the strip and at most one active effect
///
/// When no effect is active the strip shows the nominal color.
pub struct EffectHost<'a, D: OutputDriver, R: RngCore, const MAX_LEDS: usize> {
    // External dependencies
    driver: D,
    rng: R,
    tick_rate: &'a TickRateCounter,

    // Internal state
    pixel_count: usize,
    color: Color,
    active: Option<AddressableEffect<'a, MAX_LEDS>>,
    frame_buffer: [Color; MAX_LEDS],
}

impl<'a, D: OutputDriver, R: RngCore, const MAX_LEDS: usize> EffectHost<'a, D, R, MAX_LEDS> {
    pub fn new(driver: D, rng: R, tick_rate: &'a TickRateCounter, config: &HostConfig) -> Self {
        Self {
            driver,
            rng,
            tick_rate,
            pixel_count: clamp_len(config.pixel_count, MAX_LEDS),
            color: config.color,
            active: None,
            frame_buffer: [Color::BLACK; MAX_LEDS],
        }
    }

    /// Replace the active effect
    ///
    /// The outgoing effect is stopped before the incoming one starts, so two
    /// effects never share the strip. If the incoming effect refuses to
    /// start, no effect stays active and the strip falls back to the nominal
    /// color.
    pub fn activate(
        &mut self,
        mut effect: AddressableEffect<'a, MAX_LEDS>,
        now: Instant,
    ) -> Result<(), EffectError> {
        self.deactivate();

        let leds = bounded(&mut self.frame_buffer, self.pixel_count);
        if let Err(err) = effect.start(now, leds, self.tick_rate) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[EffectHost.activate] '{}' not activated: {}",
                effect.name(),
                err
            );
            return Err(err);
        }

        #[cfg(feature = "esp32-log")]
        println!("[EffectHost.activate] '{}' active", effect.name());
        self.active = Some(effect);
        Ok(())
    }

    /// Stop the active effect and hand it back for reconfiguration
    pub fn deactivate(&mut self) -> Option<AddressableEffect<'a, MAX_LEDS>> {
        let mut effect = self.active.take()?;
        effect.stop();
        Some(effect)
    }

    /// Update the nominal color passed to effects
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn active(&self) -> Option<&AddressableEffect<'a, MAX_LEDS>> {
        self.active.as_ref()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(AddressableEffect::name)
    }

    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(AddressableEffect::is_running)
    }

    pub const fn tick_rate(&self) -> &'a TickRateCounter {
        self.tick_rate
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Color] {
        &self.frame_buffer[..self.pixel_count]
    }

    /// Process one scheduler tick
    ///
    /// Applies the active effect (or the static fallback) and commits the
    /// frame to the driver.
    pub fn tick(&mut self, now: Instant) -> Progress {
        let leds = bounded(&mut self.frame_buffer, self.pixel_count);

        let progress = match self.active.as_mut() {
            Some(effect) => {
                let mut tick = Tick::new(now, self.color, &mut self.rng);
                effect.apply(&mut tick, leds)
            }
            None => {
                leds.fill(self.color);
                Progress::Rendered
            }
        };

        #[cfg(feature = "esp32-log")]
        if progress == Progress::Stalled {
            if let Some(effect) = self.active.as_ref() {
                println!("[EffectHost.tick] '{}' stalled", effect.name());
            }
        }

        self.driver.write(leds);
        progress
    }
}
