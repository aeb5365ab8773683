//! Effect lifecycle
//!
//! Wraps an [`EffectSlot`] with its name, its running state and the tick rate
//! request it holds while running.

use embassy_time::Instant;
use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{EffectKind, EffectSlot, Progress, Tick};
use crate::{
    color::Color,
    error::EffectError,
    tick_rate::{TickRateCounter, TickRateRequest},
};

/// Longest accepted effect name in bytes
pub const EFFECT_NAME_MAX_LEN: usize = 32;

/// Lifecycle state of an effect
///
/// `Starting` and `Stopping` are only observable while the corresponding
/// transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Named effect bound to the common start/stop bracket
pub struct AddressableEffect<'a, const N: usize> {
    name: String<EFFECT_NAME_MAX_LEN>,
    state: EffectState,
    slot: EffectSlot<'a, N>,
    tick_rate: Option<TickRateRequest<'a>>,
}

impl<'a, const N: usize> AddressableEffect<'a, N> {
    /// Create a stopped effect
    pub fn new(name: &str, slot: EffectSlot<'a, N>) -> Result<Self, EffectError> {
        if name.is_empty() {
            return Err(EffectError::EmptyName);
        }
        let mut owned = String::new();
        owned
            .push_str(name)
            .map_err(|()| EffectError::NameTooLong(EFFECT_NAME_MAX_LEN))?;

        Ok(Self {
            name: owned,
            state: EffectState::Stopped,
            slot,
            tick_rate: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn state(&self) -> EffectState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EffectState::Running
    }

    pub fn kind(&self) -> EffectKind {
        self.slot.kind()
    }

    pub const fn slot(&self) -> &EffectSlot<'a, N> {
        &self.slot
    }

    /// Mutable access to the parameters
    ///
    /// Parameters are frozen while the effect runs, so this returns `None`
    /// unless the effect is stopped.
    pub fn slot_mut(&mut self) -> Option<&mut EffectSlot<'a, N>> {
        if self.state == EffectState::Stopped {
            Some(&mut self.slot)
        } else {
            None
        }
    }

    /// Activate the effect
    ///
    /// Acquires one unit of `tick_rate`, then lets the variant reset its
    /// state. If the variant refuses activation the unit is given back and
    /// the effect stays stopped. Starting a running effect does nothing.
    pub fn start(
        &mut self,
        now: Instant,
        leds: &mut [Color],
        tick_rate: &'a TickRateCounter,
    ) -> Result<(), EffectError> {
        if self.state != EffectState::Stopped {
            return Ok(());
        }
        self.state = EffectState::Starting;

        let mut request = TickRateRequest::new(tick_rate);
        request.acquire();

        if let Err(err) = self.slot.start(now, leds) {
            #[cfg(feature = "esp32-log")]
            println!("[AddressableEffect.start] '{}' refused: {}", self.name, err);
            self.state = EffectState::Stopped;
            return Err(err);
        }

        #[cfg(feature = "esp32-log")]
        println!("[AddressableEffect.start] '{}' running", self.name);
        self.tick_rate = Some(request);
        self.state = EffectState::Running;
        Ok(())
    }

    /// Deactivate the effect
    ///
    /// Releases the tick rate request. Safe to call on a stopped effect.
    pub fn stop(&mut self) {
        if self.state == EffectState::Stopped {
            return;
        }
        self.state = EffectState::Stopping;
        self.slot.stop();
        if let Some(mut request) = self.tick_rate.take() {
            request.release();
        }

        #[cfg(feature = "esp32-log")]
        println!("[AddressableEffect.stop] '{}' stopped", self.name);
        self.state = EffectState::Stopped;
    }

    /// Run one tick; does nothing unless the effect is running
    pub fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        if self.state != EffectState::Running {
            return Progress::Skipped;
        }
        self.slot.apply(tick, leds)
    }
}
