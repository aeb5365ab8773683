//! Recorded frame playback
//!
//! Plays frames from a [`FrameStore`] at a fixed interval and loops back to
//! the first frame at the end of the store. A frame is copied to the strip
//! only after it was read completely, so a failed read leaves the last good
//! frame on the strip. A partial frame at the end of the store stalls one
//! step and then loops; other failures retry the same frame on the next
//! step.

use embassy_time::Instant;
use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Effect, Progress, Tick};
use crate::{
    bounds::clamp_len,
    color::Color,
    error::{EffectError, FrameError},
    frame_store::{BYTES_PER_PIXEL, FrameStore},
    timing::Gate,
};

/// Longest accepted source identifier in bytes
pub const SCRIPT_SOURCE_MAX_LEN: usize = 64;

const DEFAULT_FRAME_INTERVAL_MS: u32 = 100;

/// Frame playback for strips of up to `N` pixels
pub struct ScriptEffect<'a, const N: usize> {
    store: Option<&'a mut dyn FrameStore>,
    source: String<SCRIPT_SOURCE_MAX_LEN>,
    gate: Gate,
    /// Index of the next frame to play
    cursor: u32,
    scratch: [[u8; BYTES_PER_PIXEL]; N],
}

impl<const N: usize> Default for ScriptEffect<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ScriptEffect<'a, N> {
    /// Create a player without a store; it stalls until one is set
    pub const fn new() -> Self {
        Self {
            store: None,
            source: String::new(),
            gate: Gate::new(DEFAULT_FRAME_INTERVAL_MS),
            cursor: 0,
            scratch: [[0; BYTES_PER_PIXEL]; N],
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: &'a mut dyn FrameStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_source(mut self, source: &str) -> Result<Self, EffectError> {
        self.set_source(source)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval_ms: u32) -> Self {
        self.set_frame_interval(interval_ms);
        self
    }

    pub fn set_store(&mut self, store: &'a mut dyn FrameStore) {
        self.store = Some(store);
    }

    /// Select the recording to play
    pub fn set_source(&mut self, source: &str) -> Result<(), EffectError> {
        let mut owned = String::new();
        owned
            .push_str(source)
            .map_err(|()| EffectError::SourceTooLong(SCRIPT_SOURCE_MAX_LEN))?;
        self.source = owned;
        Ok(())
    }

    pub fn set_frame_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval_ms(interval_ms);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Index of the next frame to play
    pub const fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Jump to frame `cursor` on the next step
    pub fn seek(&mut self, cursor: u32) {
        self.cursor = cursor;
    }

    fn read(&mut self, count: usize, index: u32) -> Result<(), FrameError> {
        let store = self.store.as_deref_mut().ok_or(FrameError::Unavailable)?;
        let frame = self.scratch[..count].as_flattened_mut();
        store.read_frame(&self.source, index, frame)
    }

    /// Read the frame at the cursor, wrapping to the first frame past the end
    ///
    /// A partial trailing frame also marks the end of the recording: the read
    /// fails for this step and the next step plays the first frame.
    fn read_next(&mut self, count: usize) -> Result<(), FrameError> {
        match self.read(count, self.cursor) {
            Err(FrameError::EndOfStore) if self.cursor != 0 => {
                self.read(count, 0)?;
                self.cursor = 0;
                Ok(())
            }
            Err(FrameError::Truncated) if self.cursor != 0 => {
                self.cursor = 0;
                Err(FrameError::Truncated)
            }
            result => result,
        }
    }
}

impl<const N: usize> Effect for ScriptEffect<'_, N> {
    fn start(&mut self, now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        self.gate.reset(now);
        self.cursor = 0;
        Ok(())
    }

    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        let count = clamp_len(leds.len(), N);
        if count == 0 || !self.gate.ready(tick.now) {
            return Progress::Skipped;
        }

        if let Err(_err) = self.read_next(count) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ScriptEffect.apply] '{}' frame {} not played: {}",
                self.source, self.cursor, _err
            );
            return Progress::Stalled;
        }

        for (led, [r, g, b]) in leds.iter_mut().zip(&self.scratch[..count]) {
            *led = Color::new(*r, *g, *b);
        }
        self.cursor = self.cursor.wrapping_add(1);
        Progress::Rendered
    }
}
