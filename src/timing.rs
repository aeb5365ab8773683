//! Wrap-safe millisecond timing
//!
//! Effects keep 32-bit millisecond timestamps. All deltas are computed with
//! `wrapping_sub` at the point of comparison, so a counter rollover never
//! produces a negative or huge interval.

use embassy_time::Instant;

/// Truncate an instant to the 32-bit millisecond counter
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn millis32(now: Instant) -> u32 {
    now.as_millis() as u32
}

/// Milliseconds from `since` to `now`, correct across one rollover
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Time gate limiting how often an effect advances its state
///
/// An interval of 0 opens the gate on every tick.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    interval_ms: u32,
    last: u32,
}

impl Gate {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last: 0,
        }
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Restart the interval at `now`
    pub fn reset(&mut self, now: Instant) {
        self.last = millis32(now);
    }

    /// Returns true at most once per interval.
    ///
    /// On success the gate restarts at `now` rather than at the previous
    /// deadline, so a late tick never triggers a burst of catch-up updates.
    pub fn ready(&mut self, now: Instant) -> bool {
        let now = millis32(now);
        if elapsed_ms(now, self.last) < self.interval_ms {
            return false;
        }
        self.last = now;
        true
    }
}
