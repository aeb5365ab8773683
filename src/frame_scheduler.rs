//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use rand::RngCore;

use crate::OutputDriver;
use crate::effect::Progress;
use crate::host::EffectHost;

/// Frame duration while any effect asks for the highest tick rate.
pub const HIGH_RATE_FRAME_DURATION: Duration = Duration::from_millis(1);

/// Frame duration while no effect is running.
pub const IDLE_FRAME_DURATION: Duration = Duration::from_millis(16);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// What the active effect did during this frame.
    pub progress: Progress,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Picks the frame rate from the outstanding tick rate requests
/// - Tracks frame timing with drift correction
/// - Ticks the effect host, which commits the frame to the driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(host);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<'a, D: OutputDriver, R: RngCore, const MAX_LEDS: usize> {
    host: EffectHost<'a, D, R, MAX_LEDS>,
    next_frame: Instant,
}

impl<'a, D: OutputDriver, R: RngCore, const MAX_LEDS: usize> FrameScheduler<'a, D, R, MAX_LEDS> {
    pub fn new(host: EffectHost<'a, D, R, MAX_LEDS>) -> Self {
        Self {
            host,
            next_frame: Instant::from_millis(0),
        }
    }

    /// Frame duration for the current tick rate demand.
    pub fn frame_duration(&self) -> Duration {
        if self.host.tick_rate().is_high() {
            HIGH_RATE_FRAME_DURATION
        } else {
            IDLE_FRAME_DURATION
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Ticks the host, which renders and commits the frame
    /// 3. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let frame_duration = self.frame_duration();

        // Skip the backlog after long stalls instead of catching up
        let max_drift = frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let progress = self.host.tick(now);

        self.next_frame += frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            progress,
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the host.
    pub fn host(&self) -> &EffectHost<'a, D, R, MAX_LEDS> {
        &self.host
    }

    /// Get a mutable reference to the host.
    pub fn host_mut(&mut self) -> &mut EffectHost<'a, D, R, MAX_LEDS> {
        &mut self.host
    }
}
