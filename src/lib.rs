#![no_std]

pub mod bounds;
pub mod color;
pub mod effect;
pub mod error;
pub mod frame_scheduler;
pub mod frame_store;
pub mod host;
pub mod math8;
pub mod tick_rate;
pub mod timing;

pub use effect::{
    AddressableEffect, ColorWipeEffect, Effect, EffectKind, EffectSlot, EffectState,
    FireworksEffect, FlickerEffect, LambdaEffect, LambdaFn, Progress, RainbowEffect, ScanEffect,
    ScriptEffect, Tick, TwinkleEffect, WipeColor,
};
pub use error::{EffectError, FrameError};
pub use frame_scheduler::FrameScheduler;
pub use frame_store::{FrameLibrary, FrameStore};
pub use host::{EffectHost, HostConfig};
pub use tick_rate::{TICK_RATE, TickRateCounter, TickRateRequest};

pub use color::{Color, Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The effect host is generic over this trait and calls it once per tick
/// to commit the frame.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Color]);
}
