//! Effect system with compile-time known effect variants
//!
//! All built-in effects are stored in an enum to avoid heap allocations,
//! next to one open variant for a caller-supplied callback.
//! Each effect implements the `Effect` trait.

mod addressable;
mod color_wipe;
mod fireworks;
mod flicker;
mod lambda;
mod rainbow;
mod scan;
mod script;
mod twinkle;

use embassy_time::Instant;
use rand::{Rng, RngCore};

pub use addressable::{AddressableEffect, EFFECT_NAME_MAX_LEN, EffectState};
pub use color_wipe::{ColorWipeEffect, MAX_WIPE_COLORS, WipeColor};
pub use fireworks::FireworksEffect;
pub use flicker::FlickerEffect;
pub use lambda::{LambdaEffect, LambdaFn};
pub use rainbow::RainbowEffect;
pub use scan::ScanEffect;
pub use script::{SCRIPT_SOURCE_MAX_LEN, ScriptEffect};
pub use twinkle::{TwinkleEffect, TwinkleVariant};

use crate::{color::Color, error::EffectError};

const EFFECT_NAME_LAMBDA: &str = "lambda";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_COLOR_WIPE: &str = "color_wipe";
const EFFECT_NAME_SCAN: &str = "scan";
const EFFECT_NAME_TWINKLE: &str = "twinkle";
const EFFECT_NAME_RANDOM_TWINKLE: &str = "random_twinkle";
const EFFECT_NAME_FIREWORKS: &str = "fireworks";
const EFFECT_NAME_FLICKER: &str = "flicker";
const EFFECT_NAME_SCRIPT: &str = "script";

const EFFECT_ID_LAMBDA: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_COLOR_WIPE: u8 = 2;
const EFFECT_ID_SCAN: u8 = 3;
const EFFECT_ID_TWINKLE: u8 = 4;
const EFFECT_ID_RANDOM_TWINKLE: u8 = 5;
const EFFECT_ID_FIREWORKS: u8 = 6;
const EFFECT_ID_FLICKER: u8 = 7;
const EFFECT_ID_SCRIPT: u8 = 8;

/// Per-tick input handed to the active effect
pub struct Tick<'r> {
    /// Current time from the shared monotonic clock
    pub now: Instant,
    /// The light's configured target color
    pub color: Color,
    /// Random source owned by the host
    pub rng: &'r mut dyn RngCore,
}

impl<'r> Tick<'r> {
    pub fn new(now: Instant, color: Color, rng: &'r mut dyn RngCore) -> Self {
        Self { now, color, rng }
    }
}

/// What an effect did with the buffer during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Gate interval not elapsed, buffer untouched
    Skipped,
    /// Buffer updated
    Rendered,
    /// Update attempted but no data was available, buffer untouched
    Stalled,
}

pub trait Effect {
    /// Reset variant state when the effect becomes active
    ///
    /// Returning an error refuses activation.
    fn start(&mut self, _now: Instant, _leds: &mut [Color]) -> Result<(), EffectError> {
        Ok(())
    }

    /// Advance the effect by one scheduler tick
    ///
    /// Must not allocate and must do a bounded amount of work.
    fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress;

    /// Release variant state when the effect is deactivated
    fn stop(&mut self) {}
}

/// Effect slot - enum containing all possible effects
///
/// `N` is the largest strip the per-pixel state of twinkle and script
/// playback is sized for.
pub enum EffectSlot<'a, const N: usize> {
    /// Caller-supplied callback
    Lambda(LambdaEffect<'a>),
    /// Rotating hue across the strip
    Rainbow(RainbowEffect),
    /// Progressive pixel-by-pixel fill
    ColorWipe(ColorWipeEffect),
    /// Single bouncing dot
    Scan(ScanEffect),
    /// Twinkling pixels in the nominal color
    Twinkle(TwinkleEffect<N>),
    /// Twinkling pixels with a random hue each
    RandomTwinkle(TwinkleEffect<N>),
    /// Random sparks fading out
    Fireworks(FireworksEffect),
    /// Unstable brightness
    Flicker(FlickerEffect),
    /// Recorded frame playback
    Script(ScriptEffect<'a, N>),
}

/// Known effect kinds that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectKind {
    Lambda = EFFECT_ID_LAMBDA,
    Rainbow = EFFECT_ID_RAINBOW,
    ColorWipe = EFFECT_ID_COLOR_WIPE,
    Scan = EFFECT_ID_SCAN,
    Twinkle = EFFECT_ID_TWINKLE,
    RandomTwinkle = EFFECT_ID_RANDOM_TWINKLE,
    Fireworks = EFFECT_ID_FIREWORKS,
    Flicker = EFFECT_ID_FLICKER,
    Script = EFFECT_ID_SCRIPT,
}

impl EffectKind {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_LAMBDA => Self::Lambda,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_COLOR_WIPE => Self::ColorWipe,
            EFFECT_ID_SCAN => Self::Scan,
            EFFECT_ID_TWINKLE => Self::Twinkle,
            EFFECT_ID_RANDOM_TWINKLE => Self::RandomTwinkle,
            EFFECT_ID_FIREWORKS => Self::Fireworks,
            EFFECT_ID_FLICKER => Self::Flicker,
            EFFECT_ID_SCRIPT => Self::Script,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lambda => EFFECT_NAME_LAMBDA,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::ColorWipe => EFFECT_NAME_COLOR_WIPE,
            Self::Scan => EFFECT_NAME_SCAN,
            Self::Twinkle => EFFECT_NAME_TWINKLE,
            Self::RandomTwinkle => EFFECT_NAME_RANDOM_TWINKLE,
            Self::Fireworks => EFFECT_NAME_FIREWORKS,
            Self::Flicker => EFFECT_NAME_FLICKER,
            Self::Script => EFFECT_NAME_SCRIPT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_LAMBDA => Some(Self::Lambda),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_COLOR_WIPE => Some(Self::ColorWipe),
            EFFECT_NAME_SCAN => Some(Self::Scan),
            EFFECT_NAME_TWINKLE => Some(Self::Twinkle),
            EFFECT_NAME_RANDOM_TWINKLE => Some(Self::RandomTwinkle),
            EFFECT_NAME_FIREWORKS => Some(Self::Fireworks),
            EFFECT_NAME_FLICKER => Some(Self::Flicker),
            EFFECT_NAME_SCRIPT => Some(Self::Script),
            _ => None,
        }
    }

    /// Build the effect with default parameters
    ///
    /// Returns `None` for [`EffectKind::Lambda`], which needs a callback.
    pub fn default_slot<'a, const N: usize>(self) -> Option<EffectSlot<'a, N>> {
        Some(match self {
            Self::Lambda => return None,
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::default()),
            Self::ColorWipe => EffectSlot::ColorWipe(ColorWipeEffect::default()),
            Self::Scan => EffectSlot::Scan(ScanEffect::default()),
            Self::Twinkle => EffectSlot::Twinkle(TwinkleEffect::new()),
            Self::RandomTwinkle => EffectSlot::RandomTwinkle(TwinkleEffect::random()),
            Self::Fireworks => EffectSlot::Fireworks(FireworksEffect::default()),
            Self::Flicker => EffectSlot::Flicker(FlickerEffect::default()),
            Self::Script => EffectSlot::Script(ScriptEffect::new()),
        })
    }
}

impl<const N: usize> EffectSlot<'_, N> {
    /// Reset the effect state on activation
    pub fn start(&mut self, now: Instant, leds: &mut [Color]) -> Result<(), EffectError> {
        match self {
            Self::Lambda(effect) => effect.start(now, leds),
            Self::Rainbow(effect) => effect.start(now, leds),
            Self::ColorWipe(effect) => effect.start(now, leds),
            Self::Scan(effect) => effect.start(now, leds),
            Self::Twinkle(effect) => effect.start(now, leds),
            Self::RandomTwinkle(effect) => effect.start(now, leds),
            Self::Fireworks(effect) => effect.start(now, leds),
            Self::Flicker(effect) => effect.start(now, leds),
            Self::Script(effect) => effect.start(now, leds),
        }
    }

    /// Advance the current effect by one tick
    pub fn apply(&mut self, tick: &mut Tick<'_>, leds: &mut [Color]) -> Progress {
        match self {
            Self::Lambda(effect) => effect.apply(tick, leds),
            Self::Rainbow(effect) => effect.apply(tick, leds),
            Self::ColorWipe(effect) => effect.apply(tick, leds),
            Self::Scan(effect) => effect.apply(tick, leds),
            Self::Twinkle(effect) => effect.apply(tick, leds),
            Self::RandomTwinkle(effect) => effect.apply(tick, leds),
            Self::Fireworks(effect) => effect.apply(tick, leds),
            Self::Flicker(effect) => effect.apply(tick, leds),
            Self::Script(effect) => effect.apply(tick, leds),
        }
    }

    pub fn stop(&mut self) {
        match self {
            Self::Lambda(effect) => Effect::stop(effect),
            Self::Rainbow(effect) => Effect::stop(effect),
            Self::ColorWipe(effect) => Effect::stop(effect),
            Self::Scan(effect) => Effect::stop(effect),
            Self::Twinkle(effect) => Effect::stop(effect),
            Self::RandomTwinkle(effect) => Effect::stop(effect),
            Self::Fireworks(effect) => Effect::stop(effect),
            Self::Flicker(effect) => Effect::stop(effect),
            Self::Script(effect) => Effect::stop(effect),
        }
    }

    /// Get the effect kind for external observation
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Lambda(_) => EffectKind::Lambda,
            Self::Rainbow(_) => EffectKind::Rainbow,
            Self::ColorWipe(_) => EffectKind::ColorWipe,
            Self::Scan(_) => EffectKind::Scan,
            Self::Twinkle(_) => EffectKind::Twinkle,
            Self::RandomTwinkle(_) => EffectKind::RandomTwinkle,
            Self::Fireworks(_) => EffectKind::Fireworks,
            Self::Flicker(_) => EffectKind::Flicker,
            Self::Script(_) => EffectKind::Script,
        }
    }
}

/// Clamp a probability to [0, 1], mapping NaN to 0
pub(crate) fn clamp_probability(probability: f32) -> f32 {
    if probability.is_nan() {
        return 0.0;
    }
    probability.clamp(0.0, 1.0)
}

/// Draw against a probability already clamped to [0, 1]
pub(crate) fn chance(rng: &mut dyn RngCore, probability: f32) -> bool {
    rng.gen_bool(f64::from(probability))
}
