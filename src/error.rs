//! Error types surfaced to the owning host
//!
//! Neither type is ever fatal: configuration errors refuse activation,
//! frame errors stall script playback until the next gated tick.

/// Effect configuration or activation error
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectError {
    #[error("effect name must not be empty")]
    EmptyName,

    #[error("effect name is longer than {0} bytes")]
    NameTooLong(usize),

    #[error("color wipe needs at least one color")]
    EmptyColorList,

    #[error("color wipe supports at most {0} colors")]
    TooManyColors(usize),

    #[error("script source identifier is longer than {0} bytes")]
    SourceTooLong(usize),
}

/// Frame store read error
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// No bytes at all are stored at the requested frame index
    #[error("no frame at the requested index")]
    EndOfStore,

    /// Fewer bytes than one full frame are stored at the requested index
    #[error("frame is truncated")]
    Truncated,

    /// The source is unknown or cannot be read
    #[error("frame source is unavailable")]
    Unavailable,
}
