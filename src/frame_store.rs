//! Recorded frame storage
//!
//! A frame store is a seek-by-index byte source. Each frame holds one
//! `[r, g, b]` record per pixel with no header and no delimiter, so frame
//! `i` of a strip with `n` pixels starts at byte `i * 3 * n`.

use heapless::LinearMap;

use crate::error::FrameError;

/// Bytes per pixel record
pub const BYTES_PER_PIXEL: usize = 3;

/// Source of recorded frames
pub trait FrameStore {
    /// Read frame `index` of `source` into `frame`
    ///
    /// `frame.len()` is the full frame size. On error the content of `frame`
    /// is unspecified.
    fn read_frame(&mut self, source: &str, index: u32, frame: &mut [u8]) -> Result<(), FrameError>;
}

/// Read frame `index` out of a flat byte slice
pub fn read_frame_from(data: &[u8], index: u32, frame: &mut [u8]) -> Result<(), FrameError> {
    let start = usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(frame.len()))
        .ok_or(FrameError::EndOfStore)?;
    if start >= data.len() {
        return Err(FrameError::EndOfStore);
    }
    let end = start + frame.len();
    let bytes = data.get(start..end).ok_or(FrameError::Truncated)?;
    frame.copy_from_slice(bytes);
    Ok(())
}

/// In-memory store mapping up to `K` source names to byte slices
///
/// Typically filled with `include_bytes!` data kept in flash.
#[derive(Debug, Default)]
pub struct FrameLibrary<'d, const K: usize> {
    scripts: LinearMap<&'d str, &'d [u8], K>,
}

impl<'d, const K: usize> FrameLibrary<'d, K> {
    pub const fn new() -> Self {
        Self {
            scripts: LinearMap::new(),
        }
    }

    /// Register `data` under `source`, replacing any previous entry
    ///
    /// Returns the entry back if the library is full.
    pub fn insert(&mut self, source: &'d str, data: &'d [u8]) -> Result<(), (&'d str, &'d [u8])> {
        self.scripts.insert(source, data).map(|_| ())
    }

    pub fn contains(&self, source: &str) -> bool {
        self.scripts.get(source).is_some()
    }
}

impl<const K: usize> FrameStore for FrameLibrary<'_, K> {
    fn read_frame(&mut self, source: &str, index: u32, frame: &mut [u8]) -> Result<(), FrameError> {
        let data = self.scripts.get(source).ok_or(FrameError::Unavailable)?;
        read_frame_from(data, index, frame)
    }
}
