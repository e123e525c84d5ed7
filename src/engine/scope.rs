//! Visualization tap: complete rendered blocks handed from the audio
//! callback to a display thread over a wait-free SPSC ring.
//!
//! Frames are fixed-size `Copy` values, so publishing is a bounded memcpy
//! with no allocation. When the consumer falls behind the ring fills and
//! new frames are dropped; the display only ever wants the most recent
//! picture anyway, so the reader drains everything available and keeps
//! the newest.

use rtrb::{Consumer, Producer, RingBuffer};

/// Samples carried per frame. Matches the block size the engine is
/// normally driven at, so one frame is one fill.
pub const SCOPE_FRAME_LEN: usize = 512;

/// One rendered block plus its peak magnitude.
#[derive(Clone, Copy)]
pub struct ScopeFrame {
    samples: [f32; SCOPE_FRAME_LEN],
    len: usize,
    /// Largest `|sample|` in the block this frame was captured from.
    pub peak: f32,
}

impl ScopeFrame {
    /// A full-length frame of silence. What the reader hands out before
    /// the first real block arrives.
    pub fn silent() -> Self {
        Self {
            samples: [0.0; SCOPE_FRAME_LEN],
            len: SCOPE_FRAME_LEN,
            peak: 0.0,
        }
    }

    /// Copy the leading samples of a rendered block. Blocks longer than
    /// the frame are truncated, shorter ones produce a short frame.
    pub(crate) fn capture(block: &[f32], peak: f32) -> Self {
        let len = block.len().min(SCOPE_FRAME_LEN);
        let mut samples = [0.0; SCOPE_FRAME_LEN];
        samples[..len].copy_from_slice(&block[..len]);
        Self { samples, len, peak }
    }

    /// The captured samples, in render order.
    pub fn samples(&self) -> &[f32] {
        &self.samples[..self.len]
    }
}

impl Default for ScopeFrame {
    fn default() -> Self {
        Self::silent()
    }
}

/// Audio-side handle. Publishing never blocks.
pub struct ScopeWriter {
    tx: Producer<ScopeFrame>,
}

impl ScopeWriter {
    /// Push a frame, dropping it if the ring is full.
    pub fn publish(&mut self, frame: ScopeFrame) {
        let _ = self.tx.push(frame);
    }
}

/// Display-side handle. Remembers the newest frame seen so far.
pub struct ScopeReader {
    rx: Consumer<ScopeFrame>,
    latest: ScopeFrame,
}

impl ScopeReader {
    /// Drain the ring and return the newest frame. Returns the previous
    /// newest (initially silence) when nothing new has arrived.
    pub fn latest(&mut self) -> &ScopeFrame {
        while let Ok(frame) = self.rx.pop() {
            self.latest = frame;
        }
        &self.latest
    }
}

/// Build a scope channel holding up to `capacity` frames in flight.
pub fn scope_channel(capacity: usize) -> (ScopeWriter, ScopeReader) {
    let (tx, rx) = RingBuffer::new(capacity);
    (
        ScopeWriter { tx },
        ScopeReader {
            rx,
            latest: ScopeFrame::silent(),
        },
    )
}
