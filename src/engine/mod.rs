//! The buffer-fill engine: pulls a parameter snapshot, consumes any
//! pending note trigger, and renders one mono block of samples.
//!
//! Everything on this path is allocation-free and lock-free, so
//! `render_block` is safe to call from an audio callback.

#[cfg(feature = "rtrb")]
pub mod scope;

#[cfg(feature = "rtrb")]
pub use scope::{scope_channel, ScopeFrame, ScopeReader, ScopeWriter, SCOPE_FRAME_LEN};

use std::sync::Arc;

use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::{phase_increment, Oscillator};
use crate::params::SynthParams;

/// Single-voice synthesis engine.
///
/// Parameters are applied with block accuracy: the store is read once at
/// the top of [`Engine::render_block`] and the whole block renders from
/// that one snapshot. A control write lands at the next block boundary,
/// never mid-buffer. Oscillator phase is carried across blocks and is
/// never reset by parameter changes, so frequency moves are click-free.
pub struct Engine {
    params: Arc<SynthParams>,
    sample_rate: f32,
    oscillator: Oscillator,
    envelope: Envelope,
    #[cfg(feature = "rtrb")]
    scope: Option<ScopeWriter>,
    last_peak: f32,
}

impl Engine {
    pub fn new(sample_rate: f32, params: Arc<SynthParams>) -> Self {
        Self {
            params,
            sample_rate,
            oscillator: Oscillator::default(),
            envelope: Envelope::default(),
            #[cfg(feature = "rtrb")]
            scope: None,
            last_peak: 0.0,
        }
    }

    /// Attach a visualization tap. Each rendered block is published as one
    /// [`ScopeFrame`], dropped without blocking if the ring is full.
    #[cfg(feature = "rtrb")]
    pub fn with_scope(mut self, scope: ScopeWriter) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Peak magnitude of the most recently rendered block.
    pub fn last_peak(&self) -> f32 {
        self.last_peak
    }

    /// Fill `out` with the next block of mono samples.
    ///
    /// Every slot is written: when the envelope is inactive the computed
    /// value is simply zero. The trigger is consumed before the snapshot
    /// is taken; the Acquire on the swap orders the snapshot loads after
    /// any parameter writes made before the note was raised.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let triggered = self.params.take_trigger();
        let snap = self.params.snapshot();
        if triggered {
            self.envelope.trigger();
        }

        let step = phase_increment(snap.frequency, self.sample_rate);
        let mut peak = 0.0f32;

        for sample in out.iter_mut() {
            let gain = self.envelope.next_gain(&snap.envelope, self.sample_rate);
            let value = snap.amplitude * gain * snap.waveform.sample(self.oscillator.phase());
            *sample = value;
            peak = peak.max(value.abs());
            self.oscillator.advance(step);
        }

        self.last_peak = peak;

        #[cfg(feature = "rtrb")]
        if let Some(scope) = self.scope.as_mut() {
            scope.publish(ScopeFrame::capture(out, peak));
        }
    }
}
