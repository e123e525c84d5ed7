//! Lock-free parameter store shared between the control thread and the
//! audio callback.
//!
//! One atomic cell per field: the control surface writes at whatever rate
//! the user types, the engine reads a snapshot once per buffer fill, and
//! neither side can ever block the other. A torn read of a single field is
//! impossible by construction; reads of *different* fields may interleave
//! with writes, which is fine because each field is independently valid.
//!
//! Writes clamp silently instead of failing, so the audio path downstream
//! never sees an out-of-range value and stays total.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::EnvelopeParams;
use crate::dsp::oscillator::Waveform;

pub const MIN_FREQUENCY_HZ: f32 = 20.0;
pub const MAX_FREQUENCY_HZ: f32 = 2_000.0;
pub const MIN_AMPLITUDE: f32 = 0.0;
pub const MAX_AMPLITUDE: f32 = 1.0;

pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;
pub const DEFAULT_AMPLITUDE: f32 = 0.5;

/// `f32` stored as its bit pattern in an `AtomicU32`.
///
/// Plain load/store is all the audio path needs; there is exactly one
/// writer per field, so no read-modify-write cycles are required.
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, ordering: Ordering) -> f32 {
        f32::from_bits(self.bits.load(ordering))
    }

    #[inline]
    pub fn store(&self, value: f32, ordering: Ordering) {
        self.bits.store(value.to_bits(), ordering);
    }
}

/// Plain-value copy of the store, read once per buffer fill.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub frequency: f32,
    pub amplitude: f32,
    pub waveform: Waveform,
    pub envelope: EnvelopeParams,
}

/// The live-tunable synthesizer controls.
///
/// Shared as `Arc<SynthParams>`: the control surface calls the setters and
/// [`SynthParams::trigger_note`], the engine calls [`SynthParams::snapshot`]
/// and [`SynthParams::take_trigger`], and the renderer reads the getters
/// for its display. Every operation is a bounded sequence of atomic
/// loads/stores.
pub struct SynthParams {
    frequency: AtomicF32,
    amplitude: AtomicF32,
    waveform: AtomicU8,
    attack: AtomicF32,
    decay: AtomicF32,
    sustain_level: AtomicF32,
    sustain_time: AtomicF32,
    release: AtomicF32,
    note_trigger: AtomicBool,
}

impl SynthParams {
    pub fn new() -> Self {
        let env = EnvelopeParams::default();
        Self {
            frequency: AtomicF32::new(DEFAULT_FREQUENCY_HZ),
            amplitude: AtomicF32::new(DEFAULT_AMPLITUDE),
            waveform: AtomicU8::new(Waveform::Sine.index()),
            attack: AtomicF32::new(env.attack),
            decay: AtomicF32::new(env.decay),
            sustain_level: AtomicF32::new(env.sustain_level),
            sustain_time: AtomicF32::new(env.sustain_time),
            release: AtomicF32::new(env.release),
            note_trigger: AtomicBool::new(false),
        }
    }

    /// Set the oscillator frequency, clamped to 20..=2000 Hz.
    pub fn set_frequency(&self, hz: f32) {
        let hz = hz.max(MIN_FREQUENCY_HZ).min(MAX_FREQUENCY_HZ);
        self.frequency.store(hz, Ordering::Relaxed);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency.load(Ordering::Relaxed)
    }

    /// Set the output amplitude, clamped to 0..=1.
    pub fn set_amplitude(&self, amplitude: f32) {
        let amplitude = amplitude.max(MIN_AMPLITUDE).min(MAX_AMPLITUDE);
        self.amplitude.store(amplitude, Ordering::Relaxed);
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude.load(Ordering::Relaxed)
    }

    pub fn set_waveform(&self, waveform: Waveform) {
        self.waveform.store(waveform.index(), Ordering::Relaxed);
    }

    pub fn waveform(&self) -> Waveform {
        Waveform::from_index(self.waveform.load(Ordering::Relaxed))
    }

    /// Store a full envelope shape, sanitized field by field.
    pub fn set_envelope(&self, envelope: EnvelopeParams) {
        let env = envelope.sanitized();
        self.attack.store(env.attack, Ordering::Relaxed);
        self.decay.store(env.decay, Ordering::Relaxed);
        self.sustain_level.store(env.sustain_level, Ordering::Relaxed);
        self.sustain_time.store(env.sustain_time, Ordering::Relaxed);
        self.release.store(env.release, Ordering::Relaxed);
    }

    pub fn envelope(&self) -> EnvelopeParams {
        EnvelopeParams {
            attack: self.attack.load(Ordering::Relaxed),
            decay: self.decay.load(Ordering::Relaxed),
            sustain_level: self.sustain_level.load(Ordering::Relaxed),
            sustain_time: self.sustain_time.load(Ordering::Relaxed),
            release: self.release.load(Ordering::Relaxed),
        }
    }

    /// Raise the one-shot note trigger. The Release store pairs with the
    /// Acquire swap in [`SynthParams::take_trigger`], so parameter writes
    /// made before the trigger are visible to the fill that consumes it.
    pub fn trigger_note(&self) {
        self.note_trigger.store(true, Ordering::Release);
    }

    /// Consume a pending trigger. At most one fill observes `true` per
    /// raised trigger.
    pub fn take_trigger(&self) -> bool {
        self.note_trigger.swap(false, Ordering::Acquire)
    }

    /// Copy every field once. Called at the top of each buffer fill so the
    /// whole block renders from one coherent set of values.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            frequency: self.frequency(),
            amplitude: self.amplitude(),
            waveform: self.waveform(),
            envelope: self.envelope(),
        }
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::new()
    }
}
