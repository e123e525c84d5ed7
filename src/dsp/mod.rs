//! Low-level DSP primitives used by the synthesis engine.
//!
//! These components are allocation-free and realtime-safe, making them safe
//! to run inside an audio callback. They stay focused on the signal math;
//! parameter sharing and buffer management live a layer up.

/// One-shot attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Waveform shapes and the phase accumulator.
pub mod oscillator;

pub use envelope::EnvelopeStage;
pub use oscillator::Waveform;
