use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Waveform shapes, all defined over one period of phase p in [0, 2pi):

| shape    | formula              | range  | character        |
| -------- | -------------------- | ------ | ---------------- |
| sine     | sin(p)               | [-1,1] | pure tone        |
| square   | p < pi ? +1 : -1     | {-1,1} | hollow, odd harm |
| triangle | 2*|p/pi - 1| - 1     | [-1,1] | soft, mellow     |
| sawtooth | p/pi - 1             | [-1,1] | bright, buzzy    |

Every shape reduces its argument with the same rem_euclid(2pi) convention, so
switching waveform mid-stream never adds a discontinuity beyond what the
shapes themselves imply, and phase values far outside [0, 2pi) (or negative)
still evaluate correctly.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Decode a stored index. Out-of-range values fall back to `Sine` so a
    /// corrupt or future index can never produce an undefined sample.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Waveform::Sine,
            1 => Waveform::Square,
            2 => Waveform::Triangle,
            3 => Waveform::Sawtooth,
            _ => Waveform::Sine,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Triangle => 2,
            Waveform::Sawtooth => 3,
        }
    }

    /// Display name for UI readouts.
    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine Wave",
            Waveform::Square => "Square Wave",
            Waveform::Triangle => "Triangle Wave",
            Waveform::Sawtooth => "Sawtooth Wave",
        }
    }

    /// Evaluate one sample of this shape at `phase` radians.
    ///
    /// Pure and total: any finite phase yields a value in [-1, 1].
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase.rem_euclid(TAU);
        match self {
            Waveform::Sine => p.sin(),
            Waveform::Square => {
                if p < PI {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 2.0 * (p / PI - 1.0).abs() - 1.0,
            Waveform::Sawtooth => p / PI - 1.0,
        }
    }
}

/// Per-sample phase advance for `frequency` Hz at `sample_rate`.
#[inline]
pub fn phase_increment(frequency: f32, sample_rate: f32) -> f32 {
    TAU * frequency / sample_rate
}

/// Running phase accumulator.
///
/// Owned exclusively by the engine and advanced once per generated sample.
/// The phase is never reset when parameters change; restarting it would put a
/// step into the output (an audible click).
#[derive(Debug, Clone, Copy, Default)]
pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase in [0, 2pi).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by one sample and wrap, keeping the accumulator in [0, 2pi)
    /// so floating error stays bounded over arbitrarily long runs.
    #[inline]
    pub fn advance(&mut self, phase_inc: f32) {
        self.phase = (self.phase + phase_inc).rem_euclid(TAU);
    }
}
