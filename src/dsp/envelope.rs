#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
One-shot ADSR envelope
======================

This envelope shapes the amplitude of a note over time. Unlike a gate-held
ADSR (attack while the key is down, release when it lifts), this one is a
one-shot: a single trigger plays the whole contour, including a sustain
phase of fixed length, and then goes quiet.

  Gain
   1.0 |     /\
       |    /  \________
   S   |   /            \
       |  /              \
   0.0 |_/________________\______ time since trigger
        Attack Decay Hold  Release
         (A)    (D)  (Sd)    (R)

Vocabulary
----------

  gain       The envelope's output, 0.0 to 1.0. Multiplies the oscillator.

  stage      Where we are in the contour: Idle, Attack, Decay, Sustain,
             Release, or Done. Idle means "never triggered", Done means
             "the one-shot finished". Both are silent; only a new trigger
             leaves either.

  elapsed    Whole samples since the trigger. The engine advances this
             counter itself, one step per generated sample, so envelope
             time is locked to the sample stream. No wall clock is read
             anywhere in the audio path; a callback that runs early or
             late still produces exactly the same samples.

The math
--------

Gain is a pure piecewise-linear function of elapsed time t:

  t in [0, A)           t / A                 ramp 0 -> 1
  t in [A, A+D)         1 - (t-A)/D * (1-S)   ramp 1 -> S
  t in [A+D, A+D+Sd)    S                     hold
  t in [.., +R)         S * (1 - (t-..)/R)    ramp S -> 0
  later                 0

A zero-length phase never divides by zero: its half-open interval is empty,
so its branch is simply skipped and the contour jumps to the next value.
Retriggering works from any stage (including mid-Release) by restarting the
clock at zero; gain does not have to reach zero first.
*/

/// Envelope shape parameters. Times are in seconds; `sustain_level` is a
/// plain gain factor. Construct through [`EnvelopeParams::new`] (or call
/// [`EnvelopeParams::sanitized`]) to keep the fields in range: times
/// non-negative, level in [0, 1]. An infinite `sustain_time` holds the
/// sustain stage forever.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain_level: f32,
    pub sustain_time: f32,
    pub release: f32,
}

impl EnvelopeParams {
    pub fn new(
        attack: f32,
        decay: f32,
        sustain_level: f32,
        sustain_time: f32,
        release: f32,
    ) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain_level: sustain_level.max(0.0).min(1.0),
            sustain_time: sustain_time.max(0.0),
            release: release.max(0.0),
        }
    }

    /// Re-apply the range rules after direct field edits.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.attack,
            self.decay,
            self.sustain_level,
            self.sustain_time,
            self.release,
        )
    }

    /// Length of the full contour in seconds (infinite for an unbounded
    /// sustain).
    pub fn total_duration(&self) -> f32 {
        self.attack + self.decay + self.sustain_time + self.release
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.1,
            sustain_level: 0.7,
            sustain_time: 0.5,
            release: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // Never triggered; silent
    Attack,  // Ramping 0 -> 1
    Decay,   // Ramping 1 -> sustain level
    Sustain, // Holding the sustain level for the configured time
    Release, // Ramping sustain level -> 0
    Done,    // One-shot finished; silent until the next trigger
}

/// Envelope gain at `t` seconds after the trigger.
///
/// Pure and total for sanitized parameters; the result is always in [0, 1].
pub fn gain_at(t: f32, params: &EnvelopeParams) -> f32 {
    let attack_end = params.attack;
    let decay_end = attack_end + params.decay;
    let sustain_end = decay_end + params.sustain_time;
    let release_end = sustain_end + params.release;

    if t < 0.0 {
        0.0
    } else if t < attack_end {
        t / params.attack
    } else if t < decay_end {
        1.0 - (t - attack_end) / params.decay * (1.0 - params.sustain_level)
    } else if t < sustain_end {
        params.sustain_level
    } else if t < release_end {
        params.sustain_level * (1.0 - (t - sustain_end) / params.release)
    } else {
        0.0
    }
}

/// Stage of the contour at `t` seconds after the trigger.
pub fn stage_at(t: f32, params: &EnvelopeParams) -> EnvelopeStage {
    let attack_end = params.attack;
    let decay_end = attack_end + params.decay;
    let sustain_end = decay_end + params.sustain_time;
    let release_end = sustain_end + params.release;

    if t < attack_end {
        EnvelopeStage::Attack
    } else if t < decay_end {
        EnvelopeStage::Decay
    } else if t < sustain_end {
        EnvelopeStage::Sustain
    } else if t < release_end {
        EnvelopeStage::Release
    } else {
        EnvelopeStage::Done
    }
}

/// Runtime envelope state: the stage and the sample counter since trigger.
///
/// Owned exclusively by the engine; the control thread only raises triggers
/// through the parameter store.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    stage: EnvelopeStage,
    elapsed: u64,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            stage: EnvelopeStage::Idle,
            elapsed: 0,
        }
    }

    /// Restart the contour from Attack at offset zero. Valid from any
    /// stage; a retrigger mid-Release does not wait for gain to reach zero.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.elapsed = 0;
    }

    /// Gain for the current sample, then advance the clock by one sample.
    pub fn next_gain(&mut self, params: &EnvelopeParams, sample_rate: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }

        let t = self.elapsed as f32 / sample_rate;
        let gain = gain_at(t, params);
        self.stage = stage_at(t, params);
        self.elapsed += 1;

        debug_assert!((0.0..=1.0).contains(&gain));
        gain
    }

    /// True while the contour is producing (or about to produce) output.
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeStage::Idle | EnvelopeStage::Done)
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn elapsed_samples(&self) -> u64 {
        self.elapsed
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
