use std::sync::Arc;
use std::thread;

use monovox::dsp::envelope::EnvelopeParams;
use monovox::dsp::Waveform;
use monovox::engine::Engine;
use monovox::params::{SynthParams, MAX_AMPLITUDE, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ};
use monovox::DEFAULT_SAMPLE_RATE;

/// Envelope pinned at full level forever: attack, decay, and release
/// collapsed to zero with an unbounded hold.
fn pinned_open_envelope() -> EnvelopeParams {
    EnvelopeParams {
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain_time: f32::INFINITY,
        release: 0.0,
    }
}

#[test]
fn pinned_envelope_yields_pure_sine() {
    let params = Arc::new(SynthParams::new());
    params.set_frequency(440.0);
    params.set_amplitude(1.0);
    params.set_waveform(Waveform::Sine);
    params.set_envelope(pinned_open_envelope());
    params.trigger_note();

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut out = [0.0f32; 512];
    engine.render_block(&mut out);

    let tau = std::f64::consts::TAU;
    for (i, &got) in out.iter().enumerate() {
        let phase = (tau * 440.0 * i as f64 / DEFAULT_SAMPLE_RATE as f64).rem_euclid(tau);
        let expected = phase.sin() as f32;
        assert!(
            (got - expected).abs() < 1e-3,
            "sample {i}: got {got}, expected {expected}"
        );
    }
}

#[test]
fn engine_without_trigger_renders_only_zeros() {
    let params = Arc::new(SynthParams::new());
    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));

    let mut out = [0.5f32; 512];
    for _ in 0..100 {
        engine.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }
}

#[test]
fn out_of_range_writes_clamp_to_documented_limits() {
    let params = Arc::new(SynthParams::new());

    params.set_amplitude(2.5);
    assert_eq!(params.amplitude(), MAX_AMPLITUDE);

    params.set_frequency(1.0e9);
    assert_eq!(params.frequency(), MAX_FREQUENCY_HZ);
    params.set_frequency(1.0);
    assert_eq!(params.frequency(), MIN_FREQUENCY_HZ);

    params.set_envelope(pinned_open_envelope());
    params.set_frequency(440.0);
    params.trigger_note();

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut out = [0.0f32; 512];
    engine.render_block(&mut out);
    assert!(out.iter().all(|&s| s.abs() <= 1.0));
    assert!(engine.last_peak() > 0.9, "clamped full volume should still sound");
}

#[test]
fn completed_note_can_be_retriggered() {
    let params = Arc::new(SynthParams::new());
    params.set_amplitude(1.0);
    // 40 ms end to end, well inside two 512-sample blocks at 44.1 kHz.
    params.set_envelope(EnvelopeParams::new(0.01, 0.01, 0.5, 0.01, 0.01));
    params.trigger_note();

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut out = [0.0f32; 512];

    engine.render_block(&mut out);
    assert!(out.iter().any(|&s| s != 0.0), "first block should carry the note");

    // Run past the end of the envelope.
    for _ in 0..4 {
        engine.render_block(&mut out);
    }
    engine.render_block(&mut out);
    assert!(
        out.iter().all(|&s| s == 0.0),
        "completed envelope should leave silence"
    );

    params.trigger_note();
    engine.render_block(&mut out);
    assert!(
        out.iter().any(|&s| s != 0.0),
        "retrigger after completion should restart the note"
    );
}

#[test]
fn frequency_change_lands_on_block_boundary_without_phase_reset() {
    let params = Arc::new(SynthParams::new());
    params.set_frequency(440.0);
    params.set_amplitude(1.0);
    params.set_envelope(pinned_open_envelope());
    params.trigger_note();

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut first = [0.0f32; 512];
    engine.render_block(&mut first);

    params.set_frequency(660.0);
    let mut second = [0.0f32; 512];
    engine.render_block(&mut second);

    // The second block must continue from the phase the first block ended
    // on, stepping at the new rate from its very first sample.
    let tau = std::f64::consts::TAU;
    let step_before = tau * 440.0 / DEFAULT_SAMPLE_RATE as f64;
    let step_after = tau * 660.0 / DEFAULT_SAMPLE_RATE as f64;
    for (i, &got) in second.iter().enumerate() {
        let phase = (512.0 * step_before + i as f64 * step_after).rem_euclid(tau);
        let expected = phase.sin() as f32;
        assert!(
            (got - expected).abs() < 2e-3,
            "sample {i}: got {got}, expected {expected}"
        );
    }
}

#[cfg(feature = "rtrb")]
#[test]
fn scope_reader_sees_the_newest_block() {
    use monovox::engine::scope_channel;

    let params = Arc::new(SynthParams::new());
    params.set_envelope(pinned_open_envelope());
    params.trigger_note();

    let (tx, mut rx) = scope_channel(8);
    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params)).with_scope(tx);

    let mut out = [0.0f32; 512];
    for amplitude in [0.2, 0.4, 0.8] {
        params.set_amplitude(amplitude);
        engine.render_block(&mut out);
    }

    let frame = rx.latest();
    assert_eq!(frame.samples(), &out[..], "reader should hold the last rendered block");
    assert!(frame.peak > 0.7 && frame.peak <= 0.8, "peak {} outside final block range", frame.peak);
}

#[test]
fn control_writes_never_break_output_bounds() {
    let params = Arc::new(SynthParams::new());

    let writer = {
        let params = Arc::clone(&params);
        thread::spawn(move || {
            for i in 0..2_000u32 {
                let x = (i % 100) as f32;
                params.set_frequency(20.0 + x * 30.0);
                params.set_amplitude(x / 80.0);
                params.set_waveform(Waveform::from_index((i % 4) as u8));
                params.set_envelope(EnvelopeParams::new(0.001, 0.001, 0.8, 0.002, 0.001));
                if i % 7 == 0 {
                    params.trigger_note();
                }
            }
        })
    };

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut out = [0.0f32; 256];
    for _ in 0..2_000 {
        engine.render_block(&mut out);
        for &s in &out {
            assert!(s.is_finite(), "render produced a non-finite sample");
            assert!(s.abs() <= 1.0, "sample escaped bounds: {s}");
        }
    }

    writer.join().unwrap();
}

#[test]
fn sustained_note_stays_bounded_over_long_renders() {
    let params = Arc::new(SynthParams::new());
    params.set_frequency(440.0);
    params.set_amplitude(1.0);
    params.set_envelope(pinned_open_envelope());
    params.trigger_note();

    let mut engine = Engine::new(DEFAULT_SAMPLE_RATE, Arc::clone(&params));
    let mut out = [0.0f32; 512];
    for _ in 0..2_000 {
        engine.render_block(&mut out);
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(out.iter().all(|s| s.abs() <= 1.0));
    }

    // Roughly 23 seconds in: the tone is still at full level.
    assert!(engine.last_peak() > 0.9);
}
