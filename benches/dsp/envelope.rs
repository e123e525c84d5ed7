//! Benchmarks for the one-shot envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monovox::dsp::envelope::{Envelope, EnvelopeParams};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase: ramp long enough that the bench never leaves it
        let attack_params = EnvelopeParams::new(1.0e6, 0.1, 0.7, 0.5, 0.1);
        let mut env = Envelope::default();
        env.trigger();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = env.next_gain(black_box(&attack_params), SAMPLE_RATE);
                }
            })
        });

        // Sustain phase: unbounded hold, steady-state cascade cost
        let sustain_params = EnvelopeParams {
            attack: 0.001,
            decay: 0.001,
            sustain_level: 0.7,
            sustain_time: f32::INFINITY,
            release: 0.1,
        };
        let mut env = Envelope::default();
        env.trigger();
        for _ in 0..200 {
            env.next_gain(&sustain_params, SAMPLE_RATE);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = env.next_gain(black_box(&sustain_params), SAMPLE_RATE);
                }
            })
        });

        // Idle: the early-out taken before a note is ever triggered
        let idle_params = EnvelopeParams::default();
        let mut env = Envelope::default();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = env.next_gain(black_box(&idle_params), SAMPLE_RATE);
                }
            })
        });
    }

    group.finish();
}
