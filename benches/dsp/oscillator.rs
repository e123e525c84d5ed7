//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monovox::dsp::oscillator::{phase_increment, Oscillator};
use monovox::dsp::Waveform;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let step = phase_increment(440.0, SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - one sin() call per sample
        let mut osc = Oscillator::default();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = Waveform::Sine.sample(osc.phase());
                    osc.advance(step);
                }
                black_box(&buffer);
            })
        });

        // Sawtooth - linear ramp on the reduced phase
        let mut osc = Oscillator::default();
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = Waveform::Sawtooth.sample(osc.phase());
                    osc.advance(step);
                }
                black_box(&buffer);
            })
        });

        // Square - sign test per sample
        let mut osc = Oscillator::default();
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = Waveform::Square.sample(osc.phase());
                    osc.advance(step);
                }
                black_box(&buffer);
            })
        });

        // Triangle - abs() and a rescale
        let mut osc = Oscillator::default();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = Waveform::Triangle.sample(osc.phase());
                    osc.advance(step);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
