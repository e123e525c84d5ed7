//! Benchmarks for full buffer fills through the parameter store.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use monovox::dsp::envelope::EnvelopeParams;
use monovox::engine::Engine;
use monovox::params::SynthParams;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn held_open() -> EnvelopeParams {
    EnvelopeParams {
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain_time: f32::INFINITY,
        release: 0.0,
    }
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/render");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Active voice: every sample runs oscillator and envelope
        let params = Arc::new(SynthParams::new());
        params.set_amplitude(1.0);
        params.set_envelope(held_open());
        params.trigger_note();
        let mut engine = Engine::new(SAMPLE_RATE, Arc::clone(&params));
        group.bench_with_input(BenchmarkId::new("active", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // Idle voice: snapshot plus a zero fill
        let params = Arc::new(SynthParams::new());
        let mut engine = Engine::new(SAMPLE_RATE, Arc::clone(&params));
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // Active voice with the scope tap attached (ring mostly full, so
        // this measures the drop-on-full publish path too)
        #[cfg(feature = "rtrb")]
        {
            use monovox::engine::scope_channel;

            let params = Arc::new(SynthParams::new());
            params.set_amplitude(1.0);
            params.set_envelope(held_open());
            params.trigger_note();
            let (tx, rx) = scope_channel(8);
            let mut engine = Engine::new(SAMPLE_RATE, Arc::clone(&params)).with_scope(tx);
            group.bench_with_input(BenchmarkId::new("active_scoped", size), &size, |b, _| {
                b.iter(|| engine.render_block(black_box(&mut buffer)))
            });
            drop(rx);
        }
    }

    group.finish();
}
