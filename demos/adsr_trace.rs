/// Offline envelope trace: renders a triggered note through the engine
/// and prints one row per time slice with the measured peak, the stage,
/// and the gain the envelope math predicts for the same instant.
use std::sync::Arc;

use monovox::dsp::envelope::{gain_at, stage_at, EnvelopeParams};
use monovox::engine::Engine;
use monovox::params::SynthParams;
use monovox::MAX_BLOCK_SIZE;

const SAMPLE_RATE: f32 = 44_100.0;
const SLICES: usize = 40;
const BAR_WIDTH: f32 = 48.0;

fn main() {
    let env = EnvelopeParams::new(0.5, 0.3, 0.6, 1.0, 0.7);
    let total = env.total_duration();

    println!("=== one-shot envelope trace ===");
    println!(
        "attack {:.2}s  decay {:.2}s  sustain {:.2} for {:.2}s  release {:.2}s",
        env.attack, env.decay, env.sustain_level, env.sustain_time, env.release
    );
    println!("total {:.2}s at {} Hz\n", total, SAMPLE_RATE);

    let params = Arc::new(SynthParams::new());
    params.set_amplitude(1.0);
    params.set_envelope(env);
    params.trigger_note();

    let mut engine = Engine::new(SAMPLE_RATE, Arc::clone(&params));

    let slice_duration = total / SLICES as f32;
    let slice_samples = (slice_duration * SAMPLE_RATE) as usize;
    let mut buffer = vec![0.0f32; MAX_BLOCK_SIZE];

    for i in 0..SLICES {
        // Render one slice in engine-sized chunks and keep its peak.
        let mut peak = 0.0f32;
        let mut remaining = slice_samples;
        while remaining > 0 {
            let chunk = remaining.min(MAX_BLOCK_SIZE);
            engine.render_block(&mut buffer[..chunk]);
            peak = peak.max(engine.last_peak());
            remaining -= chunk;
        }

        let t_mid = (i as f32 + 0.5) * slice_duration;
        let stage = format!("{:?}", stage_at(t_mid, &env));
        let bar = "#".repeat((peak * BAR_WIDTH).round() as usize);
        println!(
            "{:5.2}s  {:<8}  peak {:.3}  gain {:.3}  |{}",
            t_mid,
            stage,
            peak,
            gain_at(t_mid, &env),
            bar
        );
    }

    println!("\nDone: envelope ran to completion, output is silent again.");
}
