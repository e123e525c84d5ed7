/// Plays a four-note arpeggio through the default output device, cycling
/// a different waveform for each note.
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use monovox::dsp::envelope::EnvelopeParams;
use monovox::dsp::Waveform;
use monovox::engine::Engine;
use monovox::params::SynthParams;
use monovox::MAX_BLOCK_SIZE;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let params = Arc::new(SynthParams::new());
    params.set_amplitude(0.4);
    params.set_envelope(EnvelopeParams::new(0.02, 0.1, 0.6, 0.4, 0.25));

    let mut engine = Engine::new(sample_rate, Arc::clone(&params));
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    let block = &mut render_buf[..frames_to_render];
                    engine.render_block(block);

                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| eprintln!("Stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    println!("=== monovox beep ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!();

    let notes = [
        (261.63, Waveform::Sine),
        (329.63, Waveform::Triangle),
        (392.00, Waveform::Square),
        (523.25, Waveform::Sawtooth),
    ];
    for (freq, waveform) in notes {
        println!("  {:7.2} Hz  {}", freq, waveform.label());
        params.set_frequency(freq);
        params.set_waveform(waveform);
        params.trigger_note();
        thread::sleep(Duration::from_millis(900));
    }

    Ok(())
}
