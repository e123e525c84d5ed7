//! Audio bootstrap and the UI event loop.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use monovox::engine::{scope_channel, Engine, ScopeReader, ScopeWriter};
use monovox::params::SynthParams;
use monovox::MAX_BLOCK_SIZE;

use super::keys::{self, KeyAction};
use super::ui::{self, Spectrum};

/// Frames buffered between the audio callback and the display.
const SCOPE_RING_FRAMES: usize = 8;

/// Number of bins in the spectrum panel.
const SPECTRUM_BINS: usize = 48;

/// Open the default output device, start the stream, and hand control to
/// the UI until the user quits.
pub fn run(mut terminal: DefaultTerminal) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let params = Arc::new(SynthParams::new());
    let (scope_tx, scope_rx) = scope_channel(SCOPE_RING_FRAMES);

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_stream::<f32>(&device, &config.into(), Arc::clone(&params), scope_tx)
        }
        cpal::SampleFormat::I16 => {
            build_stream::<i16>(&device, &config.into(), Arc::clone(&params), scope_tx)
        }
        cpal::SampleFormat::U16 => {
            build_stream::<u16>(&device, &config.into(), Arc::clone(&params), scope_tx)
        }
        format => Err(eyre!("unsupported sample format {format}")),
    }?;
    stream.play().wrap_err("failed to start output stream")?;

    let mut app = App::new(params, scope_rx, sample_rate);
    app.run(&mut terminal)
}

/// Build an output stream in the device's native sample format. The engine
/// renders mono f32 blocks; conversion and channel spreading happen here.
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    params: Arc<SynthParams>,
    scope: ScopeWriter,
) -> EyreResult<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;

    let mut engine = Engine::new(sample_rate, params).with_scope(scope);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    let block = &mut render_buf[..frames_to_render];
                    engine.render_block(block);

                    // Duplicate mono to all channels and write to device
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        let value = T::from_sample(s);
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = value;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            move |err| eprintln!("Stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    Ok(stream)
}

/// UI-side state: the parameter store, the scope tap, and the analyzer.
pub struct App {
    params: Arc<SynthParams>,
    scope: ScopeReader,
    spectrum: Spectrum,
    sample_rate: f32,
    should_quit: bool,
}

impl App {
    pub fn new(params: Arc<SynthParams>, scope: ScopeReader, sample_rate: f32) -> Self {
        let spectrum = Spectrum::new(sample_rate, SPECTRUM_BINS);
        Self {
            params,
            scope,
            spectrum,
            sample_rate,
            should_quit: false,
        }
    }

    /// Run the UI event loop at roughly 60 fps until quit.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Copy the newest frame out so the reader borrow ends here.
            let frame = *self.scope.latest();
            self.spectrum.update(frame.samples());
            let snapshot = self.params.snapshot();

            terminal.draw(|f| {
                ui::render(
                    f,
                    &snapshot,
                    &frame,
                    self.spectrum.data(),
                    self.sample_rate,
                )
            })?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let KeyAction::Quit = keys::handle_key(key.code, &self.params) {
                            self.should_quit = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
