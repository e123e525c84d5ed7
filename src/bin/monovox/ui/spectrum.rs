//! Spectrum panel: Hann window, forward FFT, log-spaced bins in dB.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use monovox::engine::SCOPE_FRAME_LEN;

/// Frequency analyzer sized to one scope frame.
pub struct Spectrum {
    window: Vec<f32>,
    freq_bins: Vec<f64>,
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    data: Vec<(f64, f64)>,
}

impl Spectrum {
    pub fn new(sample_rate: f32, num_bins: usize) -> Self {
        let len = SCOPE_FRAME_LEN;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);

        // Hann window
        let denom = (len - 1) as f32;
        let window: Vec<f32> = (0..len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        // Log-spaced bins from 20 Hz up to Nyquist, capped at 20 kHz
        let max_freq = (sample_rate as f64 / 2.0).min(20_000.0).max(1.0);
        let min_freq = 20.0f64.min(max_freq);
        let ratio = max_freq / min_freq;
        let half = (len / 2).max(1);

        let mut freq_bins = Vec::with_capacity(num_bins);
        let mut bin_indices = Vec::with_capacity(num_bins);
        for i in 0..num_bins {
            let t = if num_bins > 1 {
                i as f64 / (num_bins - 1) as f64
            } else {
                0.0
            };
            let freq = if ratio > 1.0 {
                min_freq * ratio.powf(t)
            } else {
                min_freq + (max_freq - min_freq) * t
            };
            let index = ((freq * len as f64 / sample_rate as f64).round() as usize).min(half - 1);
            freq_bins.push(freq);
            bin_indices.push(index);
        }

        let scratch = vec![Complex::new(0.0, 0.0); len];
        let data = freq_bins.iter().map(|&f| (f, -120.0)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch,
            data,
        }
    }

    /// Analyze one frame of samples. Shorter input is zero-padded to the
    /// FFT length.
    pub fn update(&mut self, samples: &[f32]) {
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let s = samples.get(i).copied().unwrap_or(0.0);
            slot.re = s * self.window[i];
            slot.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for (i, &idx) in self.bin_indices.iter().enumerate() {
            let bin = self.scratch[idx];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            self.data[i] = (self.freq_bins[i], 10.0 * (power as f64).log10());
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.data
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, data: &[(f64, f64)]) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data);

    let max_freq = data.iter().map(|(f, _)| *f).fold(0.0, f64::max).max(1.0);
    let max_db = data.iter().map(|(_, db)| *db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(Axis::default().title("Hz").bounds([0.0, max_freq]))
        .y_axis(
            Axis::default()
                .title("dB")
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"]),
        );

    frame.render_widget(chart, area);
}
