//! Panel rendering for the terminal front end.
//!
//! Left side is the oscilloscope; the right column stacks the spectrum,
//! the envelope shape, and the parameter readout with key help.

mod spectrum;

pub use spectrum::Spectrum;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use monovox::dsp::envelope::{gain_at, EnvelopeParams};
use monovox::engine::ScopeFrame;
use monovox::params::ParamSnapshot;

/// Points plotted for the envelope shape.
const ENVELOPE_POINTS: usize = 128;

pub fn render(
    frame: &mut Frame,
    snapshot: &ParamSnapshot,
    scope: &ScopeFrame,
    spectrum: &[(f64, f64)],
    sample_rate: f32,
) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(main_chunks[1]);

    render_scope(frame, main_chunks[0], scope);
    spectrum::render_spectrum(frame, right_chunks[0], spectrum);
    render_envelope(frame, right_chunks[1], &snapshot.envelope);
    render_info(frame, right_chunks[2], snapshot, scope.peak, sample_rate);
}

fn render_scope(frame: &mut Frame, area: Rect, scope: &ScopeFrame) {
    let samples = scope.samples();

    // Downsample to chart width
    let target_w = area.width.max(1) as usize;
    let step = (samples.len() + target_w - 1) / target_w;
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(target_w);
    let mut i = 0usize;
    while i < samples.len() {
        points.push((i as f64, samples[i] as f64));
        i = i.saturating_add(step);
    }

    let chart = Chart::new(vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)])
    .block(Block::default().title(" Oscilloscope ").borders(Borders::ALL))
    .x_axis(
        Axis::default()
            .bounds([0.0, samples.len().max(1) as f64])
            .style(Style::default().fg(Color::DarkGray)),
    )
    .y_axis(
        Axis::default()
            .bounds([-1.0, 1.0])
            .style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(chart, area);
}

fn render_envelope(frame: &mut Frame, area: Rect, env: &EnvelopeParams) {
    let span = display_span(env);
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(ENVELOPE_POINTS);
    for i in 0..ENVELOPE_POINTS {
        let t = span * i as f32 / (ENVELOPE_POINTS - 1) as f32;
        points.push((t as f64, gain_at(t, env) as f64));
    }

    let chart = Chart::new(vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)])
    .block(Block::default().title(" Envelope ").borders(Borders::ALL))
    .x_axis(
        Axis::default()
            .bounds([0.0, span as f64])
            .style(Style::default().fg(Color::DarkGray)),
    )
    .y_axis(
        Axis::default()
            .bounds([0.0, 1.0])
            .style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(chart, area);
}

/// Plot window for the envelope shape. An unbounded hold still gets a
/// finite window showing the ramps plus a second of sustain.
fn display_span(env: &EnvelopeParams) -> f32 {
    let total = env.total_duration();
    if total.is_finite() && total > 0.0 {
        total
    } else {
        env.attack + env.decay + env.release + 1.0
    }
}

fn render_info(
    frame: &mut Frame,
    area: Rect,
    snapshot: &ParamSnapshot,
    peak: f32,
    sample_rate: f32,
) {
    let env = &snapshot.envelope;
    let lines: Vec<Line> = vec![
        format!("Waveform: {}", snapshot.waveform.label()).into(),
        format!(
            "Freq: {:.0} Hz   Amp: {:.2}",
            snapshot.frequency, snapshot.amplitude
        )
        .into(),
        format!("Attack: {:.2}s   Decay: {:.2}s", env.attack, env.decay).into(),
        format!(
            "Sustain: {:.2} for {:.2}s",
            env.sustain_level, env.sustain_time
        )
        .into(),
        format!("Release: {:.2}s", env.release).into(),
        format!("Peak: {:.3}   Rate: {:.0} Hz", peak, sample_rate).into(),
        "".into(),
        "m trigger   1-4 waveform   q quit".into(),
        "f/v freq    a/z amp    t/g hold".into(),
        "y/h attack  u/j decay".into(),
        "i/k sustain o/l release".into(),
    ];

    let info = Paragraph::new(lines).block(Block::default().title(" Controls ").borders(Borders::ALL));
    frame.render_widget(info, area);
}
