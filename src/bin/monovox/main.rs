//! monovox - single-voice synthesizer with a terminal front end
//!
//! Run with: cargo run
//!
//! Keys follow the panel footer: `m` fires the envelope, `1`-`4` pick the
//! waveform, and letter pairs nudge each parameter up or down.

mod app;
mod keys;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();

    let res = app::run(terminal);

    ratatui::restore();
    res
}
