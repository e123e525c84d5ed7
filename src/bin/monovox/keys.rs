//! Keyboard bindings for the control surface.
//!
//! Each handler is one or two atomic writes into the parameter store;
//! range clamping lives in the store, not here.

use crossterm::event::KeyCode;

use monovox::dsp::envelope::EnvelopeParams;
use monovox::dsp::Waveform;
use monovox::params::SynthParams;

const TIME_STEP: f32 = 0.1;
const LEVEL_STEP: f32 = 0.1;
const FREQ_STEP: f32 = 10.0;

pub enum KeyAction {
    Continue,
    Quit,
}

pub fn handle_key(code: KeyCode, params: &SynthParams) -> KeyAction {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,

        KeyCode::Char('m') => params.trigger_note(),

        KeyCode::Char('1') => params.set_waveform(Waveform::Sine),
        KeyCode::Char('2') => params.set_waveform(Waveform::Square),
        KeyCode::Char('3') => params.set_waveform(Waveform::Triangle),
        KeyCode::Char('4') => params.set_waveform(Waveform::Sawtooth),

        KeyCode::Char('a') => params.set_amplitude(params.amplitude() + LEVEL_STEP),
        KeyCode::Char('z') => params.set_amplitude(params.amplitude() - LEVEL_STEP),
        KeyCode::Char('f') => params.set_frequency(params.frequency() + FREQ_STEP),
        KeyCode::Char('v') => params.set_frequency(params.frequency() - FREQ_STEP),

        KeyCode::Char('y') => adjust_envelope(params, |env| env.attack += TIME_STEP),
        KeyCode::Char('h') => adjust_envelope(params, |env| env.attack -= TIME_STEP),
        KeyCode::Char('u') => adjust_envelope(params, |env| env.decay += TIME_STEP),
        KeyCode::Char('j') => adjust_envelope(params, |env| env.decay -= TIME_STEP),
        KeyCode::Char('i') => adjust_envelope(params, |env| env.sustain_level += LEVEL_STEP),
        KeyCode::Char('k') => adjust_envelope(params, |env| env.sustain_level -= LEVEL_STEP),
        KeyCode::Char('t') => adjust_envelope(params, |env| env.sustain_time += TIME_STEP),
        KeyCode::Char('g') => adjust_envelope(params, |env| env.sustain_time -= TIME_STEP),
        KeyCode::Char('o') => adjust_envelope(params, |env| env.release += TIME_STEP),
        KeyCode::Char('l') => adjust_envelope(params, |env| env.release -= TIME_STEP),

        _ => {}
    }
    KeyAction::Continue
}

/// Read-modify-write of the envelope fields. Only this thread writes them,
/// so the read-back cannot race another writer; `set_envelope` sanitizes.
fn adjust_envelope(params: &SynthParams, tweak: impl FnOnce(&mut EnvelopeParams)) {
    let mut env = params.envelope();
    tweak(&mut env);
    params.set_envelope(env);
}
