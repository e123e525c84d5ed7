pub mod dsp;
pub mod engine; // Buffer-fill loop and visualization plumbing
pub mod params; // Lock-free parameter store shared with the control thread

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Reference sample rate used by offline demos and tests.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
