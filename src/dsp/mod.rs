//! DSP building blocks for offline effect synthesis.
//!
//! Everything here is a pure function of time (plus an explicit noise
//! source), so effects render identically wherever they run: the
//! `generate-sounds` CLI or the browser through WASM.

pub mod buffer;
pub mod envelope;
pub mod noise;
pub mod oscillator;

pub use buffer::{DEFAULT_SAMPLE_RATE, SampleBuffer, TimeAxis, linspace, sample_count};
pub use envelope::{Decay, Lfo};
pub use noise::NoiseSource;
pub use oscillator::{Sweep, bit_crush, sine, swept_freq};
