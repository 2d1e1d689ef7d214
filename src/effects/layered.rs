//! The layered palette: whole-buffer formulas mixing tones, sweeps and
//! Gaussian noise on an endpoint-inclusive time axis.

use crate::dsp::{Decay, Lfo, NoiseSource, SampleBuffer, Sweep, TimeAxis, bit_crush, sine};

use super::{Effect, EffectParams};

/// Sweep start, sweep end, crushed tone.
const GLITCH_FREQS: [f64; 3] = [200.0, 2000.0, 1000.0];
/// First half tone, second half tone.
const ERROR_FREQS: [f64; 2] = [800.0, 600.0];
const SUCCESS_NOTES: [f64; 3] = [523.25, 659.25, 783.99];
const TYPING_FREQS: [f64; 2] = [4000.0, 2000.0];
const BEEP_FREQS: [f64; 1] = [1000.0];
const POWER_ON_FREQS: [f64; 2] = [50.0, 15000.0];
const POWER_OFF_FREQS: [f64; 2] = [5000.0, 50.0];
/// Amplitude LFO rate.
const STATIC_FREQS: [f64; 1] = [0.5];

const GLITCH_DROPOUTS: usize = 5;
const GLITCH_DROPOUT_LEN: usize = 50;
/// Dropouts start at least this far before the end of the buffer.
const GLITCH_DROPOUT_MARGIN: usize = 100;
const GLITCH_CRUSH_LEVELS: f64 = 4.0;

pub(super) fn defaults(effect: Effect) -> (f64, &'static [f64]) {
    match effect {
        Effect::Glitch => (0.2, &GLITCH_FREQS),
        Effect::Error => (0.5, &ERROR_FREQS),
        Effect::Success => (0.8, &SUCCESS_NOTES),
        Effect::Typing => (0.05, &TYPING_FREQS),
        Effect::Beep => (0.1, &BEEP_FREQS),
        Effect::PowerOn => (1.0, &POWER_ON_FREQS),
        Effect::PowerOff => (0.5, &POWER_OFF_FREQS),
        Effect::Static => (1.0, &STATIC_FREQS),
    }
}

pub(super) fn render(effect: Effect, params: &EffectParams, noise: &mut NoiseSource) -> SampleBuffer {
    let n = params.sample_count();
    let t = TimeAxis::Spanning.times(n, params.duration, params.sample_rate);
    let mut buf = SampleBuffer::from_samples(
        params.sample_rate,
        match effect {
            Effect::Glitch => glitch(params, &t, noise),
            Effect::Error => error(params, &t),
            Effect::Success => success(params, &t),
            Effect::Typing => typing(params, &t, noise),
            Effect::Beep => beep(params, &t),
            Effect::PowerOn => power_on(params, &t, noise),
            Effect::PowerOff => power_off(params, &t),
            Effect::Static => static_noise(params, &t, noise),
        },
    );
    if effect == Effect::Glitch {
        add_dropouts(&mut buf, noise);
    }
    buf
}

/// Noise, an upward sweep and a bit-crushed tone.
fn glitch(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let sweep = Sweep::new(
        params.frequency(0, GLITCH_FREQS[0]),
        params.frequency(1, GLITCH_FREQS[1]),
    );
    let crushed = params.frequency(2, GLITCH_FREQS[2]);
    let n = t.len();
    t.iter()
        .enumerate()
        .map(|(i, &t)| {
            0.3 * noise.gaussian(0.1)
                + 0.3 * sweep.sample(i, n, t)
                + 0.2 * bit_crush(sine(crushed, t), GLITCH_CRUSH_LEVELS)
        })
        .collect()
}

/// Silence a few short random windows.
fn add_dropouts(buf: &mut SampleBuffer, noise: &mut NoiseSource) {
    if buf.len() <= GLITCH_DROPOUT_MARGIN {
        return;
    }
    let span = buf.len() - GLITCH_DROPOUT_MARGIN;
    for _ in 0..GLITCH_DROPOUTS {
        let start = noise.index_below(span);
        buf.zero_range(start, GLITCH_DROPOUT_LEN);
    }
}

/// High tone then low tone, one decay across both.
fn error(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let high = params.frequency(0, ERROR_FREQS[0]);
    let low = params.frequency(1, ERROR_FREQS[1]);
    let env = Decay::new(3.0);
    let half = t.len() / 2;
    t.iter()
        .enumerate()
        .map(|(i, &t)| {
            let freq = if i < half { high } else { low };
            sine(freq, t) * env.gain(t) * 0.5
        })
        .collect()
}

/// Three equal segments, one note each; any remainder is silent.
fn success(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let notes: Vec<f64> = (0..SUCCESS_NOTES.len())
        .map(|i| params.frequency(i, SUCCESS_NOTES[i]))
        .collect();
    let env = Decay::new(5.0);
    let segment = t.len() / notes.len();
    t.iter()
        .enumerate()
        .map(|(i, &t)| {
            let note = if segment == 0 { notes.len() } else { i / segment };
            match notes.get(note) {
                Some(&freq) => sine(freq, t) * env.gain(t) * 0.4,
                None => 0.0,
            }
        })
        .collect()
}

/// Mechanical click: two partials and noise under a very sharp decay.
fn typing(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let f1 = params.frequency(0, TYPING_FREQS[0]);
    let f2 = params.frequency(1, TYPING_FREQS[1]);
    let env = Decay::new(200.0);
    t.iter()
        .map(|&t| {
            let click = sine(f1, t) * 0.3 + sine(f2, t) * 0.3 + noise.gaussian(0.1);
            click * env.gain(t) * 0.5
        })
        .collect()
}

fn beep(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let freq = params.frequency(0, BEEP_FREQS[0]);
    let env = Decay::new(10.0);
    t.iter().map(|&t| sine(freq, t) * env.gain(t) * 0.5).collect()
}

/// Wide rising sweep with a burst of fading static.
fn power_on(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let sweep = Sweep::new(
        params.frequency(0, POWER_ON_FREQS[0]),
        params.frequency(1, POWER_ON_FREQS[1]),
    );
    let tone_env = Decay::new(2.0);
    let static_env = Decay::new(5.0);
    let n = t.len();
    t.iter()
        .enumerate()
        .map(|(i, &t)| {
            let tone = sweep.sample(i, n, t) * tone_env.gain(t);
            let crackle = noise.gaussian(0.05) * static_env.gain(t);
            (tone + crackle) * 0.4
        })
        .collect()
}

fn power_off(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let sweep = Sweep::new(
        params.frequency(0, POWER_OFF_FREQS[0]),
        params.frequency(1, POWER_OFF_FREQS[1]),
    );
    let env = Decay::new(10.0);
    let n = t.len();
    t.iter()
        .enumerate()
        .map(|(i, &t)| sweep.sample(i, n, t) * env.gain(t) * 0.5)
        .collect()
}

/// Gaussian white noise with a slow swell.
fn static_noise(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let lfo = Lfo::new(params.frequency(0, STATIC_FREQS[0]), 0.8, 0.2);
    t.iter().map(|&t| noise.gaussian(0.1) * lfo.gain(t)).collect()
}
