//! The simple palette: one formula per sample on `t = i / sample_rate`.

use crate::dsp::{Decay, NoiseSource, SampleBuffer, TimeAxis, sine, swept_freq};

use super::{Effect, EffectParams};

const GLITCH_FREQS: [f64; 2] = [80.0, 1200.0];
/// Start frequency and fall rate (Hz per second).
const ERROR_FREQS: [f64; 2] = [800.0, 400.0];
const SUCCESS_NOTES: [f64; 3] = [523.25, 659.25, 783.99];
const TYPING_FREQS: [f64; 2] = [3000.0, 1500.0];
const BEEP_FREQS: [f64; 1] = [1000.0];
/// Start frequency and rise rate (Hz per second).
const POWER_ON_FREQS: [f64; 2] = [50.0, 5000.0];
/// Start frequency and fall rate (Hz per second).
const POWER_OFF_FREQS: [f64; 2] = [5000.0, 10000.0];

/// Success notes advance this many times per second.
const SUCCESS_NOTE_RATE: f64 = 5.0;

pub(super) fn defaults(effect: Effect) -> (f64, &'static [f64]) {
    match effect {
        Effect::Glitch => (0.2, &GLITCH_FREQS),
        Effect::Error => (0.5, &ERROR_FREQS),
        Effect::Success => (0.6, &SUCCESS_NOTES),
        Effect::Typing => (0.05, &TYPING_FREQS),
        Effect::Beep => (0.1, &BEEP_FREQS),
        Effect::PowerOn => (1.0, &POWER_ON_FREQS),
        Effect::PowerOff => (0.5, &POWER_OFF_FREQS),
        Effect::Static => (1.0, &[]),
    }
}

pub(super) fn render(effect: Effect, params: &EffectParams, noise: &mut NoiseSource) -> SampleBuffer {
    let n = params.sample_count();
    let t = TimeAxis::Stepped.times(n, params.duration, params.sample_rate);
    let samples = match effect {
        Effect::Glitch => glitch(params, &t, noise),
        Effect::Error => error(params, &t),
        Effect::Success => success(params, &t),
        Effect::Typing => typing(params, &t, noise),
        Effect::Beep => beep(params, &t),
        Effect::PowerOn => power_on(params, &t),
        Effect::PowerOff => power_off(params, &t),
        Effect::Static => static_noise(&t, noise),
    };
    SampleBuffer::from_samples(params.sample_rate, samples)
}

/// Low buzz, then white noise, then a high tone, with random spikes.
fn glitch(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let low = params.frequency(0, GLITCH_FREQS[0]);
    let high = params.frequency(1, GLITCH_FREQS[1]);
    let n = t.len();
    t.iter()
        .enumerate()
        .map(|(i, &t)| {
            let mut s = if i < n / 3 {
                sine(low, t) * 0.3
            } else if i < 2 * n / 3 {
                noise.uniform(-0.5, 0.5)
            } else {
                sine(high, t) * 0.2
            };
            if noise.chance(0.1) {
                s = noise.uniform(-0.8, 0.8);
            }
            s
        })
        .collect()
}

/// Descending tone.
fn error(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let start = params.frequency(0, ERROR_FREQS[0]);
    let fall = params.frequency(1, ERROR_FREQS[1]);
    let env = Decay::new(3.0);
    t.iter()
        .map(|&t| sine(swept_freq(start, -fall, t), t) * env.gain(t) * 0.5)
        .collect()
}

/// Ascending arpeggio, silent once the notes run out.
fn success(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let notes: Vec<f64> = (0..SUCCESS_NOTES.len())
        .map(|i| params.frequency(i, SUCCESS_NOTES[i]))
        .collect();
    let env = Decay::new(2.0);
    t.iter()
        .map(|&t| {
            let note = (t * SUCCESS_NOTE_RATE) as usize;
            match notes.get(note) {
                Some(&freq) => sine(freq, t) * env.gain(t) * 0.4,
                None => 0.0,
            }
        })
        .collect()
}

/// Two partials plus noise with a sharp decay.
fn typing(params: &EffectParams, t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    let f1 = params.frequency(0, TYPING_FREQS[0]);
    let f2 = params.frequency(1, TYPING_FREQS[1]);
    let env = Decay::new(100.0);
    t.iter()
        .map(|&t| {
            let click = sine(f1, t) * 0.1 + sine(f2, t) * 0.1 + noise.uniform(-0.1, 0.1);
            click * env.gain(t)
        })
        .collect()
}

fn beep(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let freq = params.frequency(0, BEEP_FREQS[0]);
    let env = Decay::new(10.0);
    t.iter().map(|&t| sine(freq, t) * 0.3 * env.gain(t)).collect()
}

/// Rising sweep, the tube warming up.
fn power_on(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let start = params.frequency(0, POWER_ON_FREQS[0]);
    let rise = params.frequency(1, POWER_ON_FREQS[1]);
    let env = Decay::new(2.0);
    t.iter()
        .map(|&t| sine(swept_freq(start, rise, t), t) * env.gain(t) * 0.4)
        .collect()
}

/// Falling sweep with a quick decay.
fn power_off(params: &EffectParams, t: &[f64]) -> Vec<f64> {
    let start = params.frequency(0, POWER_OFF_FREQS[0]);
    let fall = params.frequency(1, POWER_OFF_FREQS[1]);
    let env = Decay::new(10.0);
    t.iter()
        .map(|&t| sine(swept_freq(start, -fall, t), t) * env.gain(t) * 0.5)
        .collect()
}

/// Low white noise with occasional pops.
fn static_noise(t: &[f64], noise: &mut NoiseSource) -> Vec<f64> {
    t.iter()
        .map(|_| {
            let s = noise.uniform(-0.1, 0.1);
            if noise.chance(0.001) {
                noise.uniform(-0.5, 0.5)
            } else {
                s
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Palette;

    fn params(effect: Effect) -> EffectParams {
        EffectParams::defaults(effect, Palette::Simple)
    }

    #[test]
    fn beep_matches_formula() {
        let buf = render(Effect::Beep, &params(Effect::Beep), &mut NoiseSource::seeded(0));
        for i in [0usize, 1, 100, 4409] {
            let t = i as f64 / 44100.0;
            let expected = (2.0 * std::f64::consts::PI * 1000.0 * t).sin() * 0.3 * (-t * 10.0).exp();
            assert!((buf.samples[i] - expected).abs() < 1e-12, "sample {i}");
        }
    }

    #[test]
    fn success_goes_silent_after_three_notes() {
        let buf = render(Effect::Success, &params(Effect::Success), &mut NoiseSource::seeded(0));
        assert_eq!(buf.len(), 26460);
        // Notes cover t < 0.6s, so a longer render ends in silence.
        let longer = params(Effect::Success).with_duration(0.8);
        let buf = render(Effect::Success, &longer, &mut NoiseSource::seeded(0));
        assert!(buf.samples[26461..].iter().all(|&s| s == 0.0));
        assert!(buf.samples[..26400].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn glitch_middle_third_is_noise() {
        let p = params(Effect::Glitch);
        let buf = render(Effect::Glitch, &p, &mut NoiseSource::seeded(11));
        let n = buf.len();
        // First third is a 0.3 sine except for spikes, which stay within 0.8.
        assert!(buf.samples.iter().all(|s| s.abs() <= 0.8));
        let quiet_head = buf.samples[..n / 3].iter().filter(|s| s.abs() <= 0.3 + 1e-12).count();
        assert!(quiet_head > n / 3 * 8 / 10, "most of the head should be the 80 Hz buzz");
    }

    #[test]
    fn static_stays_low_with_rare_pops() {
        let buf = render(Effect::Static, &params(Effect::Static), &mut NoiseSource::seeded(12));
        let pops = buf.samples.iter().filter(|s| s.abs() >= 0.1).count();
        assert!(buf.samples.iter().all(|s| s.abs() <= 0.5));
        assert!(pops < 200, "pops should be rare, got {pops}");
    }

    #[test]
    fn frequency_override_changes_tone() {
        let stock = render(Effect::Beep, &params(Effect::Beep), &mut NoiseSource::seeded(0));
        let mut custom = params(Effect::Beep);
        custom.frequencies = vec![440.0];
        let custom = render(Effect::Beep, &custom, &mut NoiseSource::seeded(0));
        assert_eq!(stock.len(), custom.len());
        assert_ne!(stock.samples, custom.samples);
    }
}
