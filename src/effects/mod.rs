//! The sound effect catalog.
//!
//! Each [`Effect`] can be rendered by either [`Palette`]. A palette is a
//! family of formulas with its own time axis, noise distribution, and
//! normalization headroom; both produce a buffer of exactly
//! `round(duration × sample_rate)` samples.

mod layered;
mod simple;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::{DEFAULT_SAMPLE_RATE, NoiseSource, SampleBuffer, TimeAxis, sample_count};
use crate::error::SfxError;

/// A named sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    Glitch,
    Error,
    Success,
    Typing,
    Beep,
    PowerOn,
    PowerOff,
    Static,
}

impl Effect {
    pub const ALL: [Effect; 8] = [
        Effect::Glitch,
        Effect::Error,
        Effect::Success,
        Effect::Typing,
        Effect::Beep,
        Effect::PowerOn,
        Effect::PowerOff,
        Effect::Static,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Glitch => "glitch",
            Effect::Error => "error",
            Effect::Success => "success",
            Effect::Typing => "typing",
            Effect::Beep => "beep",
            Effect::PowerOn => "power-on",
            Effect::PowerOff => "power-off",
            Effect::Static => "static",
        }
    }

    /// Position in [`Effect::ALL`].
    pub fn index(self) -> usize {
        Effect::ALL.iter().position(|&e| e == self).unwrap_or(0)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = SfxError;

    /// Accepts the kebab-case names plus `snake_case` and the camelCase keys
    /// the game's audio manager uses (`powerOn`, `powerOff`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "glitch" => Ok(Effect::Glitch),
            "error" => Ok(Effect::Error),
            "success" => Ok(Effect::Success),
            "typing" => Ok(Effect::Typing),
            "beep" => Ok(Effect::Beep),
            "poweron" => Ok(Effect::PowerOn),
            "poweroff" => Ok(Effect::PowerOff),
            "static" => Ok(Effect::Static),
            _ => Err(SfxError::UnknownEffect(s.to_string())),
        }
    }
}

/// A family of formulas for rendering the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Per-sample formulas on `t = i / sample_rate`, uniform noise,
    /// 0.8 headroom. Written as `<effect>_real.wav`.
    Simple,
    /// Vectorized formulas on an endpoint-inclusive time axis, Gaussian
    /// noise, full-scale output. Written as `<effect>.wav`.
    Layered,
}

impl Palette {
    pub const ALL: [Palette; 2] = [Palette::Simple, Palette::Layered];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Simple => "simple",
            Palette::Layered => "layered",
        }
    }

    /// Fraction of full scale the peak sample is normalized to.
    pub fn headroom(self) -> f64 {
        match self {
            Palette::Simple => 0.8,
            Palette::Layered => 1.0,
        }
    }

    pub fn time_axis(self) -> TimeAxis {
        match self {
            Palette::Simple => TimeAxis::Stepped,
            Palette::Layered => TimeAxis::Spanning,
        }
    }

    /// Output file name for `effect` rendered with this palette.
    pub fn file_name(self, effect: Effect) -> String {
        match self {
            Palette::Simple => format!("{}_real.wav", effect.name()),
            Palette::Layered => format!("{}.wav", effect.name()),
        }
    }

    /// Parse a palette name, or `all` for every palette.
    pub fn parse_selection(s: &str) -> Result<Vec<Palette>, SfxError> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Palette::ALL.to_vec());
        }
        s.parse().map(|p| vec![p])
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = SfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "real" => Ok(Palette::Simple),
            "layered" => Ok(Palette::Layered),
            _ => Err(SfxError::UnknownPalette(s.to_string())),
        }
    }
}

/// Inputs to a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    /// Length in seconds.
    pub duration: f64,
    pub sample_rate: u32,
    /// Effect-specific frequencies in Hz (or Hz per second for sweep
    /// rates). Missing entries fall back to the palette's constants.
    #[serde(default)]
    pub frequencies: Vec<f64>,
}

impl EffectParams {
    /// The stock parameters for `effect` under `palette`.
    pub fn defaults(effect: Effect, palette: Palette) -> Self {
        let (duration, frequencies) = match palette {
            Palette::Simple => simple::defaults(effect),
            Palette::Layered => layered::defaults(effect),
        };
        EffectParams {
            duration,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequencies: frequencies.to_vec(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Number of samples this render will produce.
    pub fn sample_count(&self) -> usize {
        sample_count(self.duration, self.sample_rate)
    }

    fn frequency(&self, index: usize, fallback: f64) -> f64 {
        self.frequencies.get(index).copied().unwrap_or(fallback)
    }
}

/// Render `effect` with `palette`.
pub fn render(
    effect: Effect,
    palette: Palette,
    params: &EffectParams,
    noise: &mut NoiseSource,
) -> SampleBuffer {
    match palette {
        Palette::Simple => simple::render(effect, params, noise),
        Palette::Layered => layered::render(effect, params, noise),
    }
}

/// Render with stock parameters at `sample_rate`.
pub fn render_default(
    effect: Effect,
    palette: Palette,
    sample_rate: u32,
    noise: &mut NoiseSource,
) -> SampleBuffer {
    let params = EffectParams::defaults(effect, palette).with_sample_rate(sample_rate);
    render(effect, palette, &params, noise)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn every_render_has_expected_length() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                let params = EffectParams::defaults(effect, palette);
                let expected = (params.duration * params.sample_rate as f64).round() as usize;
                let buf = render(effect, palette, &params, &mut NoiseSource::seeded(1));
                assert_eq!(buf.len(), expected, "{palette}/{effect} length");
                assert_eq!(buf.sample_rate, 44100);
            }
        }
    }

    #[test]
    fn custom_durations_and_rates_keep_length() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                for (duration, rate) in [(0.3, 22050), (0.013, 44100), (2.0, 8000)] {
                    let params = EffectParams::defaults(effect, palette)
                        .with_duration(duration)
                        .with_sample_rate(rate);
                    let buf = render(effect, palette, &params, &mut NoiseSource::seeded(2));
                    assert_eq!(
                        buf.len(),
                        sample_count(duration, rate),
                        "{palette}/{effect} at {duration}s/{rate}Hz"
                    );
                }
            }
        }
    }

    #[test]
    fn degenerate_durations_render_empty() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                for duration in [0.0, -0.5] {
                    let params = EffectParams::defaults(effect, palette).with_duration(duration);
                    let buf = render(effect, palette, &params, &mut NoiseSource::seeded(3));
                    assert!(buf.is_empty(), "{palette}/{effect} at {duration}s should be empty");
                }
            }
        }
    }

    #[test]
    fn tiny_buffers_do_not_panic() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                for n in 1..5 {
                    let params = EffectParams::defaults(effect, palette)
                        .with_duration(n as f64 / 44100.0);
                    let buf = render(effect, palette, &params, &mut NoiseSource::seeded(4));
                    assert_eq!(buf.len(), n);
                }
            }
        }
    }

    #[test]
    fn seeded_renders_are_identical() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                let a = render_default(effect, palette, 44100, &mut NoiseSource::seeded(99));
                let b = render_default(effect, palette, 44100, &mut NoiseSource::seeded(99));
                assert_eq!(a, b, "{palette}/{effect} should be reproducible");
            }
        }
    }

    #[test]
    fn noisy_effects_vary_with_seed() {
        let noisy = [Effect::Glitch, Effect::Typing, Effect::Static];
        for palette in Palette::ALL {
            for effect in noisy {
                let a = render_default(effect, palette, 44100, &mut NoiseSource::seeded(1));
                let b = render_default(effect, palette, 44100, &mut NoiseSource::seeded(2));
                assert_eq!(a.len(), b.len());
                assert_ne!(a.samples, b.samples, "{palette}/{effect} should use noise");
            }
        }
    }

    #[test]
    fn unseeded_renders_keep_length_and_vary() {
        let noisy = [Effect::Glitch, Effect::Typing, Effect::Static];
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                let expected = EffectParams::defaults(effect, palette).sample_count();
                let a = render_default(effect, palette, 44100, &mut NoiseSource::from_entropy());
                let b = render_default(effect, palette, 44100, &mut NoiseSource::from_seed(None));
                assert_eq!(a.len(), expected, "{palette}/{effect} length");
                assert_eq!(b.len(), expected, "{palette}/{effect} length");
                if noisy.contains(&effect) {
                    assert_ne!(a.samples, b.samples, "{palette}/{effect} should differ run to run");
                }
            }
        }
    }

    #[test]
    fn tonal_effects_ignore_noise() {
        let tonal = [Effect::Error, Effect::Success, Effect::Beep, Effect::PowerOff];
        for palette in Palette::ALL {
            for effect in tonal {
                let a = render_default(effect, palette, 44100, &mut NoiseSource::seeded(1));
                let b = render_default(effect, palette, 44100, &mut NoiseSource::seeded(2));
                assert_eq!(a, b, "{palette}/{effect} should be deterministic");
            }
        }
    }

    #[test]
    fn every_render_is_audible() {
        for palette in Palette::ALL {
            for effect in Effect::ALL {
                let buf = render_default(effect, palette, 44100, &mut NoiseSource::seeded(5));
                assert!(buf.peak() > 0.01, "{palette}/{effect} is near silent");
                assert!(buf.peak() < 2.0, "{palette}/{effect} peak {} too hot", buf.peak());
            }
        }
    }

    #[test]
    fn decaying_effects_fade_out() {
        let decaying = [Effect::Error, Effect::Typing, Effect::Beep, Effect::PowerOn, Effect::PowerOff];
        for palette in Palette::ALL {
            for effect in decaying {
                let buf = render_default(effect, palette, 44100, &mut NoiseSource::seeded(6));
                let tenth = buf.len() / 10;
                let head = rms(&buf.samples[..tenth]);
                let tail = rms(&buf.samples[buf.len() - tenth..]);
                assert!(tail < head, "{palette}/{effect}: tail {tail} should be quieter than head {head}");
            }
        }
    }

    #[test]
    fn effect_names_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(effect.name().parse::<Effect>().unwrap(), effect);
        }
        assert_eq!("powerOn".parse::<Effect>().unwrap(), Effect::PowerOn);
        assert_eq!("power_off".parse::<Effect>().unwrap(), Effect::PowerOff);
        assert_eq!(" STATIC ".parse::<Effect>().unwrap(), Effect::Static);
        assert!(matches!("boom".parse::<Effect>(), Err(SfxError::UnknownEffect(_))));
    }

    #[test]
    fn effect_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Effect::PowerOn).unwrap();
        assert_eq!(json, "\"power-on\"");
        let back: Effect = serde_json::from_str("\"power-off\"").unwrap();
        assert_eq!(back, Effect::PowerOff);
    }

    #[test]
    fn palette_file_names() {
        assert_eq!(Palette::Simple.file_name(Effect::PowerOn), "power-on_real.wav");
        assert_eq!(Palette::Layered.file_name(Effect::Glitch), "glitch.wav");
    }

    #[test]
    fn palette_selection() {
        assert_eq!(Palette::parse_selection("all").unwrap(), Palette::ALL.to_vec());
        assert_eq!(Palette::parse_selection("Layered").unwrap(), vec![Palette::Layered]);
        assert!(matches!(
            Palette::parse_selection("loud"),
            Err(SfxError::UnknownPalette(_))
        ));
    }

    #[test]
    fn effect_index_matches_catalog_order() {
        for (i, effect) in Effect::ALL.iter().enumerate() {
            assert_eq!(effect.index(), i);
        }
    }

    #[test]
    fn frequency_overrides_fall_back_per_entry() {
        let mut params = EffectParams::defaults(Effect::Beep, Palette::Layered);
        params.frequencies = vec![];
        assert_eq!(params.frequency(0, 1000.0), 1000.0);
        params.frequencies = vec![440.0];
        assert_eq!(params.frequency(0, 1000.0), 440.0);
        assert_eq!(params.frequency(1, 7.0), 7.0);
    }
}
