pub mod dsp;
pub mod effects;
pub mod error;
pub mod generate;
#[cfg(feature = "server")]
pub mod server;
pub mod wav;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::dsp::{DEFAULT_SAMPLE_RATE, NoiseSource};
use crate::effects::{Effect, EffectParams, Palette};
use crate::error::SfxError;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// One catalog entry as seen from JavaScript.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub effect: Effect,
    pub palette: Palette,
    pub file_name: String,
    pub duration: f64,
    pub samples: usize,
}

/// Every effect under every palette with its stock parameters.
pub fn catalog() -> Vec<CatalogEntry> {
    Palette::ALL
        .iter()
        .flat_map(|&palette| {
            Effect::ALL.iter().map(move |&effect| {
                let params = EffectParams::defaults(effect, palette);
                CatalogEntry {
                    effect,
                    palette,
                    file_name: palette.file_name(effect),
                    duration: params.duration,
                    samples: params.sample_count(),
                }
            })
        })
        .collect()
}

/// Render `effect` with `palette` and encode it as WAV bytes.
pub fn effect_wav(effect: &str, palette: &str, seed: Option<u64>) -> Result<Vec<u8>, SfxError> {
    let effect: Effect = effect.parse()?;
    let palette: Palette = palette.parse()?;
    let mut noise = NoiseSource::from_seed(seed);
    let buf = effects::render_default(effect, palette, DEFAULT_SAMPLE_RATE, &mut noise);
    let pcm = wav::normalize_to_pcm(&buf.samples, palette.headroom());
    wav::encode_wav(&pcm, buf.sample_rate)
}

/// WASM-exposed: the catalog as an array of objects.
#[wasm_bindgen]
pub fn effect_names() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&catalog()).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render an effect to a WAV byte array.
#[wasm_bindgen]
pub fn render_effect_wav(effect: &str, palette: &str, seed: Option<u64>) -> Result<Vec<u8>, JsValue> {
    effect_wav(effect, palette, seed).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render an effect to mono f32 samples, peak-normalized to
/// the palette's headroom. Returns the raw buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_effect_samples(effect: &str, palette: &str, seed: Option<u64>) -> Result<Vec<f32>, JsValue> {
    let effect: Effect = effect.parse().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let palette: Palette = palette.parse().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let mut noise = NoiseSource::from_seed(seed);
    let buf = effects::render_default(effect, palette, DEFAULT_SAMPLE_RATE, &mut noise);
    let peak = buf.peak();
    let scale = if peak > 0.0 { palette.headroom() / peak } else { 1.0 };
    Ok(buf.samples.iter().map(|&s| (s * scale) as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_both_palettes() {
        let entries = catalog();
        assert_eq!(entries.len(), 16);
        let beep = entries
            .iter()
            .find(|e| e.effect == Effect::Beep && e.palette == Palette::Simple)
            .unwrap();
        assert_eq!(beep.file_name, "beep_real.wav");
        assert_eq!(beep.samples, 4410);
    }

    #[test]
    fn effect_wav_is_valid() {
        let wav = effect_wav("power-on", "layered", Some(3)).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 44100 * 2);
    }

    #[test]
    fn effect_wav_seeded_is_stable() {
        let a = effect_wav("glitch", "simple", Some(10)).unwrap();
        let b = effect_wav("glitch", "simple", Some(10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn effect_wav_rejects_unknown_names() {
        assert!(matches!(effect_wav("kaboom", "simple", None), Err(SfxError::UnknownEffect(_))));
        assert!(matches!(effect_wav("beep", "fancy", None), Err(SfxError::UnknownPalette(_))));
    }
}
