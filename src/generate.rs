//! Batch generation of the effect catalog into an output directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dsp::{DEFAULT_SAMPLE_RATE, NoiseSource};
use crate::effects::{self, Effect, Palette};
use crate::error::SfxError;
use crate::wav;

/// Where the game loads its sounds from.
pub const DEFAULT_OUT_DIR: &str = "assets/sounds";

/// Effects the game also wants as MP3.
pub const MP3_EFFECTS: [Effect; 4] = [Effect::Glitch, Effect::Error, Effect::Success, Effect::Typing];

/// Options for [`generate_all`].
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub out_dir: PathBuf,
    pub palettes: Vec<Palette>,
    pub sample_rate: u32,
    /// Seed for reproducible output; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Create `out_dir` (and parents) when missing.
    pub create_dir: bool,
    /// Convert [`MP3_EFFECTS`] to MP3 with ffmpeg, best effort.
    pub mp3: bool,
    pub ffmpeg: String,
    /// Write a JSON manifest of the run here.
    pub manifest: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            palettes: Palette::ALL.to_vec(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
            create_dir: false,
            mp3: false,
            ffmpeg: "ffmpeg".to_string(),
            manifest: None,
        }
    }
}

/// One file written by a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSound {
    pub effect: Effect,
    pub palette: Palette,
    pub path: PathBuf,
    pub samples: usize,
    pub duration: f64,
    /// Largest absolute PCM value written.
    pub peak: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp3: Option<PathBuf>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub sample_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub sounds: Vec<GeneratedSound>,
}

impl Manifest {
    pub fn find(&self, effect: Effect, palette: Palette) -> Option<&GeneratedSound> {
        self.sounds
            .iter()
            .find(|s| s.effect == effect && s.palette == palette)
    }
}

/// Noise stream for one effect of one palette.
///
/// Seeded runs give every effect its own stream, so regenerating a single
/// effect does not depend on which others were rendered first.
pub fn noise_for(seed: Option<u64>, effect: Effect, palette: Palette) -> NoiseSource {
    match seed {
        Some(seed) => {
            let stream = ((effect.index() as u64) << 8) | palette as u64;
            NoiseSource::seeded(seed).fork(stream)
        }
        None => NoiseSource::from_entropy(),
    }
}

/// Render, normalize and write one effect to `path`.
pub fn write_effect(
    effect: Effect,
    palette: Palette,
    sample_rate: u32,
    noise: &mut NoiseSource,
    path: &Path,
) -> Result<GeneratedSound, SfxError> {
    let buf = effects::render_default(effect, palette, sample_rate, noise);
    let pcm = wav::normalize_to_pcm(&buf.samples, palette.headroom());
    wav::write_wav(path, &pcm, sample_rate)?;
    Ok(GeneratedSound {
        effect,
        palette,
        path: path.to_path_buf(),
        samples: pcm.len(),
        duration: buf.duration(),
        peak: pcm.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0),
        mp3: None,
    })
}

/// Render every effect of every configured palette into `out_dir`.
pub fn generate_all(config: &GenerateConfig) -> Result<Manifest, SfxError> {
    if config.create_dir {
        std::fs::create_dir_all(&config.out_dir).map_err(|e| SfxError::io(&config.out_dir, e))?;
    }

    info!(
        "Generating {} sounds into {}",
        config.palettes.len() * Effect::ALL.len(),
        config.out_dir.display()
    );

    let mut sounds = Vec::new();
    for &palette in &config.palettes {
        for effect in Effect::ALL {
            let path = config.out_dir.join(palette.file_name(effect));
            let mut noise = noise_for(config.seed, effect, palette);
            let sound = write_effect(effect, palette, config.sample_rate, &mut noise, &path)?;
            info!(
                "Created: {} ({} samples, {:.2}s)",
                path.display(),
                sound.samples,
                sound.duration
            );
            sounds.push(sound);
        }
    }

    if config.mp3 {
        convert_mp3s(config, &mut sounds);
    }

    let manifest = Manifest {
        sample_rate: config.sample_rate,
        seed: config.seed,
        sounds,
    };

    if let Some(path) = &config.manifest {
        write_manifest(&manifest, path)?;
        info!("Wrote manifest {}", path.display());
    }

    Ok(manifest)
}

/// Convert each of [`MP3_EFFECTS`] to `<effect>.mp3`.
///
/// The first sound written for an effect is the source. Stops at the first
/// failure and leaves the WAV files as they are.
fn convert_mp3s(config: &GenerateConfig, sounds: &mut [GeneratedSound]) {
    info!("Converting to MP3 with {}", config.ffmpeg);
    for effect in MP3_EFFECTS {
        let Some(sound) = sounds.iter_mut().find(|s| s.effect == effect) else {
            continue;
        };
        let mp3 = config.out_dir.join(format!("{}.mp3", effect.name()));
        match convert_to_mp3(&config.ffmpeg, &sound.path, &mp3) {
            Ok(()) => {
                info!("Converted {}", mp3.display());
                sound.mp3 = Some(mp3);
            }
            Err(reason) => {
                warn!("MP3 conversion skipped: {reason}");
                warn!("The WAV files are ready to use; convert them with any external tool if MP3 is needed");
                return;
            }
        }
    }
}

/// Run `ffmpeg -i <wav> <mp3> -y`.
pub fn convert_to_mp3(ffmpeg: &str, wav: &Path, mp3: &Path) -> Result<(), String> {
    debug!("{ffmpeg} -i {} {} -y", wav.display(), mp3.display());
    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(wav)
        .arg(mp3)
        .arg("-y")
        .output()
        .map_err(|e| format!("failed to run {ffmpeg}: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{ffmpeg} failed: {}", stderr.trim()));
    }
    Ok(())
}

pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), SfxError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json).map_err(|e| SfxError::io(path, e))
}
