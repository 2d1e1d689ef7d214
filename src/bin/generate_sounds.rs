//! Generate the CRT Chaos sound effects as WAV files.
//!
//! ```text
//! generate-sounds                         # both palettes into assets/sounds
//! generate-sounds --palette simple --mp3  # *_real.wav plus MP3 copies
//! generate-sounds --seed 42 --manifest assets/sounds/manifest.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crt_chaos_sfx::dsp::DEFAULT_SAMPLE_RATE;
use crt_chaos_sfx::effects::Palette;
use crt_chaos_sfx::generate::{self, DEFAULT_OUT_DIR, GenerateConfig};

#[derive(Parser)]
#[command(name = "generate-sounds")]
#[command(about = "Generate procedural sound effects for CRT Chaos")]
#[command(version)]
struct Cli {
    /// Output directory for generated audio
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Formula family to render: simple, layered or all
    #[arg(short, long, default_value = "all")]
    palette: String,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Also convert glitch/error/success/typing to MP3 with ffmpeg
    #[arg(long)]
    mp3: bool,

    /// ffmpeg executable used for --mp3
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: String,

    /// Write a JSON manifest of the generated files
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Fail instead of creating a missing output directory
    #[arg(long)]
    no_create_dir: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let palettes = Palette::parse_selection(&cli.palette)?;

    let config = GenerateConfig {
        out_dir: cli.out_dir,
        palettes,
        sample_rate: cli.sample_rate,
        seed: cli.seed,
        create_dir: !cli.no_create_dir,
        mp3: cli.mp3,
        ffmpeg: cli.ffmpeg,
        manifest: cli.manifest,
    };

    let manifest = generate::generate_all(&config)
        .with_context(|| format!("failed to generate sounds into {}", config.out_dir.display()))?;

    info!("All {} sounds generated as WAV files", manifest.sounds.len());
    if !config.mp3 {
        info!("To convert to MP3: generate-sounds --mp3, or ffmpeg -i in.wav out.mp3");
    }
    Ok(())
}
