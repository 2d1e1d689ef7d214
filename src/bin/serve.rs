//! Serve the game directory with audio MIME types and open CORS.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crt_chaos_sfx::server::{self, DEFAULT_HOST, DEFAULT_PORT, ServerConfig};

#[derive(Parser)]
#[command(name = "serve")]
#[command(about = "Static file server with correct MIME types for audio")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Directory to serve
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        root: cli.root,
    };

    server::run(&config).with_context(|| format!("failed to serve {}", config.root.display()))
}
