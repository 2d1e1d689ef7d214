use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SfxError {
    #[error("unknown effect '{0}' (expected one of: glitch, error, success, typing, beep, power-on, power-off, static)")]
    UnknownEffect(String),

    #[error("unknown palette '{0}' (expected simple, layered or all)")]
    UnknownPalette(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write WAV {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to encode WAV: {0}")]
    Encode(#[source] hound::Error),

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl SfxError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SfxError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn wav(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        SfxError::Wav {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "server")]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
