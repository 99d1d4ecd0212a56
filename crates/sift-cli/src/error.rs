//! Command errors.

use std::path::PathBuf;
use thiserror::Error;

use sift_core::{ConfigError, FrameError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filter in {path}: {source}")]
    Filter {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
