//! Error types for sift.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `SiftConfig`.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while turning a data frame into rows.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A field has a different number of values than the first field.
    #[error("Field '{field}' has {actual} values, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// A nested-frames cell does not hold a list of frames.
    #[error("Row {row} of field '{field}' is not a list of frames: {source}")]
    Nested {
        row: usize,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// Frame JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filter parsing errors.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Operator string is not one of the supported search operators.
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),
}
