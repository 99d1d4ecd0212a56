//! Configuration types.
//!
//! Configuration lives in `<config_dir>/sift/config.toml`. Every key is
//! optional; a missing file means defaults.
//!
//! ```toml
//! [display]
//! null_text = "-"
//! decimals = 2
//!
//! [filter]
//! case_sensitive_search = false
//! default_operator = "contains"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::filter::FilterOperator;

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Default display formatting
    #[serde(default)]
    pub display: DisplayConfig,

    /// Filter popup behaviour
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Defaults applied by `StandardDisplay`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Text shown for null cells.
    #[serde(default)]
    pub null_text: String,

    /// Decimals for numbers when a field sets none.
    #[serde(default)]
    pub decimals: Option<usize>,
}

/// Filter popup search settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub case_sensitive_search: bool,

    #[serde(default)]
    pub default_operator: FilterOperator,
}

impl SiftConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                tracing::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => {
                tracing::debug!("No config directory, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sift"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SiftConfig::default();
        assert_eq!(config.display.null_text, "");
        assert_eq!(config.display.decimals, None);
        assert!(!config.filter.case_sensitive_search);
        assert_eq!(config.filter.default_operator, FilterOperator::Contains);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SiftConfig::from_toml("").unwrap(), SiftConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SiftConfig::from_toml(
            r#"
            [display]
            null_text = "-"

            [filter]
            default_operator = ">="
            "#,
        )
        .unwrap();
        assert_eq!(config.display.null_text, "-");
        assert_eq!(config.display.decimals, None);
        assert_eq!(
            config.filter.default_operator,
            FilterOperator::GreaterOrEqual
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = SiftConfig::from_toml("[display]\ndecimals = \"two\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filter]\ncase_sensitive_search = true").unwrap();

        let config = SiftConfig::load(file.path()).unwrap();
        assert!(config.filter.case_sensitive_search);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiftConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
