//! CLI configuration file loading

use dotpath_core::{ConfigError, PathLimits};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Settings read from a TOML file passed with `--config`
///
/// ```toml
/// [limits]
/// max_path_length = 1024
/// max_depth = 32
/// max_index_gap = 1000
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Path tokenizer limits
    pub limits: PathLimits,
}

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        /// Config file path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// File is not valid TOML for this schema.
    #[error("Invalid config '{path}': {source}")]
    Toml {
        /// Config file path
        path: String,
        /// Underlying parse error
        source: toml::de::Error,
    },
    /// Limits are outside the allowed range.
    #[error("Invalid config '{path}': {source}")]
    Limits {
        /// Config file path
        path: String,
        /// Validation failure
        source: ConfigError,
    },
}

impl CliConfig {
    /// Load from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigFileError::Toml {
            path: path.display().to_string(),
            source,
        })?;
        config
            .limits
            .validate()
            .map_err(|source| ConfigFileError::Limits {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(path = %path.display(), limits = ?config.limits, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_argument_uses_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.limits, PathLimits::default());
    }

    #[test]
    fn parses_limits_table() {
        let config = CliConfig::parse(
            "[limits]\nmax_depth = 4\n",
            Path::new("dotpath.toml"),
        )
        .unwrap();
        assert_eq!(config.limits.max_depth, 4);
        assert_eq!(
            config.limits.max_path_length,
            PathLimits::default().max_path_length
        );
    }

    #[test]
    fn parses_index_gap() {
        let config = CliConfig::parse(
            "[limits]\nmax_index_gap = 16\n",
            Path::new("dotpath.toml"),
        )
        .unwrap();
        assert_eq!(config.limits.max_index_gap, 16);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = CliConfig::parse("[limits]\nmax_width = 4\n", Path::new("x.toml"));
        assert!(matches!(result, Err(ConfigFileError::Toml { .. })));
    }

    #[test]
    fn rejects_limits_over_hard_maximums() {
        let result = CliConfig::parse("[limits]\nmax_depth = 100000\n", Path::new("x.toml"));
        assert!(matches!(result, Err(ConfigFileError::Limits { .. })));
    }
}
