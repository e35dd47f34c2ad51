//! Path limits and configuration

use crate::error::ConfigError;
use serde::Deserialize;

/// Limits applied when tokenizing a path string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathLimits {
    /// Maximum path string length in bytes (default: 4,096, hard: 65,536)
    pub max_path_length: usize,
    /// Maximum number of segments (default: 128, hard: 1,024)
    pub max_depth: usize,
    /// Maximum number of `null` slots a write may pad past the end of a
    /// sequence (default: 10,000, hard: 1,000,000)
    pub max_index_gap: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_path_length: 4_096,
            max_depth: 128,
            max_index_gap: 10_000,
        }
    }
}

impl PathLimits {
    /// Hard maximum limits that cannot be exceeded
    pub fn hard_maximums() -> Self {
        Self {
            max_path_length: 65_536,
            max_depth: 1_024,
            max_index_gap: 1_000_000,
        }
    }

    /// Limits used by the unbound free functions
    ///
    /// Path length and depth are uncapped so tokenizing depends only on the
    /// path string. Index padding keeps the hard maximum.
    pub fn permissive() -> Self {
        Self {
            max_path_length: usize::MAX,
            max_depth: usize::MAX,
            max_index_gap: Self::hard_maximums().max_index_gap,
        }
    }

    /// Validate limits against hard maximums
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hard = Self::hard_maximums();

        if self.max_path_length > hard.max_path_length {
            return Err(ConfigError::ExceedsHardLimits {
                reason: format!(
                    "max_path_length {} exceeds hard limit {}",
                    self.max_path_length, hard.max_path_length
                ),
            });
        }

        if self.max_depth > hard.max_depth {
            return Err(ConfigError::ExceedsHardLimits {
                reason: format!(
                    "max_depth {} exceeds hard limit {}",
                    self.max_depth, hard.max_depth
                ),
            });
        }

        if self.max_index_gap > hard.max_index_gap {
            return Err(ConfigError::ExceedsHardLimits {
                reason: format!(
                    "max_index_gap {} exceeds hard limit {}",
                    self.max_index_gap, hard.max_index_gap
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_within_hard_max() {
        assert!(PathLimits::default().validate().is_ok());
        assert!(PathLimits::hard_maximums().validate().is_ok());
    }

    #[test]
    fn rejects_excessive_depth() {
        let limits = PathLimits {
            max_depth: 5_000,
            ..PathLimits::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(ConfigError::ExceedsHardLimits { .. })
        ));
    }

    #[test]
    fn rejects_excessive_length() {
        let limits = PathLimits {
            max_path_length: 1 << 20,
            ..PathLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn rejects_excessive_index_gap() {
        let limits = PathLimits {
            max_index_gap: 2_000_000,
            ..PathLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn permissive_limits_keep_index_gap_bounded() {
        let limits = PathLimits::permissive();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(
            limits.max_index_gap,
            PathLimits::hard_maximums().max_index_gap
        );
    }

    #[test]
    fn deserializes_partial_table() {
        let limits: PathLimits = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(limits.max_depth, 8);
        assert_eq!(limits.max_path_length, 4_096);
    }
}
