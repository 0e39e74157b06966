//! Matcher configuration, loadable from TOML

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Acceptance thresholds for the fallback similarity pipeline
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Accept when the position-aligned distance is strictly below this
    pub max_distance: f64,
    /// Accept when the harmonic combination reaches this
    pub min_f1: f64,
    /// Hard cutoff on longer/shorter letter-string length
    pub max_length_ratio: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            max_distance: 0.5,
            min_f1: 0.5,
            max_length_ratio: 1.5,
        }
    }
}

impl MatchThresholds {
    pub fn new(max_distance: f64, min_f1: f64) -> Self {
        Self {
            max_distance,
            min_f1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_distance", self.max_distance),
            ("min_f1", self.min_f1),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        if !self.max_length_ratio.is_finite() || self.max_length_ratio < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_length_ratio",
                value: self.max_length_ratio,
            });
        }
        Ok(())
    }
}

/// Where the author identifier sits inside a profile link.
///
/// Links look like `https://www.scopus.com/authid/detail.uri?authorId=<id>&...`,
/// so the identifier starts at a fixed character offset and runs up to the next
/// delimiter. This is an assumption about one link format and breaks silently if
/// the URL prefix ever changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub id_offset: usize,
    pub id_delimiter: char,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            id_offset: 50,
            id_delimiter: '&',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub thresholds: MatchThresholds,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.index.id_offset, 50);
        assert_eq!(config.index.id_delimiter, '&');
        assert!((config.thresholds.max_distance - 0.5).abs() < 1e-9);
        assert!((config.thresholds.min_f1 - 0.5).abs() < 1e-9);
        assert!((config.thresholds.max_length_ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("[thresholds]\nmin_f1 = 0.7\n").unwrap();
        assert!((config.thresholds.min_f1 - 0.7).abs() < 1e-9);
        assert!((config.thresholds.max_distance - 0.5).abs() < 1e-9);
        assert_eq!(config.index, IndexConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let err = Config::from_toml_str("[thresholds]\nmax_length_ratio = 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_length_ratio",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_distance() {
        assert!(MatchThresholds::new(-0.1, 0.5).validate().is_err());
    }

    #[test]
    fn test_rejects_unparsable() {
        assert!(matches!(
            Config::from_toml_str("thresholds = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
