//! Engine configuration
//!
//! Evaluation weights, depth policy and search resources, loaded from TOML
//! with every field defaulting to the tuned values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::eval::EvalWeights;
use crate::level::Difficulty;
use crate::search::{DepthPolicy, SearchConfig};

/// Per-move budget for Pro when no time limit is configured
pub const DEFAULT_PRO_TIME_LIMIT_MS: u64 = 2000;

/// Engine configuration, loadable from TOML.
///
/// Every section is optional; missing values keep the tuned defaults.
///
/// ```toml
/// [weights]
/// center = 3
///
/// [depth]
/// pro_base = 3
///
/// [search]
/// threads = 4
/// time_limit_ms = 2000
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: EvalWeights,
    pub depth: DepthPolicy,
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the per-move time limit. `None` keeps the current setting.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit_ms: Option<u64>) -> Self {
        if time_limit_ms.is_some() {
            self.search.time_limit_ms = time_limit_ms;
        }
        self
    }

    /// Give Pro [`DEFAULT_PRO_TIME_LIMIT_MS`] when no limit is set. Simple and
    /// Hard never search, so they are left alone.
    #[must_use]
    pub fn with_budget_for(mut self, difficulty: Difficulty) -> Self {
        if difficulty == Difficulty::Pro && self.search.time_limit_ms.is_none() {
            self.search.time_limit_ms = Some(DEFAULT_PRO_TIME_LIMIT_MS);
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth.min_depth == 0 {
            return Err(ConfigError::Validation(
                "depth.min_depth must be >= 1".into(),
            ));
        }
        if self.depth.hard_level_divisor == 0 {
            return Err(ConfigError::Validation(
                "depth.hard_level_divisor must be >= 1".into(),
            ));
        }
        if self.depth.medium_board > self.depth.large_board {
            return Err(ConfigError::Validation(
                "depth.medium_board must not exceed depth.large_board".into(),
            ));
        }
        if self.weights.win <= self.weights.complete {
            return Err(ConfigError::Validation(
                "weights.win must exceed weights.complete".into(),
            ));
        }
        if self.search.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(
                "search.time_limit_ms must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights, EvalWeights::default());
        assert_eq!(config.depth, DepthPolicy::default());
        assert_eq!(config.search.time_limit_ms, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = EngineConfig::from_toml(
            r#"
            [weights]
            center = 5

            [depth]
            pro_base = 4

            [search]
            threads = 2
            time_limit_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.center, 5);
        assert_eq!(config.weights.open_k_minus_1, 100);
        assert_eq!(config.depth.pro_base, 4);
        assert_eq!(config.depth.hard_base, 2);
        assert_eq!(config.search.threads, 2);
        assert_eq!(config.search.time_limit_ms, Some(1500));
    }

    #[test]
    fn test_validation_rejects_zero_min_depth() {
        let err = EngineConfig::from_toml("[depth]\nmin_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_swapped_board_thresholds() {
        let err = EngineConfig::from_toml("[depth]\nmedium_board = 12\nlarge_board = 10\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = EngineConfig::from_toml("[weights\ncenter = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_pro_gets_default_budget() {
        let config = EngineConfig::default().with_budget_for(Difficulty::Pro);
        assert_eq!(config.search.time_limit_ms, Some(DEFAULT_PRO_TIME_LIMIT_MS));

        let config = EngineConfig::default().with_budget_for(Difficulty::Hard);
        assert_eq!(config.search.time_limit_ms, None);
    }

    #[test]
    fn test_explicit_time_limit_wins() {
        let config = EngineConfig::default()
            .with_time_limit(Some(500))
            .with_budget_for(Difficulty::Pro);
        assert_eq!(config.search.time_limit_ms, Some(500));

        let from_file = EngineConfig::from_toml("[search]\ntime_limit_ms = 800\n").unwrap();
        let config = from_file.with_time_limit(None).with_budget_for(Difficulty::Pro);
        assert_eq!(config.search.time_limit_ms, Some(800));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = PathBuf::from("definitely/not/here/engine.toml");
        let config = EngineConfig::load_or_default(&path).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::FileRead { .. })
        ));
    }
}
