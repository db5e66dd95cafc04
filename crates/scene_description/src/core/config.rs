//! # Scene Configuration
//!
//! Settings that decide which plugin schema is used and how strictly plugin
//! parameters are checked against it.
//!
//! ```toml
//! engine_version = "3.5.2"
//! schema_dir = "schemas"
//! validation = "relaxed"
//! fill_defaults = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::schema::ValidationMode;

/// Configuration for schema selection and plugin validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Target engine version, overrides any detected version
    pub engine_version: Option<String>,
    /// Directory searched for `mitsuba-<version>.toml` / `.ron` schema files
    pub schema_dir: Option<PathBuf>,
    /// How unknown plugin parameters are treated
    pub validation: ValidationMode,
    /// Insert declared defaults for optional parameters the caller left out
    pub fill_defaults: bool,
}

impl SceneConfig {
    /// Create a configuration with strict validation and no overrides
    pub fn new() -> Self {
        Self {
            engine_version: None,
            schema_dir: None,
            validation: ValidationMode::Strict,
            fill_defaults: false,
        }
    }

    /// Pin the target engine version
    pub fn with_engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = Some(version.into());
        self
    }

    /// Set the schema file directory
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    /// Set the validation mode
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Enable or disable default filling
    pub fn with_fill_defaults(mut self, enabled: bool) -> Self {
        self.fill_defaults = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(version) = &self.engine_version {
            if version.trim().is_empty() {
                return Err("Engine version cannot be empty".to_string());
            }
        }

        if let Some(dir) = &self.schema_dir {
            if !Path::new(dir).is_dir() {
                return Err(format!("Schema directory not found: {}", dir.display()));
            }
        }

        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_is_strict() {
        let config = SceneConfig::default();
        assert_eq!(config.validation, ValidationMode::Strict);
        assert!(!config.fill_defaults);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SceneConfig::from_str_as("validation = \"relaxed\"\n", ConfigFormat::Toml).unwrap();
        assert_eq!(config.validation, ValidationMode::Relaxed);
        assert_eq!(config.engine_version, None);
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = SceneConfig::new()
            .with_engine_version("3.5.2")
            .with_fill_defaults(true);
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        assert_eq!(SceneConfig::from_str_as(&text, ConfigFormat::Ron).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_blank_version_and_missing_dir() {
        assert!(SceneConfig::new().with_engine_version("  ").validate().is_err());
        assert!(SceneConfig::new()
            .with_schema_dir("definitely/not/a/schema/dir")
            .validate()
            .is_err());
    }
}
