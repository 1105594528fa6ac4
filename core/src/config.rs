//! Configuration for the core crate
//!
//! This module provides configuration options for the payload transform
//! and the endpoint it is submitted to.

use serde::{Serialize, Deserialize};

/// Database name the SQL generation service targets when none is given
pub const DEFAULT_DB_NAME: &str = "dic_survey_engine_db";

/// Base URL of the SQL generation service when none is given
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// How text fields that should hold integers are converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Unparseable text becomes the not-a-number sentinel (`null` on the wire)
    Permissive,

    /// Unparseable text fails the transform with `FieldNotNumeric`
    Strict,
}

impl Default for NumericPolicy {
    fn default() -> Self {
        NumericPolicy::Permissive
    }
}

/// SQL generation endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Target database name written into every document
    pub db_name: String,

    /// Numeric parsing policy
    pub numeric_policy: NumericPolicy,

    /// SQL generation endpoint
    pub endpoint: EndpointConfig,

    /// Log level
    pub log_level: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            db_name: DEFAULT_DB_NAME.to_string(),
            numeric_policy: NumericPolicy::default(),
            endpoint: EndpointConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl TransformConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self, crate::error::CoreError> {
        let file = std::fs::File::open(path)
            .map_err(crate::error::CoreError::IoError)?;

        let config: Self = serde_json::from_reader(file)
            .map_err(crate::error::CoreError::JsonError)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<(), crate::error::CoreError> {
        let file = std::fs::File::create(path)
            .map_err(crate::error::CoreError::IoError)?;

        serde_json::to_writer_pretty(file, self)
            .map_err(crate::error::CoreError::JsonError)?;

        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), crate::error::CoreError> {
        if self.db_name.trim().is_empty() {
            return Err(crate::error::to_config_error("db_name must not be empty"));
        }
        let url = &self.endpoint.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(crate::error::to_config_error(format!(
                "endpoint base_url must be an http(s) URL, got {:?}",
                url
            )));
        }
        Ok(())
    }

    /// Override the target database name
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Override the numeric parsing policy
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    /// Create a development configuration
    pub fn development() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config
    }

    /// Create a production configuration
    ///
    /// Production rejects non-numeric id fields instead of sending `null`
    /// to the SQL generator.
    pub fn production() -> Self {
        let mut config = Self::default();
        config.numeric_policy = NumericPolicy::Strict;
        config.log_level = "info".to_string();
        config
    }

    /// Create a testing configuration
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config.endpoint.timeout_secs = 5;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = TransformConfig::default();

        assert_eq!(config.db_name, "dic_survey_engine_db");
        assert_eq!(config.numeric_policy, NumericPolicy::Permissive);
        assert_eq!(config.endpoint.base_url, "http://localhost:3001");
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_presets() {
        assert_eq!(TransformConfig::development().log_level, "debug");
        assert_eq!(TransformConfig::production().numeric_policy, NumericPolicy::Strict);

        let config = TransformConfig::testing();
        assert_eq!(config.endpoint.timeout_secs, 5);
        assert_eq!(config.numeric_policy, NumericPolicy::Permissive);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TransformConfig =
            serde_json::from_str(r#"{"numeric_policy": "strict"}"#).unwrap();

        assert_eq!(config.numeric_policy, NumericPolicy::Strict);
        assert_eq!(config.db_name, DEFAULT_DB_NAME);
        assert_eq!(config.endpoint.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = TransformConfig::new().with_db_name("  ");
        assert!(config.validate().is_err());

        let mut config = TransformConfig::new();
        config.endpoint.base_url = "localhost:3001".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_io() {
        let config = TransformConfig::new()
            .with_db_name("survey_staging")
            .with_numeric_policy(NumericPolicy::Strict);

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        config.to_file(path).unwrap();
        let loaded = TransformConfig::from_file(path).unwrap();

        assert_eq!(loaded.db_name, "survey_staging");
        assert_eq!(loaded.numeric_policy, NumericPolicy::Strict);
        assert_eq!(loaded.endpoint.timeout_secs, config.endpoint.timeout_secs);
    }
}
