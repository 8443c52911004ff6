//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SOUL` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a usable
//! configuration backed by `./data`.
//!
//! # Example
//!
//! ```no_run
//! use soul_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.logging.init().expect("Failed to initialise logging");
//!
//! println!("Data stored in {}", config.storage.data_dir.display());
//! ```

mod classifier;
mod engagement;
mod error;
mod generator;
mod logging;
mod storage;

pub use classifier::ClassifierConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ValidationError};
pub use generator::GeneratorConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Collection file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Emotion classifier endpoint and ranking limits
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Chat response generator endpoint
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Staleness and questionnaire thresholds
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SOUL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SOUL__STORAGE__DATA_DIR=/var/lib/soul` -> `storage.data_dir = /var/lib/soul`
    /// - `SOUL__CLASSIFIER__TOP_K=3` -> `classifier.top_k = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SOUL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.classifier.validate()?;
        self.generator.validate()?;
        self.engagement.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SOUL__STORAGE__DATA_DIR");
        env::remove_var("SOUL__CLASSIFIER__TOP_K");
        env::remove_var("SOUL__CLASSIFIER__ENDPOINT");
        env::remove_var("SOUL__ENGAGEMENT__STALENESS_HOURS");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.classifier.top_k, 5);
        assert_eq!(config.engagement.staleness_hours, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SOUL__STORAGE__DATA_DIR", "/var/lib/soul");
        env::set_var("SOUL__CLASSIFIER__TOP_K", "3");
        env::set_var("SOUL__ENGAGEMENT__STALENESS_HOURS", "6");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/soul"));
        assert_eq!(config.classifier.top_k, 3);
        assert_eq!(config.engagement.staleness_hours, 6);
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SOUL__CLASSIFIER__ENDPOINT", "not-a-url");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidEndpoint("classifier"))
        );
    }
}
