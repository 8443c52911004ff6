//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid {0} endpoint URL")]
    InvalidEndpoint(&'static str),

    #[error("Invalid top-k value for {0}: must be at least 1")]
    InvalidTopK(&'static str),

    #[error("Collection file names must be distinct and non-empty")]
    InvalidFileNames,

    #[error("Submission threshold must be within 0-100 percent")]
    InvalidSubmissionThreshold,

    #[error("Staleness window must be positive")]
    InvalidStaleness,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
