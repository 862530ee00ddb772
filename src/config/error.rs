//! Configuration error types

use thiserror::Error;

/// Errors raised while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value the service cannot run with
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port")]
    InvalidSocketAddr,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout ({request_secs}s) is shorter than the model timeout ({model_secs}s)")]
    RequestTimeoutBelowModelTimeout { request_secs: u64, model_secs: u64 },

    #[error("Temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("Model id must not be empty")]
    EmptyModelId,

    #[error("Sample rows must be between 1 and 100, got {0}")]
    InvalidSampleRows(usize),
}
