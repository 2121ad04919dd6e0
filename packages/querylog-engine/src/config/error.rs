//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Environment override that is not a boolean
    #[error("Invalid value '{value}' for {var}. Expected one of: true, false, 1, 0")]
    InvalidEnv { var: String, value: String },
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
