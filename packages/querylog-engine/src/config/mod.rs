//! Logger configuration
//!
//! Render switches that used to be process-wide flags are an explicit value
//! here and get passed into every serialization call.
//!
//! # Examples
//!
//! ```rust
//! use querylog_engine::config::LoggerConfig;
//!
//! let config = LoggerConfig::from_yaml_str("numerics: true\n").unwrap();
//! assert!(config.numerics);
//! assert!(!config.decorations_top_level);
//! ```

pub mod error;
pub mod logger_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use logger_config::{LoggerConfig, RenderOptions, ENV_DECORATIONS_TOP_LEVEL, ENV_NUMERICS};
