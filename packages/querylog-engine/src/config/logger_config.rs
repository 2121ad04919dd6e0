//! Render switches for serialized log items

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Environment override for [`LoggerConfig::numerics`]
pub const ENV_NUMERICS: &str = "QUERYLOG_LOGGER_NUMERICS";

/// Environment override for [`LoggerConfig::decorations_top_level`]
pub const ENV_DECORATIONS_TOP_LEVEL: &str = "QUERYLOG_DECORATIONS_TOP_LEVEL";

/// Logger render configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Render numeric column values as JSON numbers instead of strings
    #[serde(alias = "log_numerics_as_numbers")]
    pub numerics: bool,

    /// Merge decorations into the top-level object instead of nesting them
    /// under `decorations`
    pub decorations_top_level: bool,
}

/// Options read by the serialization layer at render time.
pub type RenderOptions = LoggerConfig;

impl LoggerConfig {
    pub fn new(numerics: bool, decorations_top_level: bool) -> Self {
        Self {
            numerics,
            decorations_top_level,
        }
    }

    /// Parse from a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply `QUERYLOG_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in
    /// production, a map in tests).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        if let Some(value) = lookup(ENV_NUMERICS) {
            self.numerics = parse_bool(ENV_NUMERICS, &value)?;
        }
        if let Some(value) = lookup(ENV_DECORATIONS_TOP_LEVEL) {
            self.decorations_top_level = parse_bool(ENV_DECORATIONS_TOP_LEVEL, &value)?;
        }
        Ok(self)
    }
}

fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
