use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adaptive::error::ConfigError;
use crate::adaptive::schema::{DEFAULT_VERSION, is_supported_version};

pub const ENV_VALIDATION_MODE: &str = "CARDKIT_VALIDATION_MODE";
pub const ENV_DEFAULT_VERSION: &str = "CARDKIT_DEFAULT_VERSION";

/// How a failed card-level validation affects mounting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Off,
    Warn,
    #[default]
    Error,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::Off => "off",
            ValidationMode::Warn => "warn",
            ValidationMode::Error => "error",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(ValidationMode::Off),
            "warn" | "warning" => Ok(ValidationMode::Warn),
            "error" | "strict" => Ok(ValidationMode::Error),
            _ => Err(ConfigError::InvalidValidationMode(raw.to_string())),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CardOptions {
    #[serde(alias = "validation_mode")]
    pub validation_mode: ValidationMode,
    /// Version assigned to cards that omit `version`.
    #[serde(alias = "default_version")]
    pub default_version: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            default_version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl CardOptions {
    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Reads `CARDKIT_VALIDATION_MODE` and `CARDKIT_DEFAULT_VERSION`, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(mode) = non_empty(lookup(ENV_VALIDATION_MODE)) {
            options.validation_mode = mode.parse()?;
        }
        if let Some(version) = non_empty(lookup(ENV_DEFAULT_VERSION)) {
            options.default_version = version;
        }
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_supported_version(&self.default_version) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedVersion(
                self.default_version.clone(),
            ))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
