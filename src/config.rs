//! Configuration

use std::{fs, path::Path};

use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::store::DEFAULT_STORAGE_KEY;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Cart settings for one storefront.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    /// Key the cart is stored under.
    pub storage_key: String,

    /// ISO currency code used for display (`USD`, `GBP` or `EUR`).
    pub currency: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl CartConfig {
    /// Parse configuration from YAML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or names an unknown currency.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: CartConfig = serde_norway::from_str(yaml)?;

        config.resolve_currency()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn resolve_currency(&self) -> Result<&'static Currency, ConfigError> {
        match self.currency.trim().to_ascii_uppercase().as_str() {
            "GBP" => Ok(GBP),
            "USD" => Ok(USD),
            "EUR" => Ok(EUR),
            _ => Err(ConfigError::UnknownCurrency(self.currency.clone())),
        }
    }
}
