//! Journal configuration, loaded from TOML.
//!
//! ```toml
//! [journal]
//! default_commission_rate = 0.07   # percent, for open trades that carry none (default 0.0)
//!
//! [stats]
//! min_trades_per_strategy = 1
//! ```
//!
//! Every field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub journal: JournalSettings,
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Percentage commission (0.07 = 0.07 %) for OPEN trades without their own
    /// rate. Defaults to 0.0; 0.07 is only an example value.
    pub default_commission_rate: f64,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self { default_commission_rate: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Strategies with fewer closed trades are left out of the breakdown.
    pub min_trades_per_strategy: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { min_trades_per_strategy: 1 }
    }
}

impl JournalConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.journal.default_commission_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_commission_rate must be a non-negative percentage, got {rate}"
            )));
        }
        Ok(())
    }
}
