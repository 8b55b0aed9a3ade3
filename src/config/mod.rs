//! Engine configuration
//!
//! TOML-backed settings for the forecasting core: FIFO slot count,
//! default forecast horizon and the sled data directory. Validation
//! returns field-named errors so callers can point users at the exact
//! offending setting.

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{SledVersionStore, StorageError, VersionArchiver};

/// How many user-triggered forecast versions a well keeps (FIFO MAX)
///
/// Deployments run with 3 or 4 slots depending on context; the valid
/// range is kept wider for lab setups.
const DEFAULT_MAX_VERSIONS: u32 = 3;
const MAX_VERSIONS_LIMIT: u32 = 8;

const DEFAULT_HORIZON_MONTHS: u32 = 12;
const HORIZON_LIMIT_MONTHS: u32 = 360;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Forecasting engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// FIFO version slots per well (version 0 excluded)
    #[serde(default = "default_max_versions")]
    pub max_forecast_versions: u32,
    /// Default forecast horizon when the caller gives no end date
    #[serde(default = "default_horizon_months")]
    pub forecast_horizon_months: u32,
    /// Directory for the sled version store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

const fn default_max_versions() -> u32 {
    DEFAULT_MAX_VERSIONS
}

const fn default_horizon_months() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

fn default_data_dir() -> String {
    "data/forecast_versions".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_forecast_versions: DEFAULT_MAX_VERSIONS,
            forecast_horizon_months: DEFAULT_HORIZON_MONTHS,
            data_dir: default_data_dir(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML config string
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every numeric setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_VERSIONS_LIMIT).contains(&self.max_forecast_versions) {
            return Err(ConfigError::OutOfRange {
                field: "max_forecast_versions",
                value: self.max_forecast_versions,
                min: 1,
                max: MAX_VERSIONS_LIMIT,
            });
        }
        if !(1..=HORIZON_LIMIT_MONTHS).contains(&self.forecast_horizon_months) {
            return Err(ConfigError::OutOfRange {
                field: "forecast_horizon_months",
                value: self.forecast_horizon_months,
                min: 1,
                max: HORIZON_LIMIT_MONTHS,
            });
        }
        Ok(())
    }

    /// Open the sled version store at the configured data directory,
    /// wrapped in an archiver with the configured FIFO slot count
    pub fn open_archiver(&self) -> Result<VersionArchiver, StorageError> {
        let store = SledVersionStore::open(&self.data_dir)?;
        Ok(VersionArchiver::new(
            Arc::new(store),
            self.max_forecast_versions,
        ))
    }

    /// Forecast end date for the configured horizon
    ///
    /// Used when the caller supplies no explicit end date: the horizon
    /// is counted in calendar months from `from`.
    #[must_use]
    pub fn horizon_end(&self, from: NaiveDate) -> NaiveDate {
        from + Months::new(self.forecast_horizon_months)
    }
}
