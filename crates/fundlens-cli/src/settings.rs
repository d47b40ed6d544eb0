//! TOML configuration file.
//!
//! ```toml
//! [analytics]
//! trading_days_per_year = 252
//! quantile_method = "linear"
//!
//! [data]
//! dir = "/home/analyst/fund-exports"
//! fund_name = "Pacific Growth"
//! ```

use std::path::{Path, PathBuf};

use fundlens_analytics::{AnalyticsConfig, Validate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Data location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding the CSV tables.
    pub dir: Option<PathBuf>,
    /// Fund name shown in reports.
    pub fund_name: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: None,
            fund_name: "Fund".to_string(),
        }
    }
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Analytics constants.
    pub analytics: AnalyticsConfig,
    /// Data location.
    pub data: DataSettings,
}

/// Default configuration file path.
pub fn default_config_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
    Ok(base.join("fundlens").join("config.toml"))
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
        settings
            .analytics
            .validate_or_error()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(settings)
    }

    /// Loads settings.
    ///
    /// An explicit path must exist. The default path is optional; without it
    /// every setting takes its default.
    pub fn load(explicit: Option<&Path>) -> CliResult<(Self, PathBuf)> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path()?, false),
        };

        if !path.exists() {
            if required {
                return Err(CliError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok((Self::default(), path));
        }

        let text = std::fs::read_to_string(&path)?;
        let settings = Self::from_toml(&text)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config file");
        Ok((settings, path))
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}
