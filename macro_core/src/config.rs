//! Configuration file support for mcalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/macrocalc/config.toml`.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Output formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// strftime pattern for log dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    #[serde(default = "default_chart_height")]
    pub chart_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("macrocalc")
}

fn default_date_format() -> String {
    "%m/%d/%Y".into()
}

fn default_chart_width() -> usize {
    48
}

fn default_chart_height() -> usize {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("macrocalc").join("config.toml")
    }

    /// Reject settings the renderer cannot use
    pub fn validate(&self) -> Result<()> {
        let format = self.display.date_format.as_str();
        if format.trim().is_empty() {
            return Err(Error::Config("display.date_format must not be empty".into()));
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "display.date_format {:?} is not a valid strftime pattern",
                format
            )));
        }

        // Time and offset fields parse but cannot be rendered for a bare date
        let sample = NaiveDate::from_ymd_opt(2024, 1, 31)
            .ok_or_else(|| Error::Config("invalid sample date".into()))?;
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(format)).is_err() {
            return Err(Error::Config(format!(
                "display.date_format {:?} cannot format a calendar date",
                format
            )));
        }
        if self.display.chart_width < 2 || self.display.chart_height < 2 {
            return Err(Error::Config(
                "display.chart_width and display.chart_height must be at least 2".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
