/// Application configuration management
/// Reads user preferences from ~/.config/heapdash/config.toml

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::TargetName;
use crate::utils::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub panels: Option<Vec<String>>,
}

/// Values given on the command line (or through their env vars)
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub interval_ms: Option<u64>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub panels: Vec<TargetName>,
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine the user config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Merge with command line overrides and fill in defaults
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let endpoint = overrides
            .endpoint
            .or(self.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let interval_ms = overrides
            .interval_ms
            .or(self.interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(anyhow!("Poll interval must be greater than zero"));
        }

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let panels = match self.panels {
            Some(names) => names
                .iter()
                .map(|name| TargetName::from_str(name))
                .collect::<Result<Vec<_>, _>>()?,
            None => TargetName::ALL.to_vec(),
        };

        Ok(Settings {
            endpoint,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_secs(timeout_secs),
            panels,
        })
    }
}
