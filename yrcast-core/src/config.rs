use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{fetcher::DEFAULT_FORECAST_URL, resolver::DEFAULT_GEOCODE_URL};

pub const DEFAULT_USER_AGENT: &str = concat!("yrcast/", env!("CARGO_PKG_VERSION"));

/// Provider base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocode: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode: DEFAULT_GEOCODE_URL.to_string(),
            forecast: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifying `User-Agent`; met.no asks for contact details in it.
    pub user_agent: String,

    /// Location used when none is given on the command line.
    pub default_location: Option<String>,

    /// Example TOML:
    /// [endpoints]
    /// forecast = "https://api.met.no/weatherapi/locationforecast/2.0/compact"
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_location: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "yrcast", "yrcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Location to use when the caller supplied none.
    pub fn location_or_default(&self, location: Option<String>) -> Result<String> {
        location.or_else(|| self.default_location.clone()).ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass a location or run `yrcast configure`."
            )
        })
    }
}
