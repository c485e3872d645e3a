//! Configuration management for stockroom
//!
//! Config stored at: ~/.config/stockroom/config.json, with environment
//! variables taking precedence over the file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stockroom_types::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Address the API binds to
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Secret feeding the rotating station PIN
    #[serde(default = "default_station_secret")]
    pub station_secret: String,

    /// Minutes a station PIN stays valid
    #[serde(default = "default_pin_rotate_minutes")]
    pub station_pin_rotate_minutes: i64,

    /// Length of generated item short codes
    #[serde(default = "default_short_code_length")]
    pub short_code_length: usize,

    /// Whether label printing is offered to clients
    #[serde(default = "default_true")]
    pub labels_enabled: bool,
}

fn default_database_url() -> String {
    "sqlite://stockroom.db".to_string()
}

fn default_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_station_secret() -> String {
    "stockroom-dev".to_string()
}

fn default_pin_rotate_minutes() -> i64 {
    1440
}

fn default_short_code_length() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            addr: default_addr(),
            station_secret: default_station_secret(),
            station_pin_rotate_minutes: default_pin_rotate_minutes(),
            short_code_length: default_short_code_length(),
            labels_enabled: default_true(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("stockroom");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from the config file (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                serde_json::from_str(&content)
                    .map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Persist the config file.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_path()?, content)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("STOCKROOM_DATABASE_URL") {
            self.database_url = url;
        } else if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(addr) = std::env::var("STOCKROOM_ADDR") {
            self.addr = addr;
        }
        if let Ok(secret) = std::env::var("STOCKROOM_STATION_SECRET") {
            self.station_secret = secret;
        }
        if let Ok(minutes) = std::env::var("STOCKROOM_PIN_ROTATE_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.station_pin_rotate_minutes = minutes;
            }
        }
    }
}
