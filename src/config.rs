//! Configuration loading.
//!
//! The configuration file lives at `~/.config/togo/config.json` and looks like
//! `{"config": {"dataLocation": "/path/to/data.json"}}`. It is read once at
//! startup; any problem with it falls back to the defaults without bothering
//! the user.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

/// Data file used when nothing else is configured, relative to the working
/// directory.
pub const DEFAULT_DATA_LOCATION: &str = "data.json";

/// Resolved configuration, built once in `main` and handed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_location: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_location: PathBuf::from(DEFAULT_DATA_LOCATION),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    config: ConfigSection,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigSection {
    #[serde(rename = "dataLocation", default)]
    data_location: Option<String>,
}

/// Directory holding the config file and the default log file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("togo"))
}

/// Default config file path, `None` when there is no home directory.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.json"))
}

impl Config {
    /// Load configuration from `path`. Never fails.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                info!("No config at {} ({e}), using defaults", path.display());
                return Config::default();
            }
        };
        Self::parse(&content).unwrap_or_else(|e| {
            warn!("Ignoring unparsable config {}: {e}", path.display());
            Config::default()
        })
    }

    /// Load from the default location, or use defaults if there is no home
    /// directory.
    pub fn load_default() -> Self {
        match config_path() {
            Some(path) => Self::load(&path),
            None => {
                warn!("Could not determine home directory, using default config");
                Config::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let data_location = match file.config.data_location {
            Some(loc) if !loc.is_empty() => PathBuf::from(loc),
            _ => PathBuf::from(DEFAULT_DATA_LOCATION),
        };
        Ok(Config { data_location })
    }
}
