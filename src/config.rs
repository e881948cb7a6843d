//! User configuration and on-disk locations

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const APP_NAME: &str = "daybook";
pub const DEFAULT_DATA_FILE: &str = "todos.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backing file; `~/` expands to the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; relative names are placed in the data directory
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    format!("{}.log", APP_NAME)
}

impl LoggingConfig {
    pub fn file_path(&self, data_dir: &Path) -> PathBuf {
        let file = expand_home(&self.file);
        if file.is_absolute() {
            file
        } else {
            data_dir.join(file)
        }
    }
}

/// `<data_dir>/daybook`, created on demand.
pub fn get_app_dir() -> Result<PathBuf, ConfigError> {
    let dir = dirs::data_dir()
        .ok_or(ConfigError::NoPlatformDir("data"))?
        .join(APP_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::NoPlatformDir("config"))?
        .join(APP_NAME)
        .join("config.toml"))
}

impl Config {
    /// Load the user config; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the backing file: explicit override, then config, then the
    /// default under the data directory.
    pub fn data_file(&self, override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        if let Some(configured) = &self.storage.data_file {
            return Ok(expand_home(configured));
        }
        Ok(get_app_dir()?.join(DEFAULT_DATA_FILE))
    }
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
