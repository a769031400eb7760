use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_results: u16,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: 20,
            config_path: default_config_path(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    max_results: Option<u16>,
}

/// Directory for config and logs. `USEDBY_DATA_DIR` wins so tests and
/// portable installs can relocate all state.
pub fn stable_app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("USEDBY_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    #[cfg(target_os = "windows")]
    if let Ok(base) = std::env::var("LOCALAPPDATA") {
        if !base.trim().is_empty() {
            return PathBuf::from(base).join("usedby");
        }
    }

    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home).join(".local").join("share").join("usedby");
        }
    }

    std::env::temp_dir().join("usedby")
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join("config.toml")
}

/// Loads the config at `path` (default location when `None`). A missing file
/// yields defaults; a malformed or out-of-range file is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    let mut config = Config {
        config_path: config_path.clone(),
        ..Config::default()
    };

    match std::fs::read_to_string(&config_path) {
        Ok(raw) => {
            let parsed: ConfigFile =
                toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
            if let Some(max_results) = parsed.max_results {
                config.max_results = max_results;
            }
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => return Err(ConfigError::Io(error)),
    }

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    validate(config).map_err(ConfigError::Invalid)?;
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = ConfigFile {
        max_results: Some(config.max_results),
    };
    let raw = toml::to_string_pretty(&file).map_err(|error| ConfigError::Parse(error.to_string()))?;
    std::fs::write(&config.config_path, raw)?;
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), String> {
    if config.max_results < 5 || config.max_results > 100 {
        return Err("max_results out of range".into());
    }
    if config.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }
    Ok(())
}
