use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Birthday file loaded at startup
    #[serde(default = "default_birthdays_file")]
    pub birthdays_file: PathBuf,

    /// Start with an empty store when the birthday file is missing
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,

    /// Title-case names and birthdays read from the file, like typed ones
    #[serde(default)]
    pub normalize_loaded: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            birthdays_file: default_birthdays_file(),
            create_if_missing: default_create_if_missing(),
            normalize_loaded: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to a rotating file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

// Default value functions for serde
fn default_birthdays_file() -> PathBuf {
    PathBuf::from("birthdays.csv")
}

fn default_create_if_missing() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        // Missing config is not an error, every field has a default
        if !self.path.exists() {
            log::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: birthdays_file={:?}, create_if_missing={}",
            config.general.birthdays_file,
            config.general.create_if_missing
        );

        Ok(config)
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}
