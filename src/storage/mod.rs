pub mod birthdays;
pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub use birthdays::{BirthdayStorage, DelimitedFileStorage, StorageError};
pub use config::{Config, ConfigStorage, GeneralConfig, LoggingConfig, TomlConfigStorage};

/// Default config file location
///
/// XDG Base Directory Specification:
/// - Config: $XDG_CONFIG_HOME/birthdays/birthdays.toml
///   (default: ~/.config/birthdays/birthdays.toml)
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("birthdays")
    } else {
        let home = env::var("HOME").context("HOME environment variable not set")?;
        PathBuf::from(home).join(".config/birthdays")
    };

    Ok(config_dir.join("birthdays.toml"))
}
