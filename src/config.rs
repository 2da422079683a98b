//! Configuration file of the bridge

use crate::external::permission::command::CommandStrings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "brightness-bridge.toml";

/// The whole configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name under which the bridge channel is served
    pub channel: String,
    /// `[settings]` section
    pub settings: SettingsConfig,
    /// Program opening the permission-grant screen
    pub permission: Option<CommandStrings>,
    /// `[logging]` section
    pub logging: LoggingConfig,
}

/// Where the system settings live
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// The settings store file
    pub path: PathBuf,
}

/// Log verbosity and destination
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A flexi_logger log specification, e.g. `info` or `warn, brightness_bridge = debug`
    pub level: String,
    /// Log into files in this directory instead of stderr
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            channel: "brightness_bridge".to_owned(),
            settings: SettingsConfig::default(),
            permission: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig {
            path: PathBuf::from("settings.toml"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_owned(),
            directory: None,
        }
    }
}

impl Config {
    /// Parse configuration file contents
    pub fn parse(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the configuration from `path`, or from [DEFAULT_CONFIG_PATH] if
    /// it's None.
    ///
    /// A missing default file yields the default configuration, a missing
    /// explicitly given file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        match fs::read_to_string(path) {
            Ok(contents) => Config::parse(&contents)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => Ok(Config::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Couldn't read configuration {}", path.display()))
            }
        }
    }
}
