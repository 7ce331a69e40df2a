//! Configuration management for the showcase.
//!
//! Settings are read from a TOML file in the platform configuration
//! directory. A missing file is not an error: defaults are used instead.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::{Settings, StartScreen};

/// Name of the configuration directory and log directory.
pub const APP_DIR: &str = "tui-showcase";

/// Name of the settings file inside the configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The settings file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A setting has an unsupported value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Path of the default settings file.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}
