//! Application settings configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{default_config_path, ConfigError, Result};
use crate::events::TICK_RATE_MS;
use crate::ui::components::DEFAULT_MASK_CHAR;
use crate::ui::theme::Theme;

/// Which screen is shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    /// The demonstration page.
    #[default]
    Showcase,
    /// The story catalog.
    Catalog,
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Ticks the simulated sign-in stays in the loading state.
    pub sign_in_ticks: u32,
    /// Screen shown at startup.
    pub start_screen: StartScreen,
    /// Character used to mask password fields.
    pub mask_char: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: TICK_RATE_MS,
            sign_in_ticks: 20,
            start_screen: StartScreen::Showcase,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Load settings from `path`, using defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if Theme::from_name(&self.theme).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "unknown theme '{}', expected 'dark' or 'light'",
                self.theme
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if self.mask_char.is_control() || self.mask_char.is_whitespace() {
            return Err(ConfigError::ValidationError(
                "mask_char must be a visible character".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured theme.
    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.theme().name, "dark");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"light\"\nstart_screen = \"catalog\"").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.start_screen, StartScreen::Catalog);
        assert_eq!(settings.sign_in_ticks, 20);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = ").unwrap();
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let settings = Settings {
            theme: "neon".to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_blank_mask_char_rejected() {
        let settings = Settings {
            mask_char: ' ',
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
