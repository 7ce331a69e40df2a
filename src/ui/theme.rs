//! Theme and styling configuration.
//!
//! The theme is chosen once at startup from the settings file or command line
//! and read by every widget through [`theme()`].

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the showcase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name as written in the settings file.
    pub name: &'static str,
    /// Primary foreground color.
    pub fg: Color,
    /// Secondary text (placeholders, helper text, dim indicators).
    pub muted: Color,
    /// Accent for focus and active sort.
    pub accent: Color,
    /// Error color for invalid fields.
    pub error: Color,
    /// Background of the filled input variant.
    pub filled_bg: Color,
    /// Background of selected table rows.
    pub selected_bg: Color,
    /// Header row background.
    pub header_bg: Color,
}

impl Theme {
    /// The dark palette.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            error: Color::Red,
            filled_bg: Color::Rgb(40, 44, 52),
            selected_bg: Color::Rgb(23, 37, 84),
            header_bg: Color::Rgb(31, 41, 55),
        }
    }

    /// The light palette.
    pub fn light() -> Self {
        Self {
            name: "light",
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            error: Color::LightRed,
            filled_bg: Color::Rgb(243, 244, 246),
            selected_bg: Color::Rgb(239, 246, 255),
            header_bg: Color::Rgb(249, 250, 251),
        }
    }

    /// Look up a theme by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Style for focused borders and titles.
    pub fn focus_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for dim, secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for the table header row.
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the process-wide theme. Only the first call has an effect.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized, ignoring");
    }
}

/// Get the active theme, falling back to the dark palette.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("dark"), Some(Theme::dark()));
        assert_eq!(Theme::from_name("light"), Some(Theme::light()));
        assert_eq!(Theme::from_name("solarized"), None);
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default().name, "dark");
    }
}
