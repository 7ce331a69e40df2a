//! Loading spinner shared by the widgets.
//!
//! The data table shows a spinner in place of its body while loading, and the
//! input field shows one as its trailing affordance.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Braille spinner frames.
const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII spinner frames for terminals without braille glyphs.
const SIMPLE_FRAMES: &[&str] = &["|", "/", "-", "\\"];

/// The type of spinner to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    /// Braille dots spinner.
    #[default]
    Braille,
    /// Simple ASCII spinner.
    Simple,
}

impl SpinnerStyle {
    /// Get the frames for this spinner style.
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Braille => BRAILLE_FRAMES,
            SpinnerStyle::Simple => SIMPLE_FRAMES,
        }
    }
}

/// An animated spinner. Advances one frame per tick.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    state: usize,
    style: SpinnerStyle,
}

impl Spinner {
    /// Create a braille spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spinner style.
    pub fn with_style(mut self, style: SpinnerStyle) -> Self {
        self.style = style;
        self.state = 0;
        self
    }

    /// Advance the animation.
    pub fn tick(&mut self) {
        self.state = (self.state + 1) % self.style.frames().len();
    }

    /// Get the current frame.
    pub fn frame(&self) -> &'static str {
        self.style.frames()[self.state]
    }

    /// Render the spinner followed by `message`, centered in `area`.
    pub fn render_centered(&self, frame: &mut Frame, area: Rect, message: &str, style: Style) {
        let line = Line::from(vec![
            Span::styled(self.frame(), style),
            Span::raw(" "),
            Span::styled(message.to_string(), style),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_style_frames() {
        assert_eq!(SpinnerStyle::Braille.frames().len(), 10);
        assert_eq!(SpinnerStyle::Simple.frames().len(), 4);
    }

    #[test]
    fn test_spinner_tick_advances() {
        let mut spinner = Spinner::new();
        let first = spinner.frame();
        spinner.tick();
        assert_ne!(first, spinner.frame());
    }

    #[test]
    fn test_spinner_tick_wraps() {
        let mut spinner = Spinner::new().with_style(SpinnerStyle::Simple);
        for _ in 0..SIMPLE_FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.frame(), "|");
    }
}
