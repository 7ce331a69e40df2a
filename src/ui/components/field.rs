//! Labeled text input field.
//!
//! This module provides a single-line input widget with support for:
//! - Character input and deletion with cursor movement
//! - Three visual variants (filled, outlined, ghost) and three sizes
//! - Disabled and invalid states with helper or error text
//! - A trailing affordance: clear button, password visibility toggle, or a
//!   loading spinner that replaces both
//!
//! Everything shown is derived from the field's configuration on each render.
//! The only state the field keeps for itself is the password visibility
//! toggle, which starts hidden and lives as long as the field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use super::loading::{Spinner, SpinnerStyle};
use crate::ui::theme::theme;

/// Default character used to mask password input.
pub const DEFAULT_MASK_CHAR: char = '•';

/// Visual style of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVariant {
    /// Shaded background.
    Filled,
    /// Full border.
    #[default]
    Outlined,
    /// Underline only.
    Ghost,
}

/// Size of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSize {
    /// No padding.
    Small,
    /// Horizontal padding.
    #[default]
    Medium,
    /// Horizontal and vertical padding.
    Large,
}

impl FieldSize {
    fn padding(&self) -> Padding {
        match self {
            Self::Small => Padding::ZERO,
            Self::Medium => Padding::horizontal(1),
            Self::Large => Padding::new(2, 2, 1, 1),
        }
    }
}

/// What kind of text the field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Plain text.
    #[default]
    Text,
    /// Masked unless the visibility toggle is on.
    Password,
}

/// The single trailing affordance, chosen in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingAffordance {
    /// Loading: a spinner and nothing else.
    Spinner,
    /// Password with a value: show/hide toggle.
    VisibilityToggle {
        /// Whether the text is currently shown.
        visible: bool,
    },
    /// Text with a value: clear button.
    Clear,
    /// Empty value.
    None,
}

impl TrailingAffordance {
    /// The glyph rendered for this affordance (spinner excluded).
    pub fn label(&self) -> &'static str {
        match self {
            Self::VisibilityToggle { visible: true } => "hide",
            Self::VisibilityToggle { visible: false } => "show",
            Self::Clear => "✕",
            Self::Spinner | Self::None => "",
        }
    }
}

/// Text shown below the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    /// Error text; shown only when invalid.
    Error(&'a str),
    /// Helper text.
    Helper(&'a str),
    /// Nothing below the input.
    None,
}

/// Notifications returned from field operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    /// The text changed. Carries the new value.
    Changed(String),
    /// The password visibility toggle flipped. Carries the new state.
    VisibilityToggled(bool),
}

/// Presentation derived from variant, size, disabled, invalid and focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStyle {
    /// Which borders to draw.
    pub borders: Borders,
    /// Border color.
    pub border_color: Color,
    /// Background fill, if any.
    pub background: Option<Color>,
    /// Inner padding.
    pub padding: Padding,
    /// Whether text is dimmed.
    pub dimmed: bool,
}

impl FieldStyle {
    /// Rows taken by the input box.
    pub fn box_height(&self) -> u16 {
        let mut height = 1 + self.padding.top + self.padding.bottom;
        if self.borders.contains(Borders::TOP) {
            height += 1;
        }
        if self.borders.contains(Borders::BOTTOM) {
            height += 1;
        }
        height
    }

    fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .borders(self.borders)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);
        if let Some(bg) = self.background {
            block = block.style(Style::default().bg(bg));
        }
        block
    }
}

/// A labeled single-line text input.
#[derive(Debug, Clone)]
pub struct InputField {
    /// The current value.
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    label: String,
    placeholder: String,
    helper_text: String,
    error_text: String,
    disabled: bool,
    invalid: bool,
    variant: FieldVariant,
    size: FieldSize,
    loading: bool,
    kind: InputKind,
    /// Password visibility toggle; starts hidden.
    show_password: bool,
    mask_char: char,
    spinner: Spinner,
    /// Where the trailing affordance was last drawn.
    trailing_area: Option<Rect>,
    /// First character shown when the value is wider than the box.
    scroll: usize,
}

impl InputField {
    /// Create an empty outlined, medium, plain-text field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: String::new(),
            placeholder: String::new(),
            helper_text: String::new(),
            error_text: String::new(),
            disabled: false,
            invalid: false,
            variant: FieldVariant::default(),
            size: FieldSize::default(),
            loading: false,
            kind: InputKind::default(),
            show_password: false,
            mask_char: DEFAULT_MASK_CHAR,
            spinner: Spinner::new().with_style(SpinnerStyle::Simple),
            trailing_area: None,
            scroll: 0,
        }
    }

    /// Create an empty password field.
    pub fn password() -> Self {
        Self::new().with_kind(InputKind::Password)
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the helper text.
    pub fn with_helper_text(mut self, helper: impl Into<String>) -> Self {
        self.helper_text = helper.into();
        self
    }

    /// Set the error text.
    pub fn with_error_text(mut self, error: impl Into<String>) -> Self {
        self.error_text = error.into();
        self
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the invalid flag.
    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set the visual variant.
    pub fn with_variant(mut self, variant: FieldVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: FieldSize) -> Self {
        self.size = size;
        self
    }

    /// Set the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the input kind.
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the character used for masking.
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position in characters.
    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the invalid flag.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Set the error text.
    pub fn set_error_text(&mut self, error: impl Into<String>) {
        self.error_text = error.into();
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the loading flag is set.
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the field is invalid.
    #[cfg(test)]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Get the input kind.
    #[cfg(test)]
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Whether characters are obscured.
    pub fn is_masked(&self) -> bool {
        self.kind == InputKind::Password && !self.show_password
    }

    /// The text as it should be drawn.
    pub fn display_value(&self) -> String {
        if self.is_masked() {
            std::iter::repeat(self.mask_char)
                .take(self.value.chars().count())
                .collect()
        } else {
            self.value.clone()
        }
    }

    /// Whether the input element accepts edits. Loading disables it too.
    pub fn accepts_input(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// The trailing affordance for the current configuration.
    pub fn trailing(&self) -> TrailingAffordance {
        if self.loading {
            TrailingAffordance::Spinner
        } else if self.value.is_empty() {
            TrailingAffordance::None
        } else {
            match self.kind {
                InputKind::Password => TrailingAffordance::VisibilityToggle {
                    visible: self.show_password,
                },
                InputKind::Text => TrailingAffordance::Clear,
            }
        }
    }

    /// The text below the input. Error text wins over helper text.
    pub fn message(&self) -> FieldMessage<'_> {
        if self.invalid && !self.error_text.is_empty() {
            FieldMessage::Error(&self.error_text)
        } else if !self.helper_text.is_empty() {
            FieldMessage::Helper(&self.helper_text)
        } else {
            FieldMessage::None
        }
    }

    /// Presentation for the current variant, size and state.
    pub fn field_style(&self, focused: bool) -> FieldStyle {
        let t = theme();
        let (borders, background) = match self.variant {
            FieldVariant::Outlined => (Borders::ALL, None),
            FieldVariant::Filled => (Borders::ALL, Some(t.filled_bg)),
            FieldVariant::Ghost => (Borders::BOTTOM, None),
        };
        let border_color = if self.invalid {
            t.error
        } else if focused && !self.disabled {
            t.accent
        } else if self.variant == FieldVariant::Filled {
            t.filled_bg
        } else {
            t.muted
        };
        FieldStyle {
            borders,
            border_color,
            background,
            padding: self.size.padding(),
            dimmed: self.disabled,
        }
    }

    /// Total rows needed: label, input box and message.
    pub fn height(&self) -> u16 {
        let mut height = self.field_style(false).box_height();
        if !self.label.is_empty() {
            height += 1;
        }
        if self.message() != FieldMessage::None {
            height += 1;
        }
        height
    }

    /// Activate the trailing affordance.
    ///
    /// Clear empties the value and reports it; the visibility toggle flips
    /// without touching the value. Spinner and no affordance do nothing.
    pub fn activate_trailing(&mut self) -> Option<FieldAction> {
        match self.trailing() {
            TrailingAffordance::Clear => {
                debug!(label = %self.label, "Field cleared");
                self.value.clear();
                self.cursor = 0;
                Some(FieldAction::Changed(String::new()))
            }
            TrailingAffordance::VisibilityToggle { .. } => {
                self.show_password = !self.show_password;
                debug!(label = %self.label, visible = self.show_password, "Password visibility toggled");
                Some(FieldAction::VisibilityToggled(self.show_password))
            }
            TrailingAffordance::Spinner | TrailingAffordance::None => None,
        }
    }

    /// Advance the loading animation.
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner.tick();
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn changed(&self) -> Option<FieldAction> {
        Some(FieldAction::Changed(self.value.clone()))
    }

    /// Insert pasted text at the cursor.
    pub fn insert_str(&mut self, text: &str) -> Option<FieldAction> {
        if !self.accepts_input() {
            return None;
        }
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return None;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
        self.changed()
    }

    /// Handle keyboard input.
    ///
    /// Returns an action when the value changed or the trailing affordance
    /// was activated with Ctrl+T.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FieldAction> {
        if key.code == KeyCode::Char('t') && key.modifiers == KeyModifiers::CONTROL {
            return self.activate_trailing();
        }
        if !self.accepts_input() {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                self.changed()
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                self.changed()
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_count() {
                    return None;
                }
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                self.changed()
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                None
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                None
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                None
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return None;
                }
                self.value.clear();
                self.cursor = 0;
                self.changed()
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return None;
                }
                let end = self.byte_offset(self.cursor);
                let before = &self.value[..end];
                let trimmed = before.trim_end_matches(|c: char| !c.is_alphanumeric());
                let start = trimmed
                    .rfind(|c: char| !c.is_alphanumeric())
                    .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
                    .unwrap_or(0);
                self.cursor -= self.value[start..end].chars().count();
                self.value.replace_range(start..end, "");
                self.changed()
            }
            _ => None,
        }
    }

    /// Handle a mouse click on the trailing affordance.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<FieldAction> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let pos = Position::new(mouse.column, mouse.row);
        if self.trailing_area.is_some_and(|r| r.contains(pos)) {
            return self.activate_trailing();
        }
        None
    }

    /// Render the field into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let style = self.field_style(focused);
        let message = match self.message() {
            FieldMessage::Error(text) => Some(Span::styled(text.to_string(), t.error_style())),
            FieldMessage::Helper(text) => Some(Span::styled(text.to_string(), t.muted_style())),
            FieldMessage::None => None,
        };

        let label_height = u16::from(!self.label.is_empty());
        let message_height = u16::from(message.is_some());
        let [label_area, box_area, message_area] = Layout::vertical([
            Constraint::Length(label_height),
            Constraint::Length(style.box_height()),
            Constraint::Length(message_height),
        ])
        .areas(area);

        if label_height > 0 {
            let mut label_style = Style::default().fg(t.fg).add_modifier(Modifier::BOLD);
            if style.dimmed {
                label_style = label_style.add_modifier(Modifier::DIM);
            }
            frame.render_widget(
                Paragraph::new(Span::styled(self.label.clone(), label_style)),
                label_area,
            );
        }

        let block = style.block();
        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);

        let trailing = self.trailing();
        let trailing_text = match trailing {
            TrailingAffordance::Spinner => self.spinner.frame(),
            other => other.label(),
        };
        let trailing_width = trailing_text.chars().count() as u16;
        let [text_area, _, trailing_rect] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(u16::from(trailing_width > 0)),
            Constraint::Length(trailing_width),
        ])
        .areas(inner);

        let mut text_style = Style::default().fg(t.fg);
        if style.dimmed || self.loading {
            text_style = text_style.fg(t.muted).add_modifier(Modifier::DIM);
        }
        let width = usize::from(text_area.width);
        let chars: Vec<char> = self.display_value().chars().collect();
        let cursor = self.cursor.min(chars.len());
        self.scroll = scroll_for_cursor(&chars, cursor, self.scroll, width);
        let line = if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder.clone(), t.muted_style()))
        } else {
            let visible = visible_text(&chars[self.scroll..], width);
            Line::from(Span::styled(visible, text_style))
        };
        frame.render_widget(Paragraph::new(line), text_area);

        self.trailing_area = None;
        if trailing_width > 0 {
            let trailing_style = match trailing {
                TrailingAffordance::Spinner => Style::default().fg(t.accent),
                _ => t.muted_style(),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(trailing_text, trailing_style)),
                trailing_rect,
            );
            self.trailing_area = Some(trailing_rect);
        }

        if let Some(message) = message {
            frame.render_widget(Paragraph::new(message), message_area);
        }

        if focused && self.accepts_input() && width > 0 {
            let offset = chars[self.scroll..cursor]
                .iter()
                .map(|&c| c.width().unwrap_or(0))
                .sum::<usize>();
            if offset < width {
                // offset < width <= u16::MAX
                let cursor_x = text_area.x + offset as u16;
                frame.set_cursor_position(Position::new(cursor_x, text_area.y));
            }
        }
    }
}

/// First character to draw so that the cursor cell fits in `width` columns.
///
/// The window only moves when the cursor would leave it.
fn scroll_for_cursor(chars: &[char], cursor: usize, scroll: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    // Leftmost start that still leaves a free column for the cursor.
    let mut start = cursor;
    let mut used = 0;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w >= width {
            break;
        }
        used += w;
        start -= 1;
    }
    scroll.min(cursor).max(start)
}

/// The prefix of `chars` that fits in `width` columns.
fn visible_text(chars: &[char], width: usize) -> String {
    let mut used = 0;
    chars
        .iter()
        .take_while(|&&c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}
