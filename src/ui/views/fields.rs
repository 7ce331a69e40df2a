//! Input field showcase screen.
//!
//! Shows the field in each variant, size and state, with a live email field
//! that validates as you type and a submit button that simulates a slow
//! request.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info};

use crate::events::KeyContext;
use crate::ui::components::{FieldAction, FieldSize, FieldVariant, InputField};
use crate::ui::theme::theme;

/// Index of the email field.
const EMAIL: usize = 0;

/// Index of the password field.
const PASSWORD: usize = 1;

/// Number of fields on the screen; the submit button comes after them.
const FIELD_COUNT: usize = 7;

/// Fields per grid row.
const GRID_COLUMNS: usize = 3;

/// Error text shown while the email lacks an `@`.
pub const INVALID_EMAIL_TEXT: &str = "Invalid email format";

/// The input field showcase.
pub struct FieldsView {
    fields: Vec<InputField>,
    /// Focused item: a field index, or `FIELD_COUNT` for the submit button.
    focus: usize,
    /// Ticks left on the simulated request, if one is running.
    submitting: Option<u32>,
    /// Ticks a simulated request takes.
    submit_ticks: u32,
    /// Areas of the fields and the button from the last render.
    areas: Vec<Rect>,
}

impl FieldsView {
    /// Create the screen. `submit_ticks` is the simulated request length.
    pub fn new(submit_ticks: u32, mask_char: char) -> Self {
        let fields = vec![
            InputField::new()
                .with_label("Outlined Email")
                .with_placeholder("Enter email"),
            InputField::password()
                .with_label("Filled Password")
                .with_variant(FieldVariant::Filled)
                .with_mask_char(mask_char),
            InputField::new()
                .with_label("Ghost Input")
                .with_variant(FieldVariant::Ghost)
                .with_placeholder("Enter something here"),
            InputField::new()
                .with_label("Disabled Input")
                .with_disabled(true)
                .with_value("Can't type here"),
            InputField::new()
                .with_label("Small Size")
                .with_size(FieldSize::Small)
                .with_placeholder("Small input"),
            InputField::new()
                .with_label("Large Size")
                .with_size(FieldSize::Large)
                .with_placeholder("Large input"),
            InputField::new()
                .with_label("Loading State")
                .with_loading(true)
                .with_disabled(true)
                .with_value("Submitting..."),
        ];
        Self {
            fields,
            focus: EMAIL,
            submitting: None,
            submit_ticks,
            areas: Vec::new(),
        }
    }

    /// Get a field by index.
    #[cfg(test)]
    pub fn field(&self, index: usize) -> Option<&InputField> {
        self.fields.get(index)
    }

    /// The focused field, if focus is not on the button.
    fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        self.fields.get_mut(self.focus)
    }

    /// Whether the simulated request is running.
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    /// Index of the focused item.
    #[cfg(test)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Move focus forward, wrapping after the submit button.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (FIELD_COUNT + 1);
    }

    /// Move focus backward.
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELD_COUNT) % (FIELD_COUNT + 1);
    }

    /// Whether printable keys should go to a field.
    pub fn wants_text_input(&self) -> bool {
        self.focus < FIELD_COUNT
    }

    /// Hints for the footer.
    pub fn key_context(&self) -> KeyContext {
        KeyContext::Field
    }

    /// Start the simulated request unless one is already running.
    ///
    /// The email and password fields show their spinners until it finishes.
    pub fn submit(&mut self) {
        if self.submitting.is_some() {
            return;
        }
        debug!(ticks = self.submit_ticks, "Submit started");
        self.submitting = Some(self.submit_ticks);
        self.set_credentials_loading(true);
    }

    fn set_credentials_loading(&mut self, loading: bool) {
        self.fields[EMAIL].set_loading(loading);
        self.fields[PASSWORD].set_loading(loading);
    }

    fn on_field_action(&mut self, index: usize, action: FieldAction) {
        if let (EMAIL, FieldAction::Changed(value)) = (index, &action) {
            let invalid = !value.contains('@');
            let email = &mut self.fields[EMAIL];
            email.set_invalid(invalid);
            email.set_error_text(if invalid { INVALID_EMAIL_TEXT } else { "" });
        }
        if let FieldAction::VisibilityToggled(visible) = action {
            debug!(field = index, visible, "Visibility toggled");
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter && key.modifiers == KeyModifiers::NONE {
            if self.focus == FIELD_COUNT || self.focus == PASSWORD {
                self.submit();
            }
            return;
        }
        let index = self.focus;
        let action = self.focused_field_mut().and_then(|f| f.handle_input(key));
        if let Some(action) = action {
            self.on_field_action(index, action);
        }
    }

    /// Insert pasted text into the focused field.
    pub fn handle_paste(&mut self, text: &str) {
        let index = self.focus;
        let action = self.focused_field_mut().and_then(|f| f.insert_str(text));
        if let Some(action) = action {
            self.on_field_action(index, action);
        }
    }

    /// Handle a mouse event: focus what was clicked and forward the click.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let Some(index) = self.areas.iter().position(|a| a.contains(pos)) else {
            return;
        };
        self.focus = index;
        if index == FIELD_COUNT {
            self.submit();
        } else if let Some(action) = self.fields[index].handle_mouse(mouse) {
            self.on_field_action(index, action);
        }
    }

    /// Advance animations and the simulated request.
    pub fn tick(&mut self) {
        for field in &mut self.fields {
            field.tick();
        }
        if let Some(remaining) = self.submitting {
            if remaining <= 1 {
                self.submitting = None;
                self.set_credentials_loading(false);
                info!(
                    email = %self.fields[EMAIL].value(),
                    password_len = self.fields[PASSWORD].value().chars().count(),
                    "Submit attempt"
                );
            } else {
                self.submitting = Some(remaining - 1);
            }
        }
    }

    /// Render the screen.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let row_heights: Vec<u16> = self
            .fields
            .chunks(GRID_COLUMNS)
            .map(|row| row.iter().map(InputField::height).max().unwrap_or(0))
            .collect();

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(row_heights.iter().map(|&h| Constraint::Length(h + 1)));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(area);

        let heading = Paragraph::new(Span::styled(
            "InputField Component",
            Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(heading, rows[0]);

        self.areas.clear();
        for (row_index, chunk_start) in (0..FIELD_COUNT).step_by(GRID_COLUMNS).enumerate() {
            let cells = Layout::horizontal([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .spacing(2)
                .split(rows[row_index + 1]);
            for (offset, cell) in cells.iter().enumerate() {
                let index = chunk_start + offset;
                let Some(field) = self.fields.get_mut(index) else {
                    break;
                };
                let cell = Rect {
                    height: field.height().min(cell.height),
                    ..*cell
                };
                field.render(frame, cell, self.focus == index);
                self.areas.push(cell);
            }
        }

        let button_row = rows[row_heights.len() + 1];
        let [button_area, _] =
            Layout::horizontal([Constraint::Length(16), Constraint::Fill(1)]).areas(button_row);
        let label = if self.is_submitting() {
            "Submitting..."
        } else {
            "Submit"
        };
        let border_style = if self.focus == FIELD_COUNT {
            t.focus_style()
        } else {
            t.muted_style()
        };
        let mut label_style = Style::default().fg(t.accent).add_modifier(Modifier::BOLD);
        if self.is_submitting() {
            label_style = t.muted_style().add_modifier(Modifier::DIM);
        }
        let button = Paragraph::new(Span::styled(label, label_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        frame.render_widget(button, button_area);
        self.areas.push(button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut FieldsView, text: &str) {
        for c in text.chars() {
            view.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_email_validation_while_typing() {
        let mut view = FieldsView::new(3, '•');
        assert!(!view.field(EMAIL).unwrap().is_invalid());

        type_text(&mut view, "bob");
        let email = view.field(EMAIL).unwrap();
        assert!(email.is_invalid());
        assert_eq!(
            email.message(),
            crate::ui::components::FieldMessage::Error(INVALID_EMAIL_TEXT)
        );

        type_text(&mut view, "@x.io");
        assert!(!view.field(EMAIL).unwrap().is_invalid());
    }

    #[test]
    fn test_clear_email_marks_invalid() {
        let mut view = FieldsView::new(3, '•');
        type_text(&mut view, "a@b");
        view.handle_input(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        let email = view.field(EMAIL).unwrap();
        assert!(email.is_empty());
        assert!(email.is_invalid());
    }

    #[test]
    fn test_focus_wraps() {
        let mut view = FieldsView::new(3, '•');
        view.focus_prev();
        assert_eq!(view.focus(), FIELD_COUNT);
        assert!(!view.wants_text_input());
        view.focus_next();
        assert_eq!(view.focus(), EMAIL);
    }

    #[test]
    fn test_disabled_field_ignores_typing() {
        let mut view = FieldsView::new(3, '•');
        for _ in 0..3 {
            view.focus_next();
        }
        type_text(&mut view, "zz");
        assert_eq!(view.field(3).unwrap().value(), "Can't type here");
    }

    #[test]
    fn test_submit_runs_for_configured_ticks() {
        let mut view = FieldsView::new(2, '•');
        view.focus_next();
        type_text(&mut view, "pw");
        view.handle_input(key(KeyCode::Enter));
        assert!(view.is_submitting());
        assert!(view.field(EMAIL).unwrap().is_loading());
        assert!(view.field(PASSWORD).unwrap().is_loading());

        type_text(&mut view, "x");
        assert_eq!(view.field(PASSWORD).unwrap().value(), "pw");

        view.tick();
        assert!(view.is_submitting());
        view.tick();
        assert!(!view.is_submitting());
        assert!(!view.field(PASSWORD).unwrap().is_loading());
    }

    #[test]
    fn test_render_lists_every_field() {
        use ratatui::{backend::TestBackend, Terminal};

        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = FieldsView::new(2, '•');
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Outlined Email"));
        assert!(text.contains("Loading State"));
        assert!(text.contains("Submit"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut view = FieldsView::new(2, '*');
        view.focus_next();
        type_text(&mut view, "pw");
        let password = view.field(PASSWORD).unwrap();
        assert_eq!(password.display_value(), "**");
        assert_eq!(password.value(), "pw");
    }
}
