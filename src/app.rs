//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::config::{Settings, StartScreen};
use crate::events::{Event, KeyContext};
use crate::stories::StoryRegistry;
use crate::ui::{render_context_help, theme, CatalogView, FieldsView, TablesView};

/// The screen being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Input field variants, sizes and states.
    #[default]
    Fields,
    /// Data table sorting, selection, loading and empty states.
    Tables,
    /// One story at a time, picked from a list.
    Catalog,
}

impl Screen {
    /// All screens in tab order.
    pub const ALL: [Screen; 3] = [Screen::Fields, Screen::Tables, Screen::Catalog];

    /// Tab label.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Fields => "Input Field",
            Screen::Tables => "Data Table",
            Screen::Catalog => "Stories",
        }
    }

    /// The screen after this one, wrapping around.
    pub fn next(&self) -> Screen {
        match self {
            Screen::Fields => Screen::Tables,
            Screen::Tables => Screen::Catalog,
            Screen::Catalog => Screen::Fields,
        }
    }
}

impl From<StartScreen> for Screen {
    fn from(start: StartScreen) -> Self {
        match start {
            StartScreen::Showcase => Screen::Fields,
            StartScreen::Catalog => Screen::Catalog,
        }
    }
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current screen.
    screen: Screen,
    /// Whether the application should quit.
    should_quit: bool,
    fields: FieldsView,
    tables: TablesView,
    catalog: CatalogView,
    /// Header tab regions from the last render.
    tab_areas: Vec<(Rect, Screen)>,
}

impl App {
    /// Create the application.
    ///
    /// With `initial_story`, the catalog opens at that story; an unknown id
    /// is logged and the configured start screen is used instead.
    pub fn new(settings: &Settings, initial_story: Option<&str>) -> Self {
        debug!("Creating new application instance");

        let mut catalog = CatalogView::new(StoryRegistry::new());
        let mut screen = Screen::from(settings.start_screen);
        if let Some(id) = initial_story {
            if catalog.open(id) {
                screen = Screen::Catalog;
            } else {
                warn!(story = id, "Unknown story, ignoring");
            }
        }

        Self {
            screen,
            should_quit: false,
            fields: FieldsView::new(settings.sign_in_ticks, settings.mask_char),
            tables: TablesView::new(),
            catalog,
            tab_areas: Vec::new(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[cfg(test)]
    pub fn fields(&self) -> &FieldsView {
        &self.fields
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    /// Switch to `screen`.
    pub fn show(&mut self, screen: Screen) {
        if self.screen != screen {
            debug!(from = ?self.screen, to = ?screen, "Switching screen");
            self.screen = screen;
        }
    }

    /// Whether printable keys go to a text field on the current screen.
    fn wants_text_input(&self) -> bool {
        match self.screen {
            Screen::Fields => self.fields.wants_text_input(),
            Screen::Tables => false,
            Screen::Catalog => self.catalog.wants_text_input(),
        }
    }

    fn key_context(&self) -> KeyContext {
        match self.screen {
            Screen::Fields => self.fields.key_context(),
            Screen::Tables => self.tables.key_context(),
            Screen::Catalog => self.catalog.key_context(),
        }
    }

    fn status(&self) -> String {
        match self.screen {
            Screen::Fields if self.fields.is_submitting() => "Submitting...".to_string(),
            Screen::Fields => String::new(),
            Screen::Tables => format!("{} selected", self.tables.selected_names().len()),
            Screen::Catalog => self
                .catalog
                .current_story()
                .map(|s| s.id.to_string())
                .unwrap_or_default(),
        }
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    /// All state changes flow through this method for predictable behavior.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Paste(text) => match self.screen {
                Screen::Fields => self.fields.handle_paste(&text),
                Screen::Tables => {}
                Screen::Catalog => self.catalog.handle_paste(&text),
            },
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                info!("Ctrl+C pressed, quitting");
                self.should_quit = true;
                return;
            }
            (KeyCode::F(2), _) => {
                self.show(self.screen.next());
                return;
            }
            (KeyCode::Tab, _) => {
                self.focus_next();
                return;
            }
            (KeyCode::BackTab, _) => {
                self.focus_prev();
                return;
            }
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _)
                if !self.wants_text_input() =>
            {
                info!("Quit requested");
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Fields => self.fields.handle_input(key),
            Screen::Tables => self.tables.handle_input(key),
            Screen::Catalog => self.catalog.handle_input(key),
        }
    }

    fn focus_next(&mut self) {
        match self.screen {
            Screen::Fields => self.fields.focus_next(),
            Screen::Tables => self.tables.focus_next(),
            Screen::Catalog => self.catalog.focus_next(),
        }
    }

    fn focus_prev(&mut self) {
        match self.screen {
            Screen::Fields => self.fields.focus_prev(),
            // Two tables: forward and back are the same.
            Screen::Tables => self.tables.focus_next(),
            Screen::Catalog => self.catalog.focus_prev(),
        }
    }

    /// Handle mouse input: header tabs switch screens, the rest goes to the
    /// current screen.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            let pos = Position::new(mouse.column, mouse.row);
            if let Some(&(_, screen)) = self.tab_areas.iter().find(|(r, _)| r.contains(pos)) {
                self.show(screen);
                return;
            }
        }
        match self.screen {
            Screen::Fields => self.fields.handle_mouse(mouse),
            Screen::Tables => self.tables.handle_mouse(mouse),
            Screen::Catalog => self.catalog.handle_mouse(mouse),
        }
    }

    /// Handle periodic tick events.
    ///
    /// Every screen ticks so a sign-in keeps counting down off screen.
    fn handle_tick(&mut self) {
        self.fields.tick();
        self.tables.tick();
        self.catalog.tick();
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);

        let content = Rect {
            x: content.x + 1,
            width: content.width.saturating_sub(2),
            ..content
        };
        match self.screen {
            Screen::Fields => self.fields.render(frame, content),
            Screen::Tables => self.tables.render(frame, content),
            Screen::Catalog => self.catalog.render(frame, content),
        }

        render_context_help(frame, footer, self.key_context(), &self.status());
    }

    /// Render the title and the screen tabs.
    fn render_header(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(t.muted_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title = " TUI Showcase ";
        let mut spans = vec![Span::styled(
            title,
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )];
        let mut x = inner.x + title.len() as u16;
        self.tab_areas.clear();
        for screen in Screen::ALL {
            let label = format!(" {} ", screen.title());
            let width = label.chars().count() as u16;
            let style = if screen == self.screen {
                Style::default()
                    .fg(t.fg)
                    .bg(t.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                t.muted_style()
            };
            self.tab_areas
                .push((Rect::new(x, inner.y, width, 1).intersection(inner), screen));
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width + 1);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Settings::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::ui::CatalogFocus;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.view(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.screen(), Screen::Fields);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_start_screen_from_settings() {
        let settings = Settings {
            start_screen: StartScreen::Catalog,
            ..Settings::default()
        };
        let app = App::new(&settings, None);
        assert_eq!(app.screen(), Screen::Catalog);
    }

    #[test]
    fn test_initial_story_opens_catalog() {
        let app = App::new(&Settings::default(), Some("data-table/loading-state"));
        assert_eq!(app.screen(), Screen::Catalog);
        assert_eq!(
            app.catalog().current_story().unwrap().id,
            "data-table/loading-state"
        );
        assert_eq!(app.catalog().focus(), CatalogFocus::Preview);
    }

    #[test]
    fn test_unknown_story_is_ignored() {
        let app = App::new(&Settings::default(), Some("nope"));
        assert_eq!(app.screen(), Screen::Fields);
    }

    #[test]
    fn test_f2_cycles_screens() {
        let mut app = App::default();
        app.update(key(KeyCode::F(2)));
        assert_eq!(app.screen(), Screen::Tables);
        app.update(key(KeyCode::F(2)));
        assert_eq!(app.screen(), Screen::Catalog);
        app.update(key(KeyCode::F(2)));
        assert_eq!(app.screen(), Screen::Fields);
    }

    #[test]
    fn test_q_types_into_focused_field() {
        let mut app = App::default();
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.fields().field(0).unwrap().value(), "q");
    }

    #[test]
    fn test_q_quits_on_tables() {
        let mut app = App::default();
        app.show(Screen::Tables);
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_esc_quits_from_catalog_list() {
        let settings = Settings {
            start_screen: StartScreen::Catalog,
            ..Settings::default()
        };
        let mut app = App::new(&settings, None);
        app.update(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut app = App::default();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_tab_moves_focus() {
        let mut app = App::default();
        app.update(key(KeyCode::Tab));
        assert_eq!(app.fields().focus(), 1);
        app.update(Event::Key(KeyEvent {
            code: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }));
        assert_eq!(app.fields().focus(), 0);
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = App::default();
        app.update(Event::Paste("me@example.com".to_string()));
        let email = app.fields().field(0).unwrap();
        assert_eq!(email.value(), "me@example.com");
        assert!(!email.is_invalid());
    }

    #[test]
    fn test_sign_in_survives_screen_switch() {
        let settings = Settings {
            sign_in_ticks: 2,
            ..Settings::default()
        };
        let mut app = App::new(&settings, None);
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Enter));
        assert!(app.fields().is_submitting());

        app.update(key(KeyCode::F(2)));
        app.update(Event::Tick);
        app.update(Event::Tick);
        assert!(!app.fields().is_submitting());
    }

    #[test]
    fn test_view_renders_header_and_footer() {
        let mut app = App::default();
        let text = draw(&mut app);
        assert!(text.contains("TUI Showcase"));
        assert!(text.contains("Input Field"));
        assert!(text.contains("[Tab]"));
    }

    #[test]
    fn test_click_on_tab_switches_screen() {
        let mut app = App::default();
        draw(&mut app);
        let (area, screen) = app.tab_areas[2];
        assert_eq!(screen, Screen::Catalog);
        app.update(click(area.x + 1, area.y));
        assert_eq!(app.screen(), Screen::Catalog);
    }

    #[test]
    fn test_tables_status_counts_selection() {
        let mut app = App::default();
        app.show(Screen::Tables);
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Char('a')));
        assert_eq!(app.status(), "5 selected");
    }
}
