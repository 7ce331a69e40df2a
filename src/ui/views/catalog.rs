//! Story catalog screen.
//!
//! A searchable list of stories on the left and the selected story's widget,
//! live and interactive, on the right. Picking another story rebuilds the
//! widget from its preset, so edits made in the preview are discarded.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::events::KeyContext;
use crate::sample::User;
use crate::stories::{Story, StoryRegistry, StoryWidget};
use crate::ui::components::{FieldAction, InputField, TableAction};
use crate::ui::theme::theme;

/// Width of the story list column.
const LIST_WIDTH: u16 = 34;

/// Widest a previewed field is drawn.
const FIELD_PREVIEW_WIDTH: u16 = 48;

/// Which part of the catalog has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFocus {
    /// The search box above the list.
    Search,
    /// The story list.
    #[default]
    List,
    /// The live widget.
    Preview,
}

/// The story catalog.
pub struct CatalogView {
    registry: StoryRegistry,
    search: InputField,
    /// Indices into the registry of the stories matching the search.
    visible: Vec<usize>,
    list_state: ListState,
    /// Registry index of the story being previewed.
    current: Option<usize>,
    widget: Option<StoryWidget>,
    focus: CatalogFocus,
    /// Status text from the last widget action.
    status: String,
    search_area: Rect,
    list_area: Rect,
    preview_area: Rect,
}

impl CatalogView {
    /// List every story in `registry` and preview the first.
    pub fn new(registry: StoryRegistry) -> Self {
        let visible = (0..registry.all().len()).collect();
        let mut view = Self {
            registry,
            search: InputField::new()
                .with_placeholder("Search stories")
                .with_helper_text("Matches id, title or component"),
            visible,
            list_state: ListState::default(),
            current: None,
            widget: None,
            focus: CatalogFocus::default(),
            status: String::new(),
            search_area: Rect::default(),
            list_area: Rect::default(),
            preview_area: Rect::default(),
        };
        view.select_visible(0);
        view
    }

    /// The story being previewed.
    pub fn current_story(&self) -> Option<&Story> {
        self.current.and_then(|i| self.registry.all().get(i))
    }

    /// The live widget of the current story.
    #[cfg(test)]
    pub fn widget(&self) -> Option<&StoryWidget> {
        self.widget.as_ref()
    }

    #[cfg(test)]
    pub fn focus(&self) -> CatalogFocus {
        self.focus
    }

    /// Stories currently listed, in display order.
    #[cfg(test)]
    pub fn visible_stories(&self) -> Vec<&Story> {
        self.visible
            .iter()
            .filter_map(|&i| self.registry.all().get(i))
            .collect()
    }

    /// Status text from the last widget action.
    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Open the story with `id`, clearing any search.
    ///
    /// Returns `false` if no story has that id.
    pub fn open(&mut self, id: &str) -> bool {
        let Some(index) = self.registry.position(id) else {
            return false;
        };
        self.search.set_value("");
        self.apply_filter();
        self.select_visible(index);
        self.focus = CatalogFocus::Preview;
        true
    }

    /// Cycle focus: search, list, preview.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CatalogFocus::Search => CatalogFocus::List,
            CatalogFocus::List => CatalogFocus::Preview,
            CatalogFocus::Preview => CatalogFocus::Search,
        };
    }

    /// Cycle focus the other way.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            CatalogFocus::Search => CatalogFocus::Preview,
            CatalogFocus::List => CatalogFocus::Search,
            CatalogFocus::Preview => CatalogFocus::List,
        };
    }

    /// Whether printable keys should go to a field.
    pub fn wants_text_input(&self) -> bool {
        match self.focus {
            CatalogFocus::Search => true,
            CatalogFocus::List => false,
            CatalogFocus::Preview => matches!(self.widget, Some(StoryWidget::Field(_))),
        }
    }

    /// Hints for whatever has focus, including the previewed widget.
    pub fn key_context(&self) -> KeyContext {
        match self.focus {
            CatalogFocus::Search => KeyContext::Field,
            CatalogFocus::List => KeyContext::StoryList,
            CatalogFocus::Preview => match self.widget {
                Some(StoryWidget::Table(_)) => KeyContext::Table,
                _ => KeyContext::Field,
            },
        }
    }

    /// Preview the `position`-th visible story.
    fn select_visible(&mut self, position: usize) {
        let Some(&index) = self.visible.get(position) else {
            self.list_state.select(None);
            self.current = None;
            self.widget = None;
            return;
        };
        self.list_state.select(Some(position));
        if self.current == Some(index) {
            return;
        }
        let story = &self.registry.all()[index];
        debug!(story = story.id, "Opening story");
        self.widget = Some(story.build());
        self.current = Some(index);
        self.status.clear();
    }

    fn apply_filter(&mut self) {
        let matches: Vec<usize> = self
            .registry
            .search(self.search.value())
            .into_iter()
            .filter_map(|story| self.registry.position(story.id))
            .collect();
        self.visible = matches;
        let position = self
            .current
            .and_then(|current| self.visible.iter().position(|&i| i == current))
            .unwrap_or(0);
        self.select_visible(position);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let last = self.visible.len() - 1;
        let next = current.saturating_add_signed(delta).min(last);
        self.select_visible(next);
    }

    fn on_field_action(&mut self, action: FieldAction) {
        self.status = match action {
            FieldAction::Changed(value) => format!("onChange: {} chars", value.chars().count()),
            FieldAction::VisibilityToggled(visible) => format!("visible: {}", visible),
        };
    }

    fn on_table_action(&mut self, action: TableAction<User>) {
        self.status = match action {
            TableAction::SelectionChanged(selection) => {
                format!("onSelectionChange: {} selected", selection.len())
            }
            TableAction::SortChanged(sort) => {
                format!("sorted by {} {}", sort.key, sort.direction.display())
            }
        };
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) {
        match self.focus {
            CatalogFocus::Search => match key.code {
                KeyCode::Down | KeyCode::Enter => self.focus = CatalogFocus::List,
                _ => {
                    if let Some(FieldAction::Changed(_)) = self.search.handle_input(key) {
                        self.apply_filter();
                    }
                }
            },
            CatalogFocus::List => match (key.code, key.modifiers) {
                (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                    self.move_selection(1)
                }
                (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                    self.move_selection(-1)
                }
                (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                    self.select_visible(0)
                }
                (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                    self.select_visible(self.visible.len().saturating_sub(1))
                }
                (KeyCode::Char('/'), KeyModifiers::NONE) => self.focus = CatalogFocus::Search,
                (KeyCode::Enter, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                    self.focus = CatalogFocus::Preview
                }
                _ => {}
            },
            CatalogFocus::Preview => match self.widget.as_mut() {
                Some(StoryWidget::Field(field)) => {
                    if let Some(action) = field.handle_input(key) {
                        self.on_field_action(action);
                    }
                }
                Some(StoryWidget::Table(table)) => {
                    if let Some(action) = table.handle_input(key) {
                        self.on_table_action(action);
                    }
                }
                None => {}
            },
        }
    }

    /// Insert pasted text into the search box or the previewed field.
    pub fn handle_paste(&mut self, text: &str) {
        match self.focus {
            CatalogFocus::Search => {
                if self.search.insert_str(text).is_some() {
                    self.apply_filter();
                }
            }
            CatalogFocus::Preview => {
                if let Some(StoryWidget::Field(field)) = self.widget.as_mut() {
                    if let Some(action) = field.insert_str(text) {
                        self.on_field_action(action);
                    }
                }
            }
            CatalogFocus::List => {}
        }
    }

    /// Focus what was clicked and forward the click.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown if self.list_area.contains(pos) => self.move_selection(1),
            MouseEventKind::ScrollUp if self.list_area.contains(pos) => self.move_selection(-1),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.search_area.contains(pos) {
                    self.focus = CatalogFocus::Search;
                    if let Some(FieldAction::Changed(_)) = self.search.handle_mouse(mouse) {
                        self.apply_filter();
                    }
                } else if self.list_area.contains(pos) {
                    self.focus = CatalogFocus::List;
                    // One row per story inside the list border.
                    let row = pos.y.saturating_sub(self.list_area.y + 1) as usize;
                    let position = self.list_state.offset() + row;
                    if position < self.visible.len() {
                        self.select_visible(position);
                    }
                } else if self.preview_area.contains(pos) {
                    self.focus = CatalogFocus::Preview;
                    self.forward_mouse(mouse);
                }
            }
            _ => {}
        }
    }

    fn forward_mouse(&mut self, mouse: MouseEvent) {
        match self.widget.as_mut() {
            Some(StoryWidget::Field(field)) => {
                if let Some(action) = field.handle_mouse(mouse) {
                    self.on_field_action(action);
                }
            }
            Some(StoryWidget::Table(table)) => {
                if let Some(action) = table.handle_mouse(mouse) {
                    self.on_table_action(action);
                }
            }
            None => {}
        }
    }

    /// Advance spinners in the previewed widget.
    pub fn tick(&mut self) {
        match self.widget.as_mut() {
            Some(StoryWidget::Field(field)) => field.tick(),
            Some(StoryWidget::Table(table)) => table.tick(),
            None => {}
        }
    }

    /// Draw the list on the left and the preview on the right.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Fill(1)])
                .spacing(1)
                .areas(area);
        self.render_list(frame, left);
        self.render_preview(frame, right);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(self.search.height()), Constraint::Fill(1)])
                .areas(area);
        self.search
            .render(frame, search_area, self.focus == CatalogFocus::Search);
        self.search_area = search_area;

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&i| self.registry.all().get(i))
            .map(|story| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<11}", story.component.display()),
                        t.muted_style(),
                    ),
                    Span::raw(story.title),
                ]))
            })
            .collect();

        let border_style = if self.focus == CatalogFocus::List {
            t.focus_style()
        } else {
            t.muted_style()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" Stories ({}) ", self.visible.len())),
            )
            .highlight_style(
                Style::default()
                    .bg(t.selected_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, list_area, &mut self.list_state);
        self.list_area = list_area;
    }

    fn render_preview(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let border_style = if self.focus == CatalogFocus::Preview {
            t.focus_style()
        } else {
            t.muted_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Preview ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.preview_area = inner;

        let Some(story) = self.current.and_then(|i| self.registry.all().get(i)) else {
            frame.render_widget(
                Paragraph::new(Span::styled("No matching stories.", t.muted_style())),
                inner,
            );
            return;
        };

        let [title_area, meta_area, description_area, widget_area, status_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                story.title,
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
            )),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{} · {}", story.component.display(), story.id),
                t.muted_style(),
            )),
            meta_area,
        );
        frame.render_widget(
            Paragraph::new(story.description).wrap(Wrap { trim: true }),
            description_area,
        );

        let focused = self.focus == CatalogFocus::Preview;
        match self.widget.as_mut() {
            Some(StoryWidget::Field(field)) => {
                let area = Rect {
                    width: widget_area.width.min(FIELD_PREVIEW_WIDTH),
                    height: widget_area.height.min(field.height()),
                    ..widget_area
                };
                field.render(frame, area, focused);
            }
            Some(StoryWidget::Table(table)) => table.render(frame, widget_area, focused),
            None => {}
        }

        if !self.status.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(self.status.clone(), t.muted_style())),
                status_area,
            );
        }
    }
}
