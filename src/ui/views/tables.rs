//! Data table showcase screen.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info};

use crate::events::KeyContext;
use crate::sample::{showcase_columns, showcase_users, user_columns, User};
use crate::ui::components::{DataTable, TableAction};
use crate::ui::theme::theme;

/// Which interactive table has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFocus {
    #[default]
    Sortable,
    Selectable,
}

/// The data table showcase: sorting, selection, loading and empty states.
pub struct TablesView {
    sortable: DataTable<User>,
    selectable: DataTable<User>,
    loading: DataTable<User>,
    empty: DataTable<User>,
    focus: TableFocus,
    /// Names of the selected users, in selection order.
    selected_names: Vec<String>,
    sortable_area: Rect,
    selectable_area: Rect,
}

impl TablesView {
    /// Build the four demo tables over the sample users.
    pub fn new() -> Self {
        Self {
            sortable: DataTable::new(showcase_users(), showcase_columns()),
            selectable: DataTable::new(showcase_users(), user_columns()).with_selectable(true),
            loading: DataTable::new(Vec::<User>::new(), user_columns()).with_loading(true),
            empty: DataTable::new(Vec::<User>::new(), user_columns()),
            focus: TableFocus::default(),
            selected_names: Vec::new(),
            sortable_area: Rect::default(),
            selectable_area: Rect::default(),
        }
    }

    #[cfg(test)]
    pub fn focus(&self) -> TableFocus {
        self.focus
    }

    /// Switch focus between the two interactive tables.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            TableFocus::Sortable => TableFocus::Selectable,
            TableFocus::Selectable => TableFocus::Sortable,
        };
    }

    /// Both interactive tables take the same keys.
    pub fn key_context(&self) -> KeyContext {
        KeyContext::Table
    }

    /// Names shown under the selection table.
    pub fn selected_names(&self) -> &[String] {
        &self.selected_names
    }

    #[cfg(test)]
    pub fn sortable(&self) -> &DataTable<User> {
        &self.sortable
    }

    #[cfg(test)]
    pub fn selectable(&self) -> &DataTable<User> {
        &self.selectable
    }

    fn focused_table_mut(&mut self) -> &mut DataTable<User> {
        match self.focus {
            TableFocus::Sortable => &mut self.sortable,
            TableFocus::Selectable => &mut self.selectable,
        }
    }

    fn on_action(&mut self, action: TableAction<User>) {
        match action {
            TableAction::SelectionChanged(selection) => {
                self.selected_names = selection.iter().map(|u| u.name.clone()).collect();
                info!(count = selection.len(), names = ?self.selected_names, "Selection changed");
            }
            TableAction::SortChanged(sort) => {
                debug!(key = %sort.key, direction = sort.direction.display(), "Sort changed");
            }
        }
    }

    /// Handle keyboard input for the focused table.
    pub fn handle_input(&mut self, key: KeyEvent) {
        if let Some(action) = self.focused_table_mut().handle_input(key) {
            self.on_action(action);
        }
    }

    /// Focus the clicked table and forward the event to it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pos = Position::new(mouse.column, mouse.row);
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if self.sortable_area.contains(pos) {
                self.focus = TableFocus::Sortable;
            } else if self.selectable_area.contains(pos) {
                self.focus = TableFocus::Selectable;
            }
        }
        if let Some(action) = self.focused_table_mut().handle_mouse(mouse) {
            self.on_action(action);
        }
    }

    /// Advance the loading table's spinner.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Draw the interactive tables on top and the placeholder states below.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [heading, top, bottom] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "DataTable Component",
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
            )),
            heading,
        );

        let [sortable_cell, selectable_cell] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(2)
                .areas(top);
        let [loading_cell, empty_cell] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(2)
                .areas(bottom);

        self.sortable_area = render_titled(frame, sortable_cell, "Sortable Table");
        self.sortable
            .render(frame, self.sortable_area, self.focus == TableFocus::Sortable);

        let [table_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(selectable_cell);
        self.selectable_area = render_titled(frame, table_area, "Table with Row Selection");
        self.selectable.render(
            frame,
            self.selectable_area,
            self.focus == TableFocus::Selectable,
        );
        let summary = if self.selected_names.is_empty() {
            "Selected: none".to_string()
        } else {
            format!("Selected: {}", self.selected_names.join(", "))
        };
        frame.render_widget(
            Paragraph::new(Span::styled(summary, t.muted_style())),
            summary_area,
        );

        let area = render_titled(frame, loading_cell, "Loading State");
        self.loading.render(frame, area, false);
        let area = render_titled(frame, empty_cell, "Empty State");
        self.empty.render(frame, area, false);
    }
}

impl Default for TablesView {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a section title and return the area under it.
fn render_titled(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let [title_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            theme().header_style(),
        ))),
        title_area,
    );
    body
}
