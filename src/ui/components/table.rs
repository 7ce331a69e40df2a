//! Sortable, selectable data table.
//!
//! The table renders a collection of records with:
//! - Column headers that cycle the sort ascending/descending when activated
//! - Optional multi-row selection with a select-all header checkbox
//! - Dedicated loading and empty placeholders in place of the table body
//!
//! ## Selection identity
//!
//! Records are held as `Rc<R>`. Selection membership is decided with
//! `Rc::ptr_eq`, so two records with identical contents are still distinct
//! rows. The selection is never matched against display position, which makes
//! it independent of the active sort.
//!
//! ## Notifications
//!
//! Operations that change the selection or the sort return a [`TableAction`].
//! Selection changes always carry the complete new selection, once per
//! user action.

use std::fmt;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::{debug, trace};

use super::loading::Spinner;
use super::record::{compare_field_values, Record, SortDirection};
use crate::ui::theme::theme;

/// Width of the checkbox column when selection is enabled.
const CHECKBOX_WIDTH: u16 = 3;

/// Spacing between columns, shared by the table widget and hit testing.
const COLUMN_SPACING: u16 = 1;

/// Placeholder text while loading.
pub const LOADING_TEXT: &str = "Loading...";

/// Placeholder text for an empty collection.
pub const EMPTY_TEXT: &str = "No data to display.";

/// A caller-supplied cell renderer.
pub type CellRenderer<R> = Rc<dyn Fn(&R) -> Line<'static>>;

/// Describes how one record field is displayed.
pub struct Column<R> {
    /// Field key passed to [`Record::field`].
    pub key: String,
    /// Header label.
    pub header: String,
    /// Optional custom cell renderer.
    pub render: Option<CellRenderer<R>>,
    /// Whether activating the header sorts by this column.
    pub sortable: bool,
}

impl<R> Column<R> {
    /// Create a non-sortable column that displays the field as text.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: None,
            sortable: false,
        }
    }

    /// Mark this column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Use a custom renderer for this column's cells.
    pub fn with_render(mut self, render: impl Fn(&R) -> Line<'static> + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            render: self.render.clone(),
            sortable: self.sortable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("render", &self.render.is_some())
            .field("sortable", &self.sortable)
            .finish()
    }
}

/// The active sort: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// Field key being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Create a sort directive.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Compute the sort directive after activating the header for `key`.
///
/// Only an ascending sort on the same key flips to descending. Anything else
/// (another key, no sort yet, or a descending sort) starts over ascending.
pub fn next_sort(current: Option<&SortDirective>, key: &str) -> SortDirective {
    let direction = match current {
        Some(directive)
            if directive.key == key && directive.direction == SortDirection::Ascending =>
        {
            SortDirection::Descending
        }
        _ => SortDirection::Ascending,
    };
    SortDirective::new(key, direction)
}

/// Indices of `records` in display order for `directive`.
///
/// The sort is stable, so rows that compare equal keep their original
/// relative order.
fn sorted_order<R: Record>(records: &[Rc<R>], directive: Option<&SortDirective>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    if let Some(directive) = directive {
        order.sort_by(|&a, &b| {
            compare_field_values(
                &records[a].field(&directive.key),
                &records[b].field(&directive.key),
                directive.direction,
            )
        });
    }
    order
}

/// Which of the mutually exclusive table renderings applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableViewState {
    /// Loading placeholder; the body is suppressed.
    Loading,
    /// Empty placeholder.
    Empty,
    /// The table itself.
    Content,
}

/// Notifications returned from table operations.
#[derive(Debug, Clone)]
pub enum TableAction<R> {
    /// The selection changed. Carries the full new selection.
    SelectionChanged(Vec<Rc<R>>),
    /// A header was activated and the sort changed.
    SortChanged(SortDirective),
}

/// Screen regions recorded during the last render, used for mouse hits.
#[derive(Debug, Default)]
struct HitAreas {
    select_all: Option<Rect>,
    headers: Vec<(Rect, usize)>,
    rows: Vec<(Rect, usize)>,
    checkboxes: Vec<(Rect, usize)>,
}

/// A sortable, selectable table over records of type `R`.
pub struct DataTable<R> {
    /// Source records in caller order.
    records: Vec<Rc<R>>,
    /// Column descriptors.
    columns: Vec<Column<R>>,
    /// Whether to show the loading placeholder.
    loading: bool,
    /// Whether row selection is enabled.
    selectable: bool,
    /// The active sort, if any.
    sort: Option<SortDirective>,
    /// Selected records in selection order.
    selection: Vec<Rc<R>>,
    /// Display order as indices into `records`.
    order: Vec<usize>,
    /// Row cursor (display position).
    state: TableState,
    /// Header cursor (column index).
    column_cursor: usize,
    /// Loading animation.
    spinner: Spinner,
    /// Hit regions from the last render.
    hit: HitAreas,
}

impl<R: Record> DataTable<R> {
    /// Create a table over `records` with the given columns.
    pub fn new<I>(records: I, columns: Vec<Column<R>>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rc<R>>,
    {
        let mut table = Self {
            records: Vec::new(),
            columns,
            loading: false,
            selectable: false,
            sort: None,
            selection: Vec::new(),
            order: Vec::new(),
            state: TableState::default(),
            column_cursor: 0,
            spinner: Spinner::new(),
            hit: HitAreas::default(),
        };
        table.set_records(records);
        table
    }

    /// Enable or disable row selection.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Start in the loading state.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Replace the record collection.
    ///
    /// The active sort is reapplied. The selection is left as it is; callers
    /// that want it cleared call [`DataTable::set_all_selected`] with `false`.
    pub fn set_records<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: Into<Rc<R>>,
    {
        self.records = records.into_iter().map(Into::into).collect();
        self.resort();
        let selected = match self.state.selected() {
            _ if self.records.is_empty() => None,
            Some(i) => Some(i.min(self.records.len() - 1)),
            None => Some(0),
        };
        self.state.select(selected);
        debug!(rows = self.records.len(), "Table records set");
    }

    /// Which rendering applies: loading, then empty, then the table.
    pub fn view_state(&self) -> TableViewState {
        if self.loading {
            TableViewState::Loading
        } else if self.records.is_empty() {
            TableViewState::Empty
        } else {
            TableViewState::Content
        }
    }

    /// Records in display order.
    pub fn sorted_records(&self) -> Vec<Rc<R>> {
        self.order
            .iter()
            .map(|&i| Rc::clone(&self.records[i]))
            .collect()
    }

    /// The record under the row cursor.
    pub fn record_at_cursor(&self) -> Option<&Rc<R>> {
        let position = self.state.selected()?;
        self.order.get(position).map(|&i| &self.records[i])
    }

    /// Activate the header for `key`.
    ///
    /// Returns `None` when no sortable column has that key.
    pub fn sort_by_column(&mut self, key: &str) -> Option<TableAction<R>> {
        if !self.columns.iter().any(|c| c.sortable && c.key == key) {
            trace!(key, "Ignoring sort on non-sortable column");
            return None;
        }
        let directive = next_sort(self.sort.as_ref(), key);
        debug!(key, direction = directive.direction.display(), "Sort changed");
        self.sort = Some(directive.clone());
        self.resort();
        Some(TableAction::SortChanged(directive))
    }

    fn resort(&mut self) {
        self.order = sorted_order(&self.records, self.sort.as_ref());
    }

    /// Whether `record` is selected, by identity.
    pub fn is_selected(&self, record: &Rc<R>) -> bool {
        self.selection.iter().any(|r| Rc::ptr_eq(r, record))
    }

    /// True when every record is selected and there is at least one.
    pub fn all_selected(&self) -> bool {
        !self.records.is_empty() && self.selection.len() == self.records.len()
    }

    /// Toggle `record`: remove it if selected, otherwise append it.
    ///
    /// Returns `None` when selection is disabled.
    pub fn toggle_row(&mut self, record: &Rc<R>) -> Option<TableAction<R>> {
        if !self.selectable {
            return None;
        }
        if let Some(pos) = self.selection.iter().position(|r| Rc::ptr_eq(r, record)) {
            self.selection.remove(pos);
        } else {
            self.selection.push(Rc::clone(record));
        }
        debug!(selected = self.selection.len(), "Row selection toggled");
        Some(self.selection_changed())
    }

    /// Select every record (in caller order) or clear the selection.
    ///
    /// Returns `None` when selection is disabled.
    pub fn set_all_selected(&mut self, selected: bool) -> Option<TableAction<R>> {
        if !self.selectable {
            return None;
        }
        self.selection = if selected {
            self.records.clone()
        } else {
            Vec::new()
        };
        debug!(selected = self.selection.len(), "Select-all toggled");
        Some(self.selection_changed())
    }

    /// Flip the header checkbox.
    pub fn toggle_all(&mut self) -> Option<TableAction<R>> {
        self.set_all_selected(!self.all_selected())
    }

    fn selection_changed(&self) -> TableAction<R> {
        TableAction::SelectionChanged(self.selection.clone())
    }

    /// Content for one cell.
    pub fn cell_content(column: &Column<R>, record: &R) -> Line<'static> {
        match &column.render {
            Some(render) => render(record),
            None => Line::from(record.field(&column.key).to_string()),
        }
    }

    /// Advance the loading animation.
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner.tick();
        }
    }

    /// Move the row cursor down.
    pub fn move_down(&mut self) {
        if let Some(i) = self.state.selected() {
            if i + 1 < self.order.len() {
                self.state.select(Some(i + 1));
            }
        }
    }

    /// Move the row cursor up.
    pub fn move_up(&mut self) {
        if let Some(i) = self.state.selected() {
            self.state.select(Some(i.saturating_sub(1)));
        }
    }

    /// Move the header cursor left.
    pub fn move_left(&mut self) {
        self.column_cursor = self.column_cursor.saturating_sub(1);
    }

    /// Move the header cursor right.
    pub fn move_right(&mut self) {
        if self.column_cursor + 1 < self.columns.len() {
            self.column_cursor += 1;
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns an action when the sort or the selection changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableAction<R>> {
        if self.view_state() != TableViewState::Content {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.move_left();
                None
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                self.move_right();
                None
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
                let key = self.columns.get(self.column_cursor)?.key.clone();
                self.sort_by_column(&key)
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                let index = c as usize - '1' as usize;
                let key = self.columns.get(index)?.key.clone();
                self.column_cursor = index;
                self.sort_by_column(&key)
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                let record = Rc::clone(self.record_at_cursor()?);
                self.toggle_row(&record)
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => self.toggle_all(),
            _ => None,
        }
    }

    /// Handle a mouse event against the regions of the last render.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<TableAction<R>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || self.view_state() != TableViewState::Content
        {
            return None;
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.hit.select_all.is_some_and(|r| r.contains(pos)) {
            return self.toggle_all();
        }
        if let Some(&(_, index)) = self.hit.headers.iter().find(|(r, _)| r.contains(pos)) {
            self.column_cursor = index;
            let key = self.columns.get(index)?.key.clone();
            return self.sort_by_column(&key);
        }
        if let Some(&(_, position)) = self.hit.checkboxes.iter().find(|(r, _)| r.contains(pos)) {
            self.state.select(Some(position));
            let record = Rc::clone(self.record_at_cursor()?);
            return self.toggle_row(&record);
        }
        if let Some(&(_, position)) = self.hit.rows.iter().find(|(r, _)| r.contains(pos)) {
            self.state.select(Some(position));
        }
        None
    }

    fn column_widths(&self) -> Vec<Constraint> {
        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        if self.selectable {
            widths.push(Constraint::Length(CHECKBOX_WIDTH));
        }
        widths.extend(self.columns.iter().map(|_| Constraint::Fill(1)));
        widths
    }

    fn header_label(&self, index: usize, column: &Column<R>, focused: bool) -> Line<'static> {
        let t = theme();
        let mut label_style = Style::default();
        if focused && index == self.column_cursor {
            label_style = label_style.fg(t.accent).add_modifier(Modifier::UNDERLINED);
        }
        let mut spans = vec![Span::styled(column.header.to_uppercase(), label_style)];
        if column.sortable {
            match &self.sort {
                Some(directive) if directive.key == column.key => {
                    spans.push(Span::styled(
                        format!(" {}", directive.direction.indicator()),
                        Style::default().fg(t.accent),
                    ));
                }
                _ => spans.push(Span::styled(
                    format!(" {}", SortDirection::Descending.indicator()),
                    t.muted_style().add_modifier(Modifier::DIM),
                )),
            }
        }
        Line::from(spans)
    }

    fn checkbox(checked: bool) -> &'static str {
        if checked {
            "[x]"
        } else {
            "[ ]"
        }
    }

    /// Render the table, or its loading/empty placeholder.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        self.hit = HitAreas::default();

        let border_style = if focused {
            t.focus_style()
        } else {
            t.muted_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.view_state() {
            TableViewState::Loading => {
                let middle = centered_line(inner);
                self.spinner
                    .render_centered(frame, middle, LOADING_TEXT, t.muted_style());
            }
            TableViewState::Empty => {
                let empty = Paragraph::new(EMPTY_TEXT)
                    .style(t.muted_style())
                    .alignment(Alignment::Center);
                frame.render_widget(empty, centered_line(inner));
            }
            TableViewState::Content => self.render_content(frame, inner, focused),
        }
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let widths = self.column_widths();

        let mut header_cells = Vec::with_capacity(widths.len());
        if self.selectable {
            header_cells.push(Cell::from(Self::checkbox(self.all_selected())));
        }
        for (index, column) in self.columns.iter().enumerate() {
            header_cells.push(Cell::from(self.header_label(index, column, focused)));
        }
        let header = Row::new(header_cells).style(t.header_style());

        let rows: Vec<Row> = self
            .sorted_records()
            .iter()
            .map(|record| {
                let selected = self.is_selected(record);
                let mut cells = Vec::with_capacity(widths.len());
                if self.selectable {
                    cells.push(Cell::from(Self::checkbox(selected)));
                }
                for column in &self.columns {
                    cells.push(Cell::from(Self::cell_content(column, record)));
                }
                let style = if selected {
                    Style::default().bg(t.selected_bg)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect();

        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let table = Table::new(rows, widths.clone())
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .highlight_style(highlight);

        frame.render_stateful_widget(table, area, &mut self.state);
        self.record_hit_areas(area, &widths);
    }

    fn record_hit_areas(&mut self, area: Rect, widths: &[Constraint]) {
        if area.height == 0 {
            return;
        }
        let cells = Layout::horizontal(widths.iter().copied())
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .split(area);
        let header_row = |cell: Rect| Rect::new(cell.x, area.y, cell.width, 1);

        let mut cell_iter = cells.iter().copied();
        let checkbox_column = if self.selectable {
            cell_iter.next()
        } else {
            None
        };
        self.hit.select_all = checkbox_column.map(header_row);
        for (index, cell) in cell_iter.enumerate() {
            self.hit.headers.push((header_row(cell), index));
        }

        let offset = self.state.offset();
        let body_rows = area.height.saturating_sub(1) as usize;
        for (line, position) in (offset..self.order.len()).take(body_rows).enumerate() {
            let y = area.y + 1 + line as u16;
            self.hit
                .rows
                .push((Rect::new(area.x, y, area.width, 1), position));
            if let Some(column) = checkbox_column {
                self.hit
                    .checkboxes
                    .push((Rect::new(column.x, y, column.width, 1), position));
            }
        }
    }
}

/// A one-line strip in the vertical middle of `area`.
fn centered_line(area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

// Inspection for tests.
#[cfg(test)]
impl<R: Record> DataTable<R> {
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn records(&self) -> &[Rc<R>] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn sort(&self) -> Option<&SortDirective> {
        self.sort.as_ref()
    }

    pub fn selection(&self) -> &[Rc<R>] {
        &self.selection
    }

    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn column_cursor(&self) -> usize {
        self.column_cursor
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.records.len())
            .field("columns", &self.columns)
            .field("loading", &self.loading)
            .field("selectable", &self.selectable)
            .field("sort", &self.sort)
            .field("selected", &self.selection.len())
            .finish()
    }
}

#[cfg(test)]
impl<R> TableAction<R> {
    /// The selection carried by a `SelectionChanged` action.
    pub fn selection(&self) -> Option<&[Rc<R>]> {
        match self {
            TableAction::SelectionChanged(selection) => Some(selection),
            TableAction::SortChanged(_) => None,
        }
    }
}

impl<R> PartialEq for TableAction<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TableAction::SelectionChanged(a), TableAction::SelectionChanged(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
            }
            (TableAction::SortChanged(a), TableAction::SortChanged(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::record::FieldValue;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: u32,
        name: &'static str,
        role: &'static str,
    }

    impl Record for User {
        fn field(&self, key: &str) -> FieldValue<'_> {
            match key {
                "id" => FieldValue::Number(self.id as f64),
                "name" => FieldValue::Text(self.name),
                "role" => FieldValue::Text(self.role),
                _ => FieldValue::Missing,
            }
        }
    }

    fn user(id: u32, name: &'static str, role: &'static str) -> User {
        User { id, name, role }
    }

    fn sort_records(records: &[Rc<User>], directive: Option<&SortDirective>) -> Vec<Rc<User>> {
        sorted_order(records, directive)
            .into_iter()
            .map(|i| Rc::clone(&records[i]))
            .collect()
    }

    fn columns() -> Vec<Column<User>> {
        vec![
            Column::new("id", "Id").sortable(),
            Column::new("name", "Name").sortable(),
            Column::new("role", "Role"),
        ]
    }

    fn table() -> DataTable<User> {
        DataTable::new(
            vec![user(1, "Bob", "User"), user(2, "Amy", "Admin")],
            columns(),
        )
    }

    fn names(records: &[Rc<User>]) -> Vec<&'static str> {
        records.iter().map(|u| u.name).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn draw(table: &mut DataTable<User>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| table.render(frame, frame.area(), true))
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn test_next_sort_from_nothing_is_ascending() {
        let next = next_sort(None, "name");
        assert_eq!(next, SortDirective::new("name", SortDirection::Ascending));
    }

    #[test]
    fn test_next_sort_cycles_same_column() {
        let first = next_sort(None, "name");
        let second = next_sort(Some(&first), "name");
        let third = next_sort(Some(&second), "name");
        assert_eq!(second.direction, SortDirection::Descending);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_next_sort_other_column_restarts_ascending() {
        let current = SortDirective::new("name", SortDirection::Descending);
        assert_eq!(
            next_sort(Some(&current), "id"),
            SortDirective::new("id", SortDirection::Ascending)
        );
        let current = SortDirective::new("name", SortDirection::Ascending);
        assert_eq!(next_sort(Some(&current), "id").direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_by_name_example() {
        let mut table = table();
        table.sort_by_column("name");
        assert_eq!(names(&table.sorted_records()), vec!["Amy", "Bob"]);

        table.sort_by_column("name");
        assert_eq!(table.sort().unwrap().direction, SortDirection::Descending);
        assert_eq!(names(&table.sorted_records()), vec!["Bob", "Amy"]);
    }

    #[test]
    fn test_sort_numbers_by_value() {
        let mut table = DataTable::new(
            vec![user(10, "a", "x"), user(9, "b", "x"), user(100, "c", "x")],
            columns(),
        );
        table.sort_by_column("id");
        assert_eq!(names(&table.sorted_records()), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_leaves_source_untouched() {
        let mut table = table();
        table.sort_by_column("name");
        assert_eq!(names(table.records()), vec!["Bob", "Amy"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records: Vec<Rc<User>> = vec![
            Rc::new(user(1, "Zed", "User")),
            Rc::new(user(2, "Amy", "Admin")),
            Rc::new(user(3, "Kim", "User")),
            Rc::new(user(4, "Lee", "Admin")),
        ];
        let directive = SortDirective::new("role", SortDirection::Ascending);
        let sorted = sort_records(&records, Some(&directive));
        assert_eq!(names(&sorted), vec!["Amy", "Lee", "Zed", "Kim"]);

        let directive = SortDirective::new("role", SortDirection::Descending);
        let sorted = sort_records(&records, Some(&directive));
        assert_eq!(names(&sorted), vec!["Zed", "Kim", "Amy", "Lee"]);
    }

    #[test]
    fn test_sort_unknown_field_keeps_order() {
        let records: Vec<Rc<User>> = vec![Rc::new(user(2, "b", "x")), Rc::new(user(1, "a", "x"))];
        let directive = SortDirective::new("missing", SortDirection::Ascending);
        assert_eq!(names(&sort_records(&records, Some(&directive))), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_trivial_lengths() {
        let directive = SortDirective::new("name", SortDirection::Descending);
        let empty: Vec<Rc<User>> = Vec::new();
        assert!(sort_records(&empty, Some(&directive)).is_empty());

        let one = vec![Rc::new(user(1, "Solo", "x"))];
        let sorted = sort_records(&one, Some(&directive));
        assert!(Rc::ptr_eq(&sorted[0], &one[0]));
    }

    #[test]
    fn test_non_sortable_column_ignored() {
        let mut table = table();
        assert!(table.sort_by_column("role").is_none());
        assert!(table.sort_by_column("nope").is_none());
        assert!(table.sort().is_none());
    }

    #[test]
    fn test_sort_action_returned() {
        let mut table = table();
        let action = table.sort_by_column("id");
        assert_eq!(
            action,
            Some(TableAction::SortChanged(SortDirective::new(
                "id",
                SortDirection::Ascending
            )))
        );
    }

    #[test]
    fn test_view_state_precedence() {
        let mut table = table();
        assert_eq!(table.view_state(), TableViewState::Content);

        table.set_loading(true);
        assert_eq!(table.view_state(), TableViewState::Loading);

        table.set_records(Vec::<User>::new());
        assert_eq!(table.view_state(), TableViewState::Loading);

        table.set_loading(false);
        assert_eq!(table.view_state(), TableViewState::Empty);
    }

    #[test]
    fn test_toggle_row_requires_selectable() {
        let mut table = table();
        let first = Rc::clone(&table.records()[0]);
        assert!(table.toggle_row(&first).is_none());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_toggle_row_twice_restores_membership() {
        let mut table = table().with_selectable(true);
        let bob = Rc::clone(&table.records()[0]);
        let amy = Rc::clone(&table.records()[1]);

        table.toggle_row(&bob);
        table.toggle_row(&amy);
        assert_eq!(names(table.selection()), vec!["Bob", "Amy"]);

        let action = table.toggle_row(&bob).unwrap();
        assert_eq!(names(action.selection().unwrap()), vec!["Amy"]);

        table.toggle_row(&bob);
        assert_eq!(names(table.selection()), vec!["Amy", "Bob"]);
    }

    #[test]
    fn test_selection_uses_identity() {
        let twin = user(1, "Twin", "User");
        let mut table =
            DataTable::new(vec![twin.clone(), twin], columns()).with_selectable(true);
        let first = Rc::clone(&table.records()[0]);
        let second = Rc::clone(&table.records()[1]);

        table.toggle_row(&first);
        assert!(table.is_selected(&first));
        assert!(!table.is_selected(&second));
    }

    #[test]
    fn test_selection_independent_of_sort() {
        let mut table = table().with_selectable(true);
        let bob = Rc::clone(&table.records()[0]);
        table.toggle_row(&bob);

        table.sort_by_column("name");
        assert!(table.is_selected(&bob));
        assert_eq!(table.sorted_records().iter().filter(|r| table.is_selected(r)).count(), 1);
        assert!(table.sorted_records()[1].name == "Bob");
    }

    #[test]
    fn test_select_all_then_none() {
        let mut table = table().with_selectable(true);
        table.sort_by_column("name");

        let action = table.set_all_selected(true).unwrap();
        assert_eq!(names(action.selection().unwrap()), vec!["Bob", "Amy"]);
        assert!(table.all_selected());

        let action = table.set_all_selected(false).unwrap();
        assert!(action.selection().unwrap().is_empty());
        assert!(!table.all_selected());
    }

    #[test]
    fn test_all_selected_false_when_empty() {
        let table = DataTable::new(Vec::<User>::new(), columns()).with_selectable(true);
        assert!(table.selection().is_empty());
        assert!(!table.all_selected());
    }

    #[test]
    fn test_toggle_all_follows_checkbox() {
        let mut table = table().with_selectable(true);
        let bob = Rc::clone(&table.records()[0]);
        table.toggle_row(&bob);

        table.toggle_all();
        assert!(table.all_selected());
        table.toggle_all();
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_set_records_keeps_selection() {
        let mut table = table().with_selectable(true);
        table.set_all_selected(true);
        table.set_records(vec![user(3, "Cy", "User")]);
        assert_eq!(table.selection().len(), 2);
        assert!(!table.all_selected());
    }

    #[test]
    fn test_set_records_reapplies_sort() {
        let mut table = table();
        table.sort_by_column("name");
        table.set_records(vec![user(3, "Zoe", "x"), user(4, "Al", "x")]);
        assert_eq!(names(&table.sorted_records()), vec!["Al", "Zoe"]);
        assert_eq!(table.cursor(), Some(0));
    }

    #[test]
    fn test_cell_content_default_and_custom() {
        let amy = user(2, "Amy", "Admin");
        let plain = Column::<User>::new("id", "Id");
        assert_eq!(DataTable::cell_content(&plain, &amy), Line::from("2"));

        let custom =
            Column::<User>::new("role", "Role").with_render(|u| Line::from(format!("<{}>", u.role)));
        assert_eq!(DataTable::cell_content(&custom, &amy), Line::from("<Admin>"));
    }

    #[test]
    fn test_keyboard_sort_and_select() {
        let mut table = table().with_selectable(true);
        assert!(matches!(
            table.handle_input(key(KeyCode::Char('2'))),
            Some(TableAction::SortChanged(_))
        ));
        assert_eq!(table.column_cursor(), 1);
        assert_eq!(names(&table.sorted_records()), vec!["Amy", "Bob"]);

        let action = table.handle_input(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(names(action.selection().unwrap()), vec!["Amy"]);

        table.handle_input(key(KeyCode::Char('j')));
        table.handle_input(key(KeyCode::Char(' ')));
        assert!(table.all_selected());

        let action = table.handle_input(key(KeyCode::Char('a'))).unwrap();
        assert!(action.selection().unwrap().is_empty());
    }

    #[test]
    fn test_keyboard_header_cursor() {
        let mut table = table();
        table.handle_input(key(KeyCode::Char('l')));
        table.handle_input(key(KeyCode::Char('l')));
        table.handle_input(key(KeyCode::Char('l')));
        assert_eq!(table.column_cursor(), 2);
        assert!(table.handle_input(key(KeyCode::Enter)).is_none());

        table.handle_input(key(KeyCode::Char('h')));
        assert!(table.handle_input(key(KeyCode::Char('s'))).is_some());
        assert_eq!(table.sort().unwrap().key, "name");
    }

    #[test]
    fn test_keyboard_ignored_while_loading() {
        let mut table = table().with_selectable(true).with_loading(true);
        assert!(table.handle_input(key(KeyCode::Char('a'))).is_none());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut table = table();
        table.move_up();
        assert_eq!(table.cursor(), Some(0));
        table.move_down();
        table.move_down();
        assert_eq!(table.cursor(), Some(1));
    }

    #[test]
    fn test_render_loading_placeholder() {
        let mut table = table().with_loading(true);
        let lines = draw(&mut table, 40, 7);
        assert!(lines.iter().any(|l| l.contains(LOADING_TEXT)));
        assert!(!lines.iter().any(|l| l.contains("Bob")));
    }

    #[test]
    fn test_render_empty_placeholder() {
        let mut table = DataTable::new(Vec::<User>::new(), columns());
        let lines = draw(&mut table, 40, 7);
        assert!(lines.iter().any(|l| l.contains(EMPTY_TEXT)));
    }

    #[test]
    fn test_render_sort_indicator_and_rows() {
        let mut table = table().with_selectable(true);
        table.sort_by_column("name");
        table.set_all_selected(true);
        let lines = draw(&mut table, 50, 6);

        assert!(lines[1].contains("[x]"));
        assert!(lines[1].contains("NAME ▲"));
        assert!(lines[1].contains("ID ▼"));
        assert!(lines[2].contains("Amy"));
        assert!(lines[3].contains("Bob"));
    }

    #[test]
    fn test_mouse_header_click_sorts() {
        let mut table = table().with_selectable(true);
        draw(&mut table, 50, 6);

        let (rect, _) = table.hit.headers[1];
        let action = table.handle_mouse(click(rect.x, rect.y));
        assert_eq!(
            action,
            Some(TableAction::SortChanged(SortDirective::new(
                "name",
                SortDirection::Ascending
            )))
        );
    }

    #[test]
    fn test_mouse_checkbox_click_toggles() {
        let mut table = table().with_selectable(true);
        draw(&mut table, 50, 6);

        let (rect, _) = table.hit.checkboxes[1];
        let action = table.handle_mouse(click(rect.x + 1, rect.y)).unwrap();
        assert_eq!(names(action.selection().unwrap()), vec!["Amy"]);

        let all = table.hit.select_all.unwrap();
        table.handle_mouse(click(all.x, all.y));
        assert!(table.all_selected());
    }
}
