//! Key hint definitions for the help bar.

/// The widget or screen that currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// An input field is focused.
    Field,
    /// A data table is focused.
    Table,
    /// The story list in the catalog is focused.
    StoryList,
}

/// Get the hint line shown in the footer for `context`.
///
/// Keys are wrapped in brackets so the help bar can highlight them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Field => {
            "[Tab] next  [C-t] clear/show  [C-u] clear line  [Enter] submit  [F2] screen  [C-c] quit"
        }
        KeyContext::Table => {
            "[Tab] next  [j/k] row  [h/l] column  [s] sort  [Space] select  [a] all  [F2] screen  [q] quit"
        }
        KeyContext::StoryList => "[Tab] next  [j/k] story  [F2] screen  [q] quit",
    }
}
