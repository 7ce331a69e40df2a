//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including views for the
//! showcase screens and the reusable widgets they are built from.

pub mod components;
pub mod theme;
mod views;

pub use components::{
    render_context_help, Column, DataTable, FieldSize, FieldValue, FieldVariant, InputField,
    Record,
};
pub use theme::{init_theme, theme, Theme};
pub use views::{CatalogView, FieldsView, TablesView};

#[cfg(test)]
pub use views::CatalogFocus;
