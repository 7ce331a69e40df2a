//! Reusable UI components.

mod field;
mod help_bar;
mod loading;
mod record;
mod table;

pub use field::{FieldAction, FieldSize, FieldVariant, InputField, DEFAULT_MASK_CHAR};
pub use help_bar::render_context_help;
pub use record::{FieldValue, Record};
pub use table::{Column, DataTable, TableAction};

#[cfg(test)]
pub use field::FieldMessage;
#[cfg(test)]
pub use record::SortDirection;
#[cfg(test)]
pub use table::TableViewState;
