//! Application views (screens).

mod catalog;
mod fields;
mod tables;

pub use catalog::CatalogView;
pub use fields::FieldsView;
pub use tables::TablesView;

#[cfg(test)]
pub use catalog::CatalogFocus;
