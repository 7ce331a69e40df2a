//! Record access for the data table.
//!
//! The table never inspects a record's structure. It only asks for the value
//! of a named field through the [`Record`] trait, and compares two such values
//! when a sort is active.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The header indicator glyph for this direction.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// Get the display name for this direction.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// The value of one record field as seen by the table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A string field. Sorts lexicographically.
    Text(&'a str),
    /// A numeric field. Sorts by value.
    Number(f64),
    /// Any other displayable value. Never reorders rows.
    Other(Cow<'a, str>),
    /// The record has no field with the requested key.
    Missing,
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Other(s) => f.write_str(s),
            FieldValue::Missing => Ok(()),
        }
    }
}

/// A row displayed by the data table.
///
/// Implementors expose their fields by name. Keys that do not exist should
/// return [`FieldValue::Missing`].
pub trait Record {
    /// Look up the field named `key`.
    fn field(&self, key: &str) -> FieldValue<'_>;
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> FieldValue<'_> {
        match self.get(key) {
            Some(serde_json::Value::String(s)) => FieldValue::Text(s),
            Some(serde_json::Value::Number(n)) => {
                n.as_f64().map_or(FieldValue::Missing, FieldValue::Number)
            }
            Some(serde_json::Value::Null) | None => FieldValue::Missing,
            Some(other) => FieldValue::Other(Cow::Owned(other.to_string())),
        }
    }
}

/// Compare two field values for the given direction.
///
/// Text compares with text and numbers compare with numbers. Every other
/// pairing, mixed kinds included, is `Equal`, so the stable sort leaves those
/// rows in their original relative order.
pub fn compare_field_values(
    a: &FieldValue<'_>,
    b: &FieldValue<'_>,
    direction: SortDirection,
) -> Ordering {
    let ordering = match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        _ => Ordering::Equal,
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
