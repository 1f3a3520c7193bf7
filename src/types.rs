//! Core types for spark-grid.
//!
//! Records, record patches, field keys, and the small value types shared by the
//! layout and renderer (Dimension, Attr, Cell).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Record Identity
// =============================================================================

/// Unique, immutable identity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// =============================================================================
// Field Keys
// =============================================================================

/// Attribute fields of a record that a column can display or edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Age,
    Address,
}

impl Field {
    /// All attribute fields in declaration order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Age, Field::Address];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Record
// =============================================================================

/// One row of data.
///
/// Attribute fields may be missing or `null` in the loaded JSON: text fields
/// default to the empty string and `age` to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Create a fully populated record.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, age: f64, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: Some(age),
            address: address.into(),
        }
    }

    /// Display text of a field. Absent values render as the empty string.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Age => self.age.map(format_number).unwrap_or_default(),
            Field::Address => self.address.clone(),
        }
    }

    /// Merge a patch into a copy of this record. Patch values win, the id is kept.
    pub fn merged(&self, patch: &RecordPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            age: patch.age.or(self.age),
            address: patch.address.clone().unwrap_or_else(|| self.address.clone()),
        }
    }

    /// Build a new record from a patch, using `id` as its identity.
    pub fn from_patch(id: RecordId, patch: &RecordPatch) -> Self {
        Self {
            id,
            name: patch.name.clone().unwrap_or_default(),
            age: patch.age,
            address: patch.address.clone().unwrap_or_default(),
        }
    }
}

/// Format a number the way an operator typed it: integral values lose the `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Record Patch
// =============================================================================

/// Partial record collected from a validated edit draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub address: Option<String>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Assign a validated value to a field.
    ///
    /// Returns false when the value cannot be represented by the field
    /// (non-numeric text for `age`).
    pub fn set(&mut self, field: Field, value: FieldValue) -> bool {
        match field {
            Field::Name => self.name = Some(value.into_text()),
            Field::Address => self.address = Some(value.into_text()),
            Field::Age => match value.as_number() {
                Some(n) => self.age = Some(n),
                None => return false,
            },
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none()
    }
}

// =============================================================================
// Input Kind / Field Value
// =============================================================================

/// Which input capability an editable column presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Numeric,
}

/// A validated value produced by a field input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => format_number(n),
        }
    }
}

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A column width that can be absolute (cells) or a percentage.
///
/// - `Auto`: fill whatever width remains
/// - `Cells(n)`: absolute width in terminal cells
/// - `Percent(n)`: percentage of the table width (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Cells(u16),
    Percent(f32),
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 5;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', attrs: Attr::NONE }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialize_defaults_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.id, RecordId(7));
        assert_eq!(record.name, "");
        assert_eq!(record.age, None);
        assert_eq!(record.field_text(Field::Age), "");
    }

    #[test]
    fn test_record_deserialize_null_fields() {
        let record: Record =
            serde_json::from_str(r#"{"id": 3, "name": null, "age": null, "address": null}"#).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.age, None);
        assert_eq!(record.address, "");
    }

    #[test]
    fn test_record_deserialize_full() {
        let record: Record =
            serde_json::from_str(r#"{"id": 1, "name": "Ann", "age": 30, "address": "X"}"#).unwrap();
        assert_eq!(record, Record::new(1, "Ann", 30.0, "X"));
        assert_eq!(record.field_text(Field::Age), "30");
    }

    #[test]
    fn test_merge_patch_wins() {
        let record = Record::new(1, "Ann", 30.0, "X");
        let merged = record.merged(&RecordPatch::new().age(40.0));
        assert_eq!(merged, Record::new(1, "Ann", 40.0, "X"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(31.0), "31");
        assert_eq!(format_number(31.5), "31.5");
        assert_eq!(format_number(-2.0), "-2");
    }

    #[test]
    fn test_patch_rejects_text_age() {
        let mut patch = RecordPatch::new();
        assert!(!patch.set(Field::Age, FieldValue::Text("old".into())));
        assert!(patch.set(Field::Age, FieldValue::Text(" 42 ".into())));
        assert_eq!(patch.age, Some(42.0));
    }
}
