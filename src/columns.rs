//! Column descriptors.
//!
//! Static per-column metadata: title, what the column shows, whether it is
//! editable, which input kind it presents, and its width. Defined once and
//! never derived from data.

use crate::types::{Dimension, Field, InputKind};

/// What a column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    /// A record attribute.
    Field(Field),
    /// Per-row operation controls (Edit/Delete or Save/Cancel).
    Operation,
}

/// Static metadata for one grid column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    pub key: ColumnKey,
    pub width: Dimension,
    pub editable: bool,
    pub input: InputKind,
}

impl Column {
    /// A read-only column over a record field.
    pub fn field(title: impl Into<String>, field: Field) -> Self {
        Self {
            title: title.into(),
            key: ColumnKey::Field(field),
            width: Dimension::Auto,
            editable: false,
            input: InputKind::Text,
        }
    }

    /// The operation column.
    pub fn operation(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: ColumnKey::Operation,
            width: Dimension::Auto,
            editable: false,
            input: InputKind::Text,
        }
    }

    /// Mark the column editable with the given input kind.
    pub fn editable(mut self, input: InputKind) -> Self {
        self.editable = true;
        self.input = input;
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    /// The record field this column shows, if any.
    pub fn data_field(&self) -> Option<Field> {
        match self.key {
            ColumnKey::Field(field) => Some(field),
            ColumnKey::Operation => None,
        }
    }

    /// True for columns that present an input while their row is being edited.
    pub fn is_editable_field(&self) -> bool {
        self.editable && self.data_field().is_some()
    }
}

/// The user grid: name, age, address, and the operation column.
pub fn user_columns() -> Vec<Column> {
    vec![
        Column::field("name", Field::Name)
            .width(Dimension::Percent(25.0))
            .editable(InputKind::Text),
        Column::field("age", Field::Age)
            .width(Dimension::Percent(15.0))
            .editable(InputKind::Numeric),
        Column::field("address", Field::Address)
            .width(Dimension::Percent(40.0))
            .editable(InputKind::Text),
        Column::operation("operation"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_columns_declare_input_kinds() {
        let columns = user_columns();
        let kinds: Vec<_> = columns
            .iter()
            .filter(|c| c.is_editable_field())
            .map(|c| (c.data_field().unwrap(), c.input))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (Field::Name, InputKind::Text),
                (Field::Age, InputKind::Numeric),
                (Field::Address, InputKind::Text),
            ]
        );
        assert_eq!(columns[3].key, ColumnKey::Operation);
        assert!(!columns[3].is_editable_field());
    }
}
