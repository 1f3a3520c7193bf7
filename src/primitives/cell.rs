//! Cell Binding - what each (row, column) pair presents.
//!
//! Pure read of the edit session, draft, and column metadata. Never mutates.
//!
//! | column            | row editing? | presents                      |
//! |-------------------|--------------|-------------------------------|
//! | not editable      | any          | raw value                     |
//! | editable          | no           | raw value                     |
//! | editable          | yes          | input of the column's kind    |
//! | operation         | no           | Edit / Delete (maybe disabled)|
//! | operation         | yes          | Save / Cancel                 |

use crate::columns::{Column, ColumnKey};
use crate::error::ValidationErrors;
use crate::state::{EditDraft, EditSession};
use crate::types::{Field, InputKind, Record};

bitflags::bitflags! {
    /// Operation controls offered on a row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Affordances: u8 {
        const EDIT = 1 << 0;
        const DELETE = 1 << 1;
        const SAVE = 1 << 2;
        const CANCEL = 1 << 3;
        /// Controls are shown but cannot be invoked.
        const DISABLED = 1 << 7;
    }
}

impl Affordances {
    /// True if `control` is offered and not disabled.
    pub fn allows(self, control: Affordances) -> bool {
        self.contains(control) && !self.contains(Affordances::DISABLED)
    }
}

/// What a single cell presents.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Read-only text.
    Value(String),
    /// An input seeded from the draft.
    Input {
        field: Field,
        kind: InputKind,
        value: String,
        cursor: usize,
        focused: bool,
        error: Option<String>,
    },
    /// Operation controls.
    Operations(Affordances),
}

/// Affordances of the operation column for `record`.
///
/// Edit/Delete are disabled on every row while any session is open.
pub fn row_affordances(record: &Record, session: &EditSession) -> Affordances {
    if session.is_editing(record) {
        Affordances::SAVE | Affordances::CANCEL
    } else if session.is_idle() {
        Affordances::EDIT | Affordances::DELETE
    } else {
        Affordances::EDIT | Affordances::DELETE | Affordances::DISABLED
    }
}

/// Decide what the cell at (`record`, `column`) presents.
pub fn bind_cell(
    record: &Record,
    column: &Column,
    session: &EditSession,
    draft: Option<&EditDraft>,
    errors: &ValidationErrors,
) -> CellView {
    let field = match column.key {
        ColumnKey::Operation => return CellView::Operations(row_affordances(record, session)),
        ColumnKey::Field(field) => field,
    };

    if !column.editable || !session.is_editing(record) {
        return CellView::Value(record.field_text(field));
    }

    match draft.and_then(|d| d.input(field).map(|input| (d, input))) {
        Some((draft, input)) => CellView::Input {
            field,
            kind: column.input,
            value: input.value(),
            cursor: input.cursor(),
            focused: draft.focused_field() == Some(field),
            error: errors.for_field(field).map(|e| e.message.clone()),
        },
        // Session open without a draft: fall back to the record value.
        None => CellView::Value(record.field_text(field)),
    }
}
