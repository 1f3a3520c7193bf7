//! Edit Draft - form state of the open edit session.
//!
//! One [`FieldInput`] per editable column, seeded from the record being
//! edited, plus which of them has focus. Validation turns the draft into a
//! [`RecordPatch`] or the list of per-field failures.

use crate::columns::Column;
use crate::error::{ValidationError, ValidationErrors};
use crate::primitives::FieldInput;
use crate::types::{Field, Record, RecordPatch};

/// One editable field of the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftField {
    pub field: Field,
    pub title: String,
    pub input: FieldInput,
}

/// Form state for the record being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    fields: Vec<DraftField>,
    focused: usize,
}

impl EditDraft {
    /// Seed a draft from `record` for every editable field column.
    ///
    /// Absent record values seed as the empty string.
    pub fn from_record(record: &Record, columns: &[Column]) -> Self {
        let fields = columns
            .iter()
            .filter(|c| c.editable)
            .filter_map(|c| {
                let field = c.data_field()?;
                Some(DraftField {
                    field,
                    title: c.title.clone(),
                    input: FieldInput::new(c.input, &record.field_text(field)),
                })
            })
            .collect();
        Self { fields, focused: 0 }
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn input(&self, field: Field) -> Option<&FieldInput> {
        self.fields.iter().find(|f| f.field == field).map(|f| &f.input)
    }

    pub fn input_mut(&mut self, field: Field) -> Option<&mut FieldInput> {
        self.fields.iter_mut().find(|f| f.field == field).map(|f| &mut f.input)
    }

    /// Replace a field's value. Returns false if the field is not editable.
    pub fn set_value(&mut self, field: Field, value: &str) -> bool {
        match self.input_mut(field) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn value(&self, field: Field) -> Option<String> {
        self.input(field).map(FieldInput::value)
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields.get(self.focused).map(|f| f.field)
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut FieldInput> {
        self.fields.get_mut(self.focused).map(|f| &mut f.input)
    }

    /// Move focus forward (`1`) or backward (`-1`), wrapping around.
    pub fn cycle_focus(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            return;
        }
        self.focused = (self.focused as isize + delta).rem_euclid(len) as usize;
    }

    /// Validate every field. All failures are collected, not just the first.
    pub fn validate(&self) -> Result<RecordPatch, ValidationErrors> {
        let mut patch = RecordPatch::new();
        let mut errors = Vec::new();

        for f in &self.fields {
            match f.input.validate(f.field, &f.title) {
                Ok(value) => {
                    if !patch.set(f.field, value) {
                        errors.push(ValidationError::not_a_number(f.field, &f.title));
                    }
                }
                Err(err) => errors.push(err),
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
