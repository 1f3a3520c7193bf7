//! Grid Primitives - cell-level building blocks.
//!
//! - [`FieldInput`] - the input capability of an editable cell (text or numeric)
//! - [`bind_cell`] - per (row, column) decision of what a cell presents
//! - [`Affordances`] - operation controls offered on a row
//!
//! Binding is a pure read of session, draft and column metadata; only the
//! command layer mutates state.

mod cell;
mod field_input;

pub use cell::{bind_cell, row_affordances, Affordances, CellView};
pub use field_input::FieldInput;
