//! # spark-grid
//!
//! Reactive single-row editable data grid for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the record store, the edit session, the draft and
//! the pager are signals, and rendering is a pure read of them.
//!
//! ## Architecture
//!
//! ```text
//! RecordSource ──load──▶ RecordStore ◀──upsert── Grid (commands)
//!                             │                    │
//!                             ▼                    ▼
//!                   bind_cell(record, column, session, draft)
//!                             │
//!                             ▼
//!                   render_grid → Frame → DiffRenderer
//! ```
//!
//! At most one record is in edit mode at a time. Saving validates the draft
//! and merges it into the store by id; changing page always drops the open
//! session.
//!
//! ## Modules
//!
//! - [`types`] - Records, fields, patches, cells
//! - [`columns`] - Column descriptors
//! - [`state`] - Store, edit session, draft, pager, keyboard
//! - [`primitives`] - Field inputs and cell binding
//! - [`grid`] - The command layer
//! - [`source`] - The HTTP load boundary
//! - [`layout`] - Column widths via Taffy
//! - [`renderer`] - Frames and terminal output
//! - [`config`] / [`logging`] - Environment configuration and tracing setup

pub mod columns;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod primitives;
pub mod renderer;
pub mod source;
pub mod state;
pub mod types;

pub use types::*;

pub use columns::{user_columns, Column, ColumnKey};

pub use config::{DeleteMode, GridConfig, GridOptions};

pub use error::{CommandError, ConfigError, FetchError, ValidationError, ValidationErrors};

pub use grid::{Confirm, Grid, KeyOutcome};

pub use layout::{compute_column_spans, ColumnSpan};

pub use primitives::{bind_cell, row_affordances, Affordances, CellView, FieldInput};

pub use renderer::{render_grid, DiffRenderer, Frame, TerminalGuard};

pub use source::{decode_records, HttpRecordSource, RecordSource};

pub use state::{
    // Records
    LoadState, RecordStore, Upsert,
    // Editing
    DraftField, EditDraft, EditSession, EditState,
    // Navigation
    Pager,
    // Keyboard
    GridAction, GridMode, InputEvent, KeyState, KeyboardEvent, Modifiers,
};
