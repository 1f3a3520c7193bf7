//! State Module - reactive state behind the grid
//!
//! - **Records** - ordered record store and load state
//! - **Edit Session** - `Idle` / `Editing(id)` state machine
//! - **Draft** - form state of the open edit session
//! - **Pager** - page size, current page, page-change callbacks
//! - **Keyboard** - event types and terminal event conversion
//! - **Keymap** - keyboard events to grid actions per mode

pub mod draft;
pub mod edit_session;
pub mod keyboard;
pub mod keymap;
pub mod pager;
pub mod records;

pub use draft::{DraftField, EditDraft};
pub use edit_session::{EditSession, EditState};
pub use keyboard::{InputEvent, KeyState, KeyboardEvent, Modifiers};
pub use keymap::{GridAction, GridMode};
pub use pager::Pager;
pub use records::{LoadState, RecordStore, Upsert};
