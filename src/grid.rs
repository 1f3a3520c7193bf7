//! Grid - the command layer.
//!
//! Owns the record store, edit session, draft, pager and UI bits (cursor,
//! confirmation prompt, status line) and exposes the four operator commands:
//!
//! - [`Grid::edit`] - seed the draft and open an edit session
//! - [`Grid::save`] - validate, upsert, close the session
//! - [`Grid::cancel`] - close the session without touching data
//! - [`Grid::delete`] - alias of edit, or true removal, per [`DeleteMode`]
//!
//! Every page change cancels the open session so it never outlives the rows
//! it was opened on.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::{Grid, GridOptions, user_columns, Field, Record, RecordId};
//!
//! let grid = Grid::new(user_columns(), GridOptions::default());
//! grid.store().apply_load(Ok(vec![Record::new(1, "Ann", 30.0, "X")]))?;
//!
//! let ann = grid.store().get(RecordId(1)).unwrap();
//! grid.edit(&ann);
//! grid.set_field(Field::Age, "31");
//! grid.save(RecordId(1))?;
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::columns::Column;
use crate::config::{DeleteMode, GridOptions};
use crate::error::{CommandError, ValidationErrors};
use crate::state::keymap::{self, GridAction, GridMode};
use crate::state::{EditDraft, EditSession, EditState, KeyboardEvent, Pager, RecordStore};
use crate::types::{Field, Record, RecordId};

// =============================================================================
// TYPES
// =============================================================================

/// A yes/no question waiting for the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// "Sure to cancel?"
    CancelEdit,
    /// "Sure to delete?"
    Delete(RecordId),
}

impl Confirm {
    pub fn question(self) -> &'static str {
        match self {
            Confirm::CancelEdit => "Sure to cancel?",
            Confirm::Delete(_) => "Sure to delete?",
        }
    }
}

/// What handling a key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
    Quit,
}

// =============================================================================
// GRID
// =============================================================================

/// Editable grid state and commands. Cloning shares all state.
#[derive(Clone)]
pub struct Grid {
    columns: Rc<Vec<Column>>,
    options: GridOptions,
    store: RecordStore,
    session: EditSession,
    draft: Signal<Option<EditDraft>>,
    errors: Signal<ValidationErrors>,
    pager: Pager,
    cursor: Signal<usize>,
    prompt: Signal<Option<Confirm>>,
    status: Signal<Option<String>>,
}

impl Grid {
    /// Create a grid over an empty, pending store.
    pub fn new(columns: Vec<Column>, options: GridOptions) -> Self {
        Self::with_store(columns, options, RecordStore::new())
    }

    /// Create a grid over an existing store.
    pub fn with_store(columns: Vec<Column>, options: GridOptions, store: RecordStore) -> Self {
        let grid = Self {
            columns: Rc::new(columns),
            options,
            store,
            session: EditSession::new(),
            draft: signal(None),
            errors: signal(ValidationErrors::default()),
            pager: Pager::new(options.page_size),
            cursor: signal(0),
            prompt: signal(None),
            status: signal(None),
        };

        // Navigation always resets the session and the row cursor.
        let session = grid.session.clone();
        let draft = grid.draft.clone();
        let errors = grid.errors.clone();
        let prompt = grid.prompt.clone();
        let cursor = grid.cursor.clone();
        let _ = grid.pager.on_change(move |page| {
            debug!(page, "page changed");
            session.cancel();
            draft.set(None);
            errors.set(ValidationErrors::default());
            prompt.set(None);
            cursor.set(0);
        });

        grid
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn options(&self) -> GridOptions {
        self.options
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn draft(&self) -> Option<EditDraft> {
        self.draft.get()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.errors.get()
    }

    pub fn prompt(&self) -> Option<Confirm> {
        self.prompt.get()
    }

    pub fn status(&self) -> Option<String> {
        self.status.get()
    }

    pub fn is_editing(&self, record: &Record) -> bool {
        self.session.is_editing(record)
    }

    pub fn mode(&self) -> GridMode {
        if self.prompt().is_some() {
            GridMode::Confirm
        } else if self.session.is_idle() {
            GridMode::View
        } else {
            GridMode::Edit
        }
    }

    /// Records on the current page.
    pub fn visible_records(&self) -> Vec<Record> {
        self.store.page(self.pager.range(self.store.len()))
    }

    /// Cursor position within the visible page, clamped to it.
    pub fn cursor(&self) -> usize {
        let visible = self.visible_records().len();
        self.cursor.get().min(visible.saturating_sub(1))
    }

    pub fn cursor_record(&self) -> Option<Record> {
        self.visible_records().get(self.cursor()).cloned()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Seed the draft from `record` and open an edit session on it.
    ///
    /// Returns false, leaving everything unchanged, while another record is
    /// being edited.
    pub fn edit(&self, record: &Record) -> bool {
        match self.session.state() {
            EditState::Editing(id) if id == record.id => true,
            EditState::Editing(_) => self.session.begin_edit(record),
            EditState::Idle => {
                self.draft.set(Some(EditDraft::from_record(record, &self.columns)));
                self.errors.set(ValidationErrors::default());
                self.status.set(None);
                self.session.begin_edit(record)
            }
        }
    }

    /// Close the open session without touching data. Idempotent.
    pub fn cancel(&self) {
        self.session.cancel();
        if self.draft.get().is_some() {
            self.draft.set(None);
        }
        if !self.errors.get().is_empty() {
            self.errors.set(ValidationErrors::default());
        }
        if self.prompt.get().is_some() {
            self.prompt.set(None);
        }
    }

    /// Validate the draft and commit it into record `id`.
    ///
    /// On validation failure the errors are kept for display and the session
    /// stays open. There is no remote write: only the local store changes.
    pub fn save(&self, id: RecordId) -> Result<(), CommandError> {
        if self.session.editing_id() != Some(id) {
            return Err(CommandError::NotEditing(id));
        }
        let Some(draft) = self.draft.get() else {
            return Err(CommandError::NotEditing(id));
        };

        let patch = match draft.validate() {
            Ok(patch) => patch,
            Err(errors) => {
                debug!(%id, %errors, "validate failed");
                self.errors.set(errors.clone());
                return Err(CommandError::Validation(errors));
            }
        };

        let outcome = self.store.upsert(id, &patch);
        self.session.finish(id);
        self.draft.set(None);
        self.errors.set(ValidationErrors::default());
        self.status.set(Some(format!("Saved record {id}")));
        info!(%id, ?outcome, "record saved");
        Ok(())
    }

    /// Delete command.
    ///
    /// With [`DeleteMode::AliasEdit`] this is exactly [`Grid::edit`]. With
    /// [`DeleteMode::Remove`] the record is removed from the store; refused
    /// while a session is open.
    pub fn delete(&self, record: &Record) -> bool {
        match self.options.delete_mode {
            DeleteMode::AliasEdit => self.edit(record),
            DeleteMode::Remove => {
                if !self.session.is_idle() {
                    debug!(id = %record.id, "delete rejected, a row is being edited");
                    return false;
                }
                let removed = self.store.remove(record.id).is_some();
                if removed {
                    self.pager.clamp(self.store.len());
                    self.status.set(Some(format!("Deleted record {}", record.id)));
                    info!(id = %record.id, "record removed");
                }
                removed
            }
        }
    }

    /// Replace a draft field's value. Returns false with no open draft or
    /// a non-editable field.
    pub fn set_field(&self, field: Field, value: &str) -> bool {
        let Some(mut draft) = self.draft.get() else {
            return false;
        };
        let changed = draft.set_value(field, value);
        if changed {
            self.draft.set(Some(draft));
            self.revalidate(field);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Confirmation prompts
    // -------------------------------------------------------------------------

    /// Ask before cancelling the open session.
    pub fn request_cancel(&self) {
        if !self.session.is_idle() {
            self.prompt.set(Some(Confirm::CancelEdit));
        }
    }

    /// Delete control: asks first in remove mode, acts directly otherwise.
    pub fn request_delete(&self, record: &Record) -> bool {
        match self.options.delete_mode {
            DeleteMode::AliasEdit => self.delete(record),
            DeleteMode::Remove if self.session.is_idle() => {
                self.prompt.set(Some(Confirm::Delete(record.id)));
                true
            }
            DeleteMode::Remove => false,
        }
    }

    /// Run the pending prompt's action.
    pub fn confirm(&self) {
        let Some(prompt) = self.prompt.get() else {
            return;
        };
        self.prompt.set(None);
        match prompt {
            Confirm::CancelEdit => self.cancel(),
            Confirm::Delete(id) => {
                if let Some(record) = self.store.get(id) {
                    self.delete(&record);
                }
            }
        }
    }

    /// Drop the pending prompt.
    pub fn dismiss(&self) {
        if self.prompt.get().is_some() {
            self.prompt.set(None);
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn set_page(&self, page: usize) -> usize {
        self.pager.set_page(page, self.store.len())
    }

    pub fn next_page(&self) -> usize {
        self.pager.next(self.store.len())
    }

    pub fn prev_page(&self) -> usize {
        self.pager.prev(self.store.len())
    }

    /// Move the row cursor. Frozen while editing.
    pub fn move_cursor(&self, delta: isize) {
        if !self.session.is_idle() {
            return;
        }
        let visible = self.visible_records().len() as isize;
        if visible == 0 {
            return;
        }
        let next = (self.cursor() as isize + delta).clamp(0, visible - 1);
        self.cursor.set(next as usize);
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Resolve a key in the current mode and run it.
    pub fn handle_key(&self, event: &KeyboardEvent) -> KeyOutcome {
        match keymap::resolve(event, self.mode()) {
            Some(action) => self.dispatch(action),
            None => KeyOutcome::Ignored,
        }
    }

    /// Run a grid action.
    pub fn dispatch(&self, action: GridAction) -> KeyOutcome {
        match action {
            GridAction::Quit => return KeyOutcome::Quit,
            GridAction::CursorUp => self.move_cursor(-1),
            GridAction::CursorDown => self.move_cursor(1),
            GridAction::PrevPage => {
                self.prev_page();
            }
            GridAction::NextPage => {
                self.next_page();
            }
            GridAction::Edit => match self.cursor_record() {
                Some(record) => {
                    self.edit(&record);
                }
                None => return KeyOutcome::Ignored,
            },
            GridAction::Delete => match self.cursor_record() {
                Some(record) => {
                    self.request_delete(&record);
                }
                None => return KeyOutcome::Ignored,
            },
            GridAction::Save => {
                if let Some(id) = self.session.editing_id() {
                    // Failures are kept in `errors` for display.
                    let _ = self.save(id);
                }
            }
            GridAction::RequestCancel => self.request_cancel(),
            GridAction::FocusNext => self.update_draft(|d| d.cycle_focus(1)),
            GridAction::FocusPrev => self.update_draft(|d| d.cycle_focus(-1)),
            GridAction::FieldKey(event) => return self.forward_to_field(&event),
            GridAction::Confirm => self.confirm(),
            GridAction::Dismiss => self.dismiss(),
        }
        KeyOutcome::Handled
    }

    fn forward_to_field(&self, event: &KeyboardEvent) -> KeyOutcome {
        let Some(mut draft) = self.draft.get() else {
            return KeyOutcome::Ignored;
        };
        let Some(field) = draft.focused_field() else {
            return KeyOutcome::Ignored;
        };
        let consumed = draft
            .focused_input_mut()
            .map(|input| input.handle_key(event))
            .unwrap_or(false);
        if !consumed {
            return KeyOutcome::Ignored;
        }
        self.draft.set(Some(draft));
        self.revalidate(field);
        KeyOutcome::Handled
    }

    fn update_draft(&self, f: impl FnOnce(&mut EditDraft)) {
        if let Some(mut draft) = self.draft.get() {
            f(&mut draft);
            self.draft.set(Some(draft));
        }
    }

    /// Clear a displayed error once the field's value passes again.
    fn revalidate(&self, field: Field) {
        let mut errors = self.errors.get();
        if errors.for_field(field).is_none() {
            return;
        }
        let Some(draft) = self.draft.get() else {
            return;
        };
        let passes = draft
            .fields()
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.input.validate(f.field, &f.title).is_ok())
            .unwrap_or(false);
        if passes {
            errors.0.retain(|e| e.field != field);
            self.errors.set(errors);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::user_columns;
    use crate::state::Modifiers;

    fn setup_with(options: GridOptions, count: i64) -> Grid {
        let records = (1..=count)
            .map(|i| Record::new(i, format!("User {i}"), 20.0 + i as f64, format!("Street {i}")))
            .collect();
        Grid::with_store(user_columns(), options, RecordStore::with_records(records))
    }

    fn setup() -> Grid {
        setup_with(GridOptions::default(), 3)
    }

    fn record(grid: &Grid, id: i64) -> Record {
        grid.store().get(RecordId(id)).unwrap()
    }

    #[test]
    fn test_edit_opens_session_and_seeds_draft() {
        let grid = setup();
        assert!(grid.edit(&record(&grid, 2)));

        assert_eq!(grid.session().state(), EditState::Editing(RecordId(2)));
        assert_eq!(grid.mode(), GridMode::Edit);
        let draft = grid.draft().unwrap();
        assert_eq!(draft.value(Field::Name).as_deref(), Some("User 2"));
        assert_eq!(draft.value(Field::Age).as_deref(), Some("22"));
    }

    #[test]
    fn test_second_edit_keeps_first_session() {
        let grid = setup();
        grid.edit(&record(&grid, 1));
        grid.set_field(Field::Name, "Changed");

        assert!(!grid.edit(&record(&grid, 2)));
        assert!(!grid.edit(&record(&grid, 3)));

        assert_eq!(grid.session().editing_id(), Some(RecordId(1)));
        assert_eq!(grid.draft().unwrap().value(Field::Name).as_deref(), Some("Changed"));
    }

    #[test]
    fn test_cancel_idempotent_and_no_mutation() {
        let grid = setup();
        let before = grid.store().snapshot();

        grid.cancel();
        assert!(grid.session().is_idle());

        grid.edit(&record(&grid, 1));
        grid.set_field(Field::Name, "Nope");
        grid.cancel();
        grid.cancel();

        assert!(grid.session().is_idle());
        assert!(grid.draft().is_none());
        assert_eq!(grid.store().snapshot(), before);
    }

    #[test]
    fn test_save_commits_and_closes() {
        let grid = setup();
        grid.edit(&record(&grid, 1));
        grid.set_field(Field::Age, "40");

        grid.save(RecordId(1)).unwrap();

        assert!(grid.session().is_idle());
        assert!(grid.draft().is_none());
        let saved = record(&grid, 1);
        assert_eq!(saved.age, Some(40.0));
        assert_eq!(saved.name, "User 1");
        assert_eq!(grid.store().snapshot()[1], record(&grid, 2));
        assert_eq!(grid.status().as_deref(), Some("Saved record 1"));
    }

    #[test]
    fn test_validation_blocks_commit() {
        let grid = setup();
        let before = grid.store().snapshot();
        grid.edit(&record(&grid, 1));
        grid.set_field(Field::Name, "");

        let err = grid.save(RecordId(1)).unwrap_err();

        match err {
            CommandError::Validation(errors) => {
                assert_eq!(errors.for_field(Field::Name).unwrap().message, "Please input name!");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(grid.session().editing_id(), Some(RecordId(1)));
        assert_eq!(grid.store().snapshot(), before);
        assert_eq!(grid.errors().len(), 1);
    }

    #[test]
    fn test_error_clears_when_field_fixed() {
        let grid = setup();
        grid.edit(&record(&grid, 1));
        grid.set_field(Field::Name, "");
        let _ = grid.save(RecordId(1));
        assert_eq!(grid.errors().len(), 1);

        grid.set_field(Field::Name, "Fixed");
        assert!(grid.errors().is_empty());
    }

    #[test]
    fn test_save_requires_matching_session() {
        let grid = setup();
        assert_eq!(grid.save(RecordId(1)), Err(CommandError::NotEditing(RecordId(1))));

        grid.edit(&record(&grid, 1));
        assert_eq!(grid.save(RecordId(2)), Err(CommandError::NotEditing(RecordId(2))));
        assert_eq!(grid.session().editing_id(), Some(RecordId(1)));
    }

    #[test]
    fn test_save_on_stale_id_appends() {
        let grid = setup();
        let ghost = Record::new(99, "Ghost", 1.0, "Nowhere");
        grid.edit(&ghost);
        grid.save(RecordId(99)).unwrap();

        let records = grid.store().snapshot();
        assert_eq!(records.len(), 4);
        assert_eq!(records[3], ghost);
    }

    #[test]
    fn test_delete_aliases_edit_by_default() {
        let grid = setup();
        let before = grid.store().snapshot();

        assert!(grid.delete(&record(&grid, 2)));

        assert_eq!(grid.session().editing_id(), Some(RecordId(2)));
        assert!(grid.draft().is_some());
        assert_eq!(grid.store().snapshot(), before);
    }

    #[test]
    fn test_delete_remove_mode() {
        let options = GridOptions { delete_mode: DeleteMode::Remove, ..GridOptions::default() };
        let grid = setup_with(options, 3);

        assert!(grid.request_delete(&record(&grid, 2)));
        assert_eq!(grid.prompt(), Some(Confirm::Delete(RecordId(2))));
        assert_eq!(grid.store().len(), 3);

        grid.confirm();
        assert_eq!(grid.prompt(), None);
        assert_eq!(grid.store().len(), 2);
        assert!(grid.store().get(RecordId(2)).is_none());
    }

    #[test]
    fn test_delete_remove_refused_while_editing() {
        let options = GridOptions { delete_mode: DeleteMode::Remove, ..GridOptions::default() };
        let grid = setup_with(options, 3);
        grid.edit(&record(&grid, 1));

        assert!(!grid.delete(&record(&grid, 2)));
        assert!(!grid.request_delete(&record(&grid, 2)));
        assert_eq!(grid.store().len(), 3);
    }

    #[test]
    fn test_page_change_resets_session() {
        let options = GridOptions { page_size: 2, ..GridOptions::default() };
        let grid = setup_with(options, 5);

        for (page, id) in [(1, 1), (0, 3), (2, 4)] {
            grid.edit(&record(&grid, id));
            grid.set_page(page);
            assert!(grid.session().is_idle(), "session survived move to page {page}");
            assert!(grid.draft().is_none());
        }
    }

    #[test]
    fn test_same_page_navigation_still_resets() {
        let grid = setup();
        grid.edit(&record(&grid, 1));
        grid.set_page(0);
        assert!(grid.session().is_idle());
    }

    #[test]
    fn test_visible_records_follow_page() {
        let options = GridOptions { page_size: 2, ..GridOptions::default() };
        let grid = setup_with(options, 5);
        grid.next_page();
        grid.next_page();
        let ids: Vec<_> = grid.visible_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(5)]);
    }

    #[test]
    fn test_keyboard_flow() {
        let grid = setup();

        assert_eq!(grid.handle_key(&KeyboardEvent::new("j")), KeyOutcome::Handled);
        assert_eq!(grid.handle_key(&KeyboardEvent::new("e")), KeyOutcome::Handled);
        assert_eq!(grid.session().editing_id(), Some(RecordId(2)));

        // Focus age, clear it, type a new value
        grid.handle_key(&KeyboardEvent::new("Tab"));
        grid.handle_key(&KeyboardEvent::new("Backspace"));
        grid.handle_key(&KeyboardEvent::new("Backspace"));
        grid.handle_key(&KeyboardEvent::new("5"));
        grid.handle_key(&KeyboardEvent::new("0"));
        grid.handle_key(&KeyboardEvent::new("Enter"));

        assert!(grid.session().is_idle());
        assert_eq!(record(&grid, 2).age, Some(50.0));
    }

    #[test]
    fn test_escape_asks_before_cancel() {
        let grid = setup();
        grid.handle_key(&KeyboardEvent::new("e"));

        grid.handle_key(&KeyboardEvent::new("Escape"));
        assert_eq!(grid.mode(), GridMode::Confirm);
        assert_eq!(grid.prompt().unwrap().question(), "Sure to cancel?");

        grid.handle_key(&KeyboardEvent::new("n"));
        assert_eq!(grid.mode(), GridMode::Edit);

        grid.handle_key(&KeyboardEvent::new("Escape"));
        grid.handle_key(&KeyboardEvent::new("y"));
        assert_eq!(grid.mode(), GridMode::View);
        assert!(grid.session().is_idle());
    }

    #[test]
    fn test_cursor_frozen_while_editing() {
        let grid = setup();
        grid.handle_key(&KeyboardEvent::new("e"));
        grid.move_cursor(1);
        assert_eq!(grid.cursor(), 0);
    }

    #[test]
    fn test_quit_only_in_view_mode() {
        let grid = setup();
        assert_eq!(grid.handle_key(&KeyboardEvent::new("q")), KeyOutcome::Quit);
        grid.handle_key(&KeyboardEvent::new("e"));
        assert_eq!(grid.handle_key(&KeyboardEvent::new("q")), KeyOutcome::Handled);
        assert_eq!(grid.draft().unwrap().value(Field::Name).as_deref(), Some("User 1q"));
    }

    #[test]
    fn test_ctrl_c_quits_while_editing_or_confirming() {
        let ctrl_c = KeyboardEvent::with_modifiers("c", Modifiers::ctrl());
        let grid = setup();
        grid.handle_key(&KeyboardEvent::new("e"));
        assert_eq!(grid.handle_key(&ctrl_c), KeyOutcome::Quit);
        assert_eq!(grid.draft().unwrap().value(Field::Name).as_deref(), Some("User 1"));

        grid.handle_key(&KeyboardEvent::new("Escape"));
        assert_eq!(grid.mode(), GridMode::Confirm);
        assert_eq!(grid.handle_key(&ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn test_edit_on_empty_grid_ignored() {
        let grid = Grid::new(user_columns(), GridOptions::default());
        assert_eq!(grid.handle_key(&KeyboardEvent::new("e")), KeyOutcome::Ignored);
        assert!(grid.session().is_idle());
    }
}
