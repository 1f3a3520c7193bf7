//! Edit Session - which single record, if any, is in edit mode.
//!
//! A two-state machine held in one signal:
//!
//! ```text
//!            begin_edit(r)            cancel() / finish(id)
//!   Idle  ───────────────▶  Editing(id)  ───────────────▶  Idle
//! ```
//!
//! At most one record is ever in edit mode. `begin_edit` while another record
//! is being edited is rejected and leaves the state untouched; the operation
//! column also disables the affordance, but the machine does not rely on it.

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::types::{Record, RecordId};

/// Edit state of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(RecordId),
}

/// Holder of the grid-wide edit state. Cloning shares the signal.
#[derive(Clone)]
pub struct EditSession {
    state: Signal<EditState>,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            state: signal(EditState::Idle),
        }
    }

    pub fn state(&self) -> EditState {
        self.state.get()
    }

    pub fn is_idle(&self) -> bool {
        self.state() == EditState::Idle
    }

    /// Id of the record being edited.
    pub fn editing_id(&self) -> Option<RecordId> {
        match self.state() {
            EditState::Idle => None,
            EditState::Editing(id) => Some(id),
        }
    }

    /// True iff `record` is the one in edit mode.
    pub fn is_editing(&self, record: &Record) -> bool {
        self.state() == EditState::Editing(record.id)
    }

    /// Enter edit mode for `record`.
    ///
    /// Returns false, without changing state, if a different record is
    /// already being edited.
    pub fn begin_edit(&self, record: &Record) -> bool {
        match self.state() {
            EditState::Idle => {
                self.state.set(EditState::Editing(record.id));
                true
            }
            EditState::Editing(id) if id == record.id => true,
            EditState::Editing(id) => {
                debug!(editing = %id, requested = %record.id, "edit rejected, another row is open");
                false
            }
        }
    }

    /// Leave edit mode. A no-op when already idle.
    pub fn cancel(&self) {
        if !self.is_idle() {
            self.state.set(EditState::Idle);
        }
    }

    /// Close the session after `id` was committed.
    ///
    /// Returns false if `id` is not the record being edited.
    pub fn finish(&self, id: RecordId) -> bool {
        if self.state() == EditState::Editing(id) {
            self.state.set(EditState::Idle);
            true
        } else {
            false
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> Record {
        Record::new(id, "n", 1.0, "a")
    }

    #[test]
    fn test_initial_state_idle() {
        let session = EditSession::new();
        assert!(session.is_idle());
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn test_begin_edit() {
        let session = EditSession::new();
        assert!(session.begin_edit(&record(1)));
        assert_eq!(session.state(), EditState::Editing(RecordId(1)));
        assert!(session.is_editing(&record(1)));
        assert!(!session.is_editing(&record(2)));
    }

    #[test]
    fn test_second_edit_rejected() {
        let session = EditSession::new();
        session.begin_edit(&record(1));

        for id in [2, 3, 4] {
            assert!(!session.begin_edit(&record(id)));
            assert_eq!(session.editing_id(), Some(RecordId(1)));
        }
    }

    #[test]
    fn test_reenter_same_record() {
        let session = EditSession::new();
        session.begin_edit(&record(1));
        assert!(session.begin_edit(&record(1)));
        assert_eq!(session.editing_id(), Some(RecordId(1)));
    }

    #[test]
    fn test_cancel_idempotent() {
        let session = EditSession::new();
        session.cancel();
        assert!(session.is_idle());

        session.begin_edit(&record(1));
        session.cancel();
        session.cancel();
        assert!(session.is_idle());
    }

    #[test]
    fn test_finish_only_matching_id() {
        let session = EditSession::new();
        session.begin_edit(&record(1));

        assert!(!session.finish(RecordId(2)));
        assert_eq!(session.editing_id(), Some(RecordId(1)));

        assert!(session.finish(RecordId(1)));
        assert!(session.is_idle());
    }

    #[test]
    fn test_clones_share_state() {
        let session = EditSession::new();
        let other = session.clone();
        session.begin_edit(&record(9));
        assert_eq!(other.editing_id(), Some(RecordId(9)));
    }
}
