//! Record Store - the ordered, in-memory list of records.
//!
//! The single source of truth for what the grid renders. Backed by signals, so
//! effects reading it re-run when it changes.
//!
//! # Lifecycle
//!
//! - Replaced wholesale by [`RecordStore::load`] / [`RecordStore::apply_load`]
//! - Elements replaced by id on [`RecordStore::upsert`], or appended on a miss
//! - Elements removed only through [`RecordStore::remove`]

use std::collections::HashSet;
use std::ops::Range;

use spark_signals::{signal, Signal};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::source::RecordSource;
use crate::types::{Record, RecordId, RecordPatch};

// =============================================================================
// TYPES
// =============================================================================

/// Where the initial load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing has resolved yet; the grid renders no rows.
    #[default]
    Pending,
    Loaded,
    /// The load failed; the message is shown instead of rows.
    Failed(String),
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Updated,
    Appended,
}

// =============================================================================
// STORE
// =============================================================================

/// Ordered record collection. Cloning shares the underlying signals.
#[derive(Clone)]
pub struct RecordStore {
    records: Signal<Vec<Record>>,
    load_state: Signal<LoadState>,
}

impl RecordStore {
    /// Create an empty store in the `Pending` state.
    pub fn new() -> Self {
        Self {
            records: signal(Vec::new()),
            load_state: signal(LoadState::Pending),
        }
    }

    /// Create a store that is already loaded with `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        let store = Self::new();
        store.records.set(dedupe_by_id(records));
        store.load_state.set(LoadState::Loaded);
        store
    }

    /// Fetch every record from `source` and replace the store.
    ///
    /// Failures propagate to the caller and are not retried.
    pub async fn load<S>(&self, source: &S) -> Result<usize, FetchError>
    where
        S: RecordSource + ?Sized,
    {
        self.load_state.set(LoadState::Pending);
        let result = source.fetch_all().await;
        self.apply_load(result)
    }

    /// Apply the outcome of a fetch that ran elsewhere.
    pub fn apply_load(&self, result: Result<Vec<Record>, FetchError>) -> Result<usize, FetchError> {
        match result {
            Ok(records) => {
                let records = dedupe_by_id(records);
                let count = records.len();
                self.records.set(records);
                self.load_state.set(LoadState::Loaded);
                info!(count, "records loaded");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "record load failed");
                self.load_state.set(LoadState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state() == LoadState::Loaded
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Copy of the whole ordered list.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.get()
    }

    pub fn len(&self) -> usize {
        self.records.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.records.get().into_iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.get().iter().position(|r| r.id == id)
    }

    /// Records within `range`, clamped to the store length.
    pub fn page(&self, range: Range<usize>) -> Vec<Record> {
        let records = self.records.get();
        let end = range.end.min(records.len());
        let start = range.start.min(end);
        records[start..end].to_vec()
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Replace the record with `id` by its merge with `patch`, or append a new
    /// record built from `patch` when no record has that id.
    pub fn upsert(&self, id: RecordId, patch: &RecordPatch) -> Upsert {
        let mut records = self.records.get();
        let outcome = match records.iter().position(|r| r.id == id) {
            Some(index) => {
                let merged = records[index].merged(patch);
                records[index] = merged;
                Upsert::Updated
            }
            None => {
                warn!(%id, "upsert target missing, appending");
                records.push(Record::from_patch(id, patch));
                Upsert::Appended
            }
        };
        self.records.set(records);
        outcome
    }

    /// Remove the record with `id`.
    pub fn remove(&self, id: RecordId) -> Option<Record> {
        let mut records = self.records.get();
        let index = records.iter().position(|r| r.id == id)?;
        let removed = records.remove(index);
        self.records.set(records);
        Some(removed)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first record for each id.
fn dedupe_by_id(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    let before = records.len();
    let unique: Vec<Record> = records.into_iter().filter(|r| seen.insert(r.id)).collect();
    if unique.len() != before {
        warn!(dropped = before - unique.len(), "dropped records with duplicate ids");
    }
    unique
}

// =============================================================================
// TESTS
// =============================================================================
