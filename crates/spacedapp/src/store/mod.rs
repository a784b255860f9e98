//! # Storage Layer
//!
//! All review state is one document: a [`Snapshot`]. Every operation loads it
//! whole, mutates it in memory and, when something changed, saves it whole.
//! Nothing is cached between operations.
//!
//! ## Backends
//!
//! [`StorageBackend`] handles the "how" of persistence, [`ReviewStore`] the
//! load/save protocol on top of it:
//!
//! - [`fs_backend::FsBackend`]: JSON document on disk (the default).
//! - [`sqlite_backend::SqliteBackend`]: the same state in three SQLite tables.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Revisions
//!
//! A snapshot carries the `revision` it was loaded at. Saving is a
//! compare-and-swap: the backend only writes if the persisted revision still
//! matches, then the revision is bumped. A concurrent writer that saved in
//! between produces [`SpacedError::Conflict`] instead of silently losing its
//! update. Within one process, saving needs `&mut ReviewStore`, so a single
//! owner serializes writes.
//!
//! ## Atomicity
//!
//! The file backend writes to a temporary file in the target directory and
//! renames it over the document, so readers see either the old or the new
//! snapshot, never a partial one. Writers serialize on an exclusive lock of
//! a sidecar `.<file>.lock`, held from the revision check through the
//! rename, so two processes cannot both pass the check.
//!
//! ## Storage Layout
//!
//! ```text
//! .adaptive/
//! ├── data.json      # Snapshot document (json backend)
//! ├── .data.json.lock # Writer lock (json backend)
//! ├── data.sqlite3   # Snapshot tables (sqlite backend)
//! └── spaced.toml    # Project configuration
//! ```

use crate::error::{Result, SpacedError};
use crate::model::Snapshot;
use fs_backend::FsBackend;
use sqlite_backend::SqliteBackend;

pub mod fs_backend;
pub mod mem_backend;
pub mod sqlite_backend;

/// Raw persistence of a whole [`Snapshot`].
pub trait StorageBackend {
    /// Load the persisted snapshot, or `None` if nothing has been written yet.
    /// A document that exists but cannot be read back is `StoreCorrupt`.
    fn load_snapshot(&self) -> Result<Option<Snapshot>>;

    /// Replace the persisted snapshot.
    ///
    /// MUST fail with `Conflict` (and write nothing) unless the currently
    /// persisted revision equals `expected_revision`. A missing document
    /// counts as revision 0.
    fn save_snapshot(&self, snapshot: &Snapshot, expected_revision: u64) -> Result<()>;

    /// Whether a document has been persisted.
    fn exists(&self) -> bool;

    /// Human-readable location, used in errors and messages.
    fn location(&self) -> String;
}

/// Backend chosen at runtime from configuration.
pub enum ConfiguredBackend {
    Json(FsBackend),
    Sqlite(SqliteBackend),
}

impl StorageBackend for ConfiguredBackend {
    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        match self {
            ConfiguredBackend::Json(b) => b.load_snapshot(),
            ConfiguredBackend::Sqlite(b) => b.load_snapshot(),
        }
    }

    fn save_snapshot(&self, snapshot: &Snapshot, expected_revision: u64) -> Result<()> {
        match self {
            ConfiguredBackend::Json(b) => b.save_snapshot(snapshot, expected_revision),
            ConfiguredBackend::Sqlite(b) => b.save_snapshot(snapshot, expected_revision),
        }
    }

    fn exists(&self) -> bool {
        match self {
            ConfiguredBackend::Json(b) => b.exists(),
            ConfiguredBackend::Sqlite(b) => b.exists(),
        }
    }

    fn location(&self) -> String {
        match self {
            ConfiguredBackend::Json(b) => b.location(),
            ConfiguredBackend::Sqlite(b) => b.location(),
        }
    }
}

pub struct ReviewStore<B: StorageBackend> {
    pub(crate) backend: B,
}

impl<B: StorageBackend> ReviewStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the current snapshot; an absent document is an empty snapshot.
    pub fn load(&self) -> Result<Snapshot> {
        let snapshot = self.backend.load_snapshot()?.unwrap_or_default();
        tracing::debug!(
            location = %self.backend.location(),
            revision = snapshot.revision,
            items = snapshot.intervals.len(),
            skills = snapshot.mastery.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Persist `snapshot` and advance its revision.
    ///
    /// On failure the snapshot keeps its original revision.
    pub fn save(&mut self, snapshot: &mut Snapshot) -> Result<()> {
        let expected = snapshot.revision;
        snapshot.revision = expected + 1;

        if let Err(err) = self.backend.save_snapshot(snapshot, expected) {
            snapshot.revision = expected;
            if let SpacedError::Conflict { expected, found } = &err {
                tracing::warn!(expected, found, "concurrent modification detected");
            }
            return Err(err);
        }

        tracing::debug!(
            location = %self.backend.location(),
            revision = snapshot.revision,
            "saved snapshot"
        );
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.backend.exists()
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::{MasteryRecord, ReviewRecord};

    fn populated() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot
            .intervals
            .insert("qrs-1".into(), ReviewRecord::new(30, 1_000));
        snapshot
            .mastery
            .insert("ecg-basics".into(), MasteryRecord::new(3, 2));
        snapshot
    }

    #[test]
    fn load_missing_document_is_empty() {
        let store = ReviewStore::with_backend(MemBackend::new());
        let snapshot = store.load().unwrap();
        assert_eq!(snapshot, Snapshot::default());
        assert!(!store.exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = ReviewStore::with_backend(MemBackend::new());
        let mut snapshot = populated();
        store.save(&mut snapshot).unwrap();

        assert_eq!(snapshot.revision, 1);
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn stale_snapshot_conflicts() {
        let mut store = ReviewStore::with_backend(MemBackend::new());
        let mut first = store.load().unwrap();
        let mut second = store.load().unwrap();

        first.intervals.insert("a".into(), ReviewRecord::new(10, 1));
        store.save(&mut first).unwrap();

        second.intervals.insert("b".into(), ReviewRecord::new(10, 1));
        let err = store.save(&mut second).unwrap_err();
        assert!(matches!(
            err,
            SpacedError::Conflict {
                expected: 0,
                found: 1
            }
        ));
        assert_eq!(second.revision, 0);

        let persisted = store.load().unwrap();
        assert!(persisted.intervals.contains_key("a"));
        assert!(!persisted.intervals.contains_key("b"));
    }

    #[test]
    fn failed_write_keeps_revision() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = ReviewStore::with_backend(backend);
        let mut snapshot = populated();

        assert!(store.save(&mut snapshot).is_err());
        assert_eq!(snapshot.revision, 0);
        assert!(!store.exists());
    }

    #[test]
    fn corrupt_document_is_propagated() {
        let backend = MemBackend::new();
        backend.set_corrupt(true);
        let store = ReviewStore::with_backend(backend);
        assert!(matches!(
            store.load(),
            Err(SpacedError::StoreCorrupt { .. })
        ));
    }
}
