use super::StorageBackend;
use crate::error::{Result, SpacedError};
use crate::model::Snapshot;
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell`/`Cell` for interior mutability since the store is
/// single-threaded. This keeps `StorageBackend` on `&self` like the
/// file-backed implementations.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<Snapshot>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    corrupt: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let backend = Self::new();
        *backend.document.borrow_mut() = Some(snapshot);
        backend
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make the document unreadable, as if it failed to parse.
    pub fn set_corrupt(&self, corrupt: bool) {
        self.corrupt.set(corrupt);
    }

    /// Direct view of the persisted snapshot, bypassing revision checks.
    pub fn persisted(&self) -> Option<Snapshot> {
        self.document.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        if self.corrupt.get() {
            return Err(SpacedError::StoreCorrupt {
                location: self.location(),
                reason: "simulated corruption".to_string(),
            });
        }
        Ok(self.document.borrow().clone())
    }

    fn save_snapshot(&self, snapshot: &Snapshot, expected_revision: u64) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SpacedError::StoreWrite {
                location: self.location(),
                source: "Simulated write error".into(),
            });
        }

        let mut document = self.document.borrow_mut();
        let found = document.as_ref().map(|s| s.revision).unwrap_or(0);
        if found != expected_revision {
            return Err(SpacedError::Conflict {
                expected: expected_revision,
                found,
            });
        }

        *document = Some(snapshot.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.document.borrow().is_some()
    }

    fn location(&self) -> String {
        "memory://data.json".to_string()
    }
}
