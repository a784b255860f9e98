use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Snapshot;
use crate::store::{ReviewStore, StorageBackend};

/// Persist an empty snapshot unless a document already exists.
/// Returns whether a document was created.
pub fn run<B: StorageBackend>(store: &mut ReviewStore<B>) -> Result<CmdResult<bool>> {
    if store.exists() {
        // Still validate what is there.
        store.load()?;
        return Ok(CmdResult::new(false).with_message(CmdMessage::info(format!(
            "Store already initialized at {}",
            store.location()
        ))));
    }

    let mut snapshot = Snapshot::new();
    store.save(&mut snapshot)?;
    Ok(CmdResult::new(true).with_message(CmdMessage::success(format!(
        "Initialized store at {}",
        store.location()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewRecord;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn creates_empty_document() {
        let mut store = ReviewStore::with_backend(MemBackend::new());
        let result = run(&mut store).unwrap();
        assert!(result.value);
        assert!(store.exists());
        assert!(store.load().unwrap().intervals.is_empty());
    }

    #[test]
    fn leaves_existing_document_alone() {
        let mut snapshot = Snapshot::new();
        snapshot.intervals.insert("x".into(), ReviewRecord::new(10, 0));
        let mut store = ReviewStore::with_backend(MemBackend::with_snapshot(snapshot));

        let result = run(&mut store).unwrap();
        assert!(!result.value);
        assert_eq!(store.backend().write_count(), 0);
        assert_eq!(store.load().unwrap().intervals.len(), 1);
    }
}
