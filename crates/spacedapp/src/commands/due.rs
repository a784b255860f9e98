use crate::commands::{CmdMessage, CmdResult};
use crate::due::compute_due;
use crate::error::Result;
use crate::store::{ReviewStore, StorageBackend};

/// Ids of items due at `now`. Read-only.
pub fn run<B: StorageBackend>(store: &ReviewStore<B>, now: i64) -> Result<CmdResult<Vec<String>>> {
    let snapshot = store.load()?;
    let due = compute_due(&snapshot, now);
    tracing::debug!(now, due = due.len(), tracked = snapshot.intervals.len(), "computed due set");

    let mut result = CmdResult::new(due);
    if result.value.is_empty() {
        result.add_message(CmdMessage::info("Nothing due for review."));
    }
    Ok(result)
}
