use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::mastery::snapshot_percentages;
use crate::store::{ReviewStore, StorageBackend};
use std::collections::BTreeMap;

/// Mastery percentage of every known skill. Read-only.
pub fn run<B: StorageBackend>(store: &ReviewStore<B>) -> Result<CmdResult<BTreeMap<String, f64>>> {
    let snapshot = store.load()?;
    let percentages = snapshot_percentages(&snapshot);

    let mut result = CmdResult::new(percentages);
    if result.value.is_empty() {
        result.add_message(CmdMessage::info("No mastery recorded yet."));
    }
    Ok(result)
}
