//! # Due Items
//!
//! An item is due once the time elapsed since its last review reaches its
//! interval: `now - last_reviewed_at >= interval_seconds`. The boundary is
//! inclusive. Results follow the snapshot's key order, which callers should
//! not depend on.

use crate::model::{ReviewRecord, Snapshot};

pub fn is_due(record: &ReviewRecord, now: i64) -> bool {
    let elapsed = i128::from(now) - i128::from(record.last_reviewed_at);
    elapsed >= i128::from(record.interval_seconds)
}

pub fn compute_due(snapshot: &Snapshot, now: i64) -> Vec<String> {
    snapshot
        .intervals
        .iter()
        .filter(|(_, record)| is_due(record, now))
        .map(|(item_id, _)| item_id.clone())
        .collect()
}
