use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::recommend::{recommend, Recommendation};
use crate::store::{ReviewStore, StorageBackend};

/// Due items, weakest first, optionally capped at `limit`. Read-only.
pub fn run<B: StorageBackend>(
    store: &ReviewStore<B>,
    now: i64,
    limit: Option<usize>,
) -> Result<CmdResult<Vec<Recommendation>>> {
    let snapshot = store.load()?;
    let mut ranked = recommend(&snapshot, now);
    let due = ranked.len();
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    tracing::debug!(now, due, returned = ranked.len(), "ranked due items");

    let mut result = CmdResult::new(ranked);
    if due == 0 {
        result.add_message(CmdMessage::info("Nothing due for review."));
    }
    Ok(result)
}
