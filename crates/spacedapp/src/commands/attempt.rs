use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::mastery;
use crate::model::Rating;
use crate::store::{ReviewStore, StorageBackend};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutcome {
    pub skill_id: String,
    pub mastery: f64,
}

pub fn run<B: StorageBackend>(
    store: &mut ReviewStore<B>,
    skill_id: &str,
    rating: Rating,
) -> Result<CmdResult<AttemptOutcome>> {
    let mut snapshot = store.load()?;
    let record = mastery::record_attempt(&mut snapshot, skill_id, rating);
    store.save(&mut snapshot)?;

    let percentage = mastery::percentage(&record);
    tracing::debug!(skill_id, %rating, attempts = record.attempts, percentage, "recorded attempt");

    Ok(CmdResult::new(AttemptOutcome {
        skill_id: skill_id.to_string(),
        mastery: percentage,
    })
    .with_message(CmdMessage::success(format!(
        "{}: {:.2}% after {} attempt(s)",
        skill_id, percentage, record.attempts
    ))))
}
