use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::mastery;
use crate::model::{Rating, ReviewRecord};
use crate::scheduler::{IntervalResult, IntervalScheduler};
use crate::store::{ReviewStore, StorageBackend};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingOutcome {
    #[serde(flatten)]
    pub interval: IntervalResult,
    /// Mastery percentage of the accompanying skill, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery: Option<f64>,
}

/// Rate an item: compute its next interval, stamp it with `now` and persist.
///
/// When `skill` is given the same rating also counts as a mastery attempt
/// for that skill, persisted by the same save.
pub fn run<B: StorageBackend>(
    store: &mut ReviewStore<B>,
    scheduler: &IntervalScheduler,
    item_id: &str,
    rating: Rating,
    skill: Option<&str>,
    now: i64,
) -> Result<CmdResult<RatingOutcome>> {
    let mut snapshot = store.load()?;
    let is_new = !snapshot.intervals.contains_key(item_id);

    let previous = snapshot.previous_interval(item_id);
    let interval = scheduler.schedule(item_id, rating, previous, now);
    snapshot.intervals.insert(
        item_id.to_string(),
        ReviewRecord::new(interval.next_interval, now),
    );

    let mastery = skill.map(|skill_id| {
        let record = mastery::record_attempt(&mut snapshot, skill_id, rating);
        mastery::percentage(&record)
    });

    store.save(&mut snapshot)?;
    tracing::debug!(item_id, %rating, previous, next = interval.next_interval, "rated item");

    let mut result = CmdResult::new(RatingOutcome {
        skill: skill.map(str::to_string),
        mastery,
        interval,
    });
    if is_new {
        result.add_message(CmdMessage::info(format!("New review item: {}", item_id)));
    }
    result.add_message(CmdMessage::success(format!(
        "Rated {} as {}: next review in {}s",
        item_id, rating, result.value.interval.next_interval
    )));
    Ok(result)
}
