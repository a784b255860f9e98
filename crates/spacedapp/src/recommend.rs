//! # Recommendations
//!
//! Orders the due set so the weakest material comes first: due items are
//! sorted by ascending mastery percentage, looked up under the item's own
//! id. Items without a mastery record count as 0%. The sort is stable, so
//! ties keep due-set order.

use crate::due::compute_due;
use crate::mastery::snapshot_percentages;
use crate::model::Snapshot;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub item_id: String,
    pub mastery: f64,
}

pub fn rank(due: Vec<String>, percentages: &BTreeMap<String, f64>) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = due
        .into_iter()
        .map(|item_id| {
            let mastery = percentages.get(&item_id).copied().unwrap_or(0.0);
            Recommendation { item_id, mastery }
        })
        .collect();
    ranked.sort_by(|a, b| a.mastery.total_cmp(&b.mastery));
    ranked
}

pub fn recommend(snapshot: &Snapshot, now: i64) -> Vec<Recommendation> {
    rank(compute_due(snapshot, now), &snapshot_percentages(snapshot))
}
