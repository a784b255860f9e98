//! # Mastery Accumulation
//!
//! Each skill keeps a running `(score_sum, attempts)` pair. An attempt adds
//! the rating's points (0, 1 or 2) to the sum, so the fraction of the best
//! achievable score is `score_sum / (2 × attempts)`. Percentages are
//! rounded to two decimals; a skill with no attempts reports `0`.

use crate::model::{MasteryRecord, Rating, Snapshot, MAX_POINTS};
use std::collections::BTreeMap;

/// Add one attempt for `skill_id` and return the updated counters.
pub fn record_attempt(snapshot: &mut Snapshot, skill_id: &str, rating: Rating) -> MasteryRecord {
    let record = snapshot.mastery.entry(skill_id.to_string()).or_default();
    record.score_sum = record.score_sum.saturating_add(u64::from(rating.points()));
    record.attempts = record.attempts.saturating_add(1);
    *record
}

pub fn percentage(record: &MasteryRecord) -> f64 {
    if record.attempts == 0 {
        return 0.0;
    }
    let fraction = record.score_sum as f64 / (MAX_POINTS as f64 * record.attempts as f64);
    (fraction * 10_000.0).round() / 100.0
}

pub fn mastery_of(snapshot: &Snapshot, skill_id: &str) -> f64 {
    snapshot.mastery.get(skill_id).map(percentage).unwrap_or(0.0)
}

/// Percentage for every skill present in the snapshot.
pub fn snapshot_percentages(snapshot: &Snapshot) -> BTreeMap<String, f64> {
    snapshot
        .mastery
        .iter()
        .map(|(skill, record)| (skill.clone(), percentage(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_then_good_is_seventy_five_percent() {
        let mut snapshot = Snapshot::new();
        record_attempt(&mut snapshot, "ecg-basics", Rating::Hard);
        let record = record_attempt(&mut snapshot, "ecg-basics", Rating::Good);

        assert_eq!(record, MasteryRecord::new(3, 2));
        assert_eq!(mastery_of(&snapshot, "ecg-basics"), 75.0);
    }

    #[test]
    fn zero_attempts_reports_zero() {
        let mut snapshot = Snapshot::new();
        snapshot
            .mastery
            .insert("empty".into(), MasteryRecord::new(0, 0));
        assert_eq!(snapshot_percentages(&snapshot)["empty"], 0.0);
        assert_eq!(mastery_of(&snapshot, "unknown"), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 1 / (2 * 3) = 0.1666.. -> 16.67
        assert_eq!(percentage(&MasteryRecord::new(1, 3)), 16.67);
        // 2 / (2 * 3) = 0.3333.. -> 33.33
        assert_eq!(percentage(&MasteryRecord::new(2, 3)), 33.33);
    }

    #[test]
    fn percentages_stay_in_range() {
        let mut snapshot = Snapshot::new();
        let ratings = [Rating::Fail, Rating::Hard, Rating::Good];
        for i in 0..300 {
            record_attempt(&mut snapshot, "mixed", ratings[i % 3]);
            record_attempt(&mut snapshot, "perfect", Rating::Good);
            record_attempt(&mut snapshot, "zero", Rating::Fail);
        }
        for value in snapshot_percentages(&snapshot).values() {
            assert!((0.0..=100.0).contains(value));
        }
        assert_eq!(mastery_of(&snapshot, "perfect"), 100.0);
        assert_eq!(mastery_of(&snapshot, "zero"), 0.0);
        assert_eq!(mastery_of(&snapshot, "mixed"), 50.0);
    }
}
