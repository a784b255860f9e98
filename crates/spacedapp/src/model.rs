//! # Data Model
//!
//! The whole review state lives in one [`Snapshot`]: per-item scheduling
//! ([`ReviewRecord`]) and per-skill mastery counters ([`MasteryRecord`]).
//!
//! ## Persisted Shape
//!
//! Records are serialized as two-element arrays so documents stay
//! compatible with existing `data.json` files:
//!
//! ```text
//! {
//!   "intervals": { "<itemId>":  [intervalSeconds, lastReviewedAt] },
//!   "mastery":   { "<skillId>": [scoreSum, attempts] },
//!   "revision":  3
//! }
//! ```
//!
//! `revision` is optional on read (defaults to 0) and is bumped on every
//! successful save. See [`crate::store`] for how it is used.

use crate::error::{Result, SpacedError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Caller feedback on a single review attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    Fail,
    Hard,
    Good,
}

/// Highest number of points a single attempt can contribute.
pub const MAX_POINTS: u64 = 2;

impl Rating {
    pub fn points(self) -> u8 {
        match self {
            Rating::Fail => 0,
            Rating::Hard => 1,
            Rating::Good => 2,
        }
    }

    pub fn from_points(points: i64) -> Result<Self> {
        match points {
            0 => Ok(Rating::Fail),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            other => Err(SpacedError::InvalidRating(other.to_string())),
        }
    }

    /// Interpret a raw request value.
    ///
    /// Anything that is not a number is a missing field; a number outside
    /// `{0, 1, 2}` (including fractions such as `1.5`) is an invalid rating.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::from_points(i)
                } else if let Some(f) = n.as_f64() {
                    Self::from_float(f)
                } else {
                    Err(SpacedError::InvalidRating(n.to_string()))
                }
            }
            _ => Err(SpacedError::MissingField("rating")),
        }
    }

    fn from_float(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(SpacedError::MissingField("rating"));
        }
        if value.fract() == 0.0 && (0.0..=2.0).contains(&value) {
            Self::from_points(value as i64)
        } else {
            Err(SpacedError::InvalidRating(value.to_string()))
        }
    }
}

impl FromStr for Rating {
    type Err = SpacedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Self::from_points(i);
        }
        match s.parse::<f64>() {
            Ok(f) => Self::from_float(f),
            Err(_) => Err(SpacedError::MissingField("rating")),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.points()
    }
}

impl TryFrom<u8> for Rating {
    type Error = SpacedError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_points(i64::from(value))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Fail => "fail",
            Rating::Hard => "hard",
            Rating::Good => "good",
        };
        write!(f, "{}", label)
    }
}

/// Scheduling state of one item. The item id is the key in [`Snapshot::intervals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, i64)", into = "(u64, i64)")]
pub struct ReviewRecord {
    pub interval_seconds: u64,
    /// Epoch seconds.
    pub last_reviewed_at: i64,
}

impl ReviewRecord {
    pub fn new(interval_seconds: u64, last_reviewed_at: i64) -> Self {
        Self {
            interval_seconds,
            last_reviewed_at,
        }
    }
}

impl From<(u64, i64)> for ReviewRecord {
    fn from((interval_seconds, last_reviewed_at): (u64, i64)) -> Self {
        Self::new(interval_seconds, last_reviewed_at)
    }
}

impl From<ReviewRecord> for (u64, i64) {
    fn from(record: ReviewRecord) -> Self {
        (record.interval_seconds, record.last_reviewed_at)
    }
}

/// Running mastery counters of one skill. The skill id is the key in [`Snapshot::mastery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct MasteryRecord {
    pub score_sum: u64,
    pub attempts: u64,
}

impl MasteryRecord {
    pub fn new(score_sum: u64, attempts: u64) -> Self {
        Self {
            score_sum,
            attempts,
        }
    }
}

impl From<(u64, u64)> for MasteryRecord {
    fn from((score_sum, attempts): (u64, u64)) -> Self {
        Self::new(score_sum, attempts)
    }
}

impl From<MasteryRecord> for (u64, u64) {
    fn from(record: MasteryRecord) -> Self {
        (record.score_sum, record.attempts)
    }
}

/// In-memory image of the persisted document for a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub intervals: BTreeMap<String, ReviewRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mastery: BTreeMap<String, MasteryRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revision: u64,
}

/// Absent and `null` sections both read as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_interval(&self, item_id: &str) -> u64 {
        self.intervals
            .get(item_id)
            .map(|record| record.interval_seconds)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rating_from_json_accepts_valid_numbers() {
        assert_eq!(Rating::from_json(&json!(0)).unwrap(), Rating::Fail);
        assert_eq!(Rating::from_json(&json!(1)).unwrap(), Rating::Hard);
        assert_eq!(Rating::from_json(&json!(2.0)).unwrap(), Rating::Good);
    }

    #[test]
    fn rating_from_json_rejects_non_numbers_as_missing() {
        for value in [json!("2"), json!(null), json!(true), json!([1])] {
            let err = Rating::from_json(&value).unwrap_err();
            assert!(matches!(err, SpacedError::MissingField("rating")));
        }
    }

    #[test]
    fn rating_from_json_rejects_out_of_range() {
        for value in [json!(3), json!(-1), json!(1.5), json!(u64::MAX)] {
            let err = Rating::from_json(&value).unwrap_err();
            assert!(matches!(err, SpacedError::InvalidRating(_)), "{value}");
        }
    }

    #[test]
    fn rating_from_str_distinguishes_zero_from_garbage() {
        assert_eq!("0".parse::<Rating>().unwrap(), Rating::Fail);
        assert_eq!(" 2 ".parse::<Rating>().unwrap(), Rating::Good);
        assert!(matches!(
            "abc".parse::<Rating>(),
            Err(SpacedError::MissingField("rating"))
        ));
        assert!(matches!(
            "NaN".parse::<Rating>(),
            Err(SpacedError::MissingField("rating"))
        ));
        assert!(matches!(
            "3".parse::<Rating>(),
            Err(SpacedError::InvalidRating(_))
        ));
    }

    #[test]
    fn snapshot_uses_tuple_encoding() {
        let mut snapshot = Snapshot::new();
        snapshot
            .intervals
            .insert("qrs-1".into(), ReviewRecord::new(30, 1_700_000_000));
        snapshot
            .mastery
            .insert("ecg-basics".into(), MasteryRecord::new(3, 2));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["intervals"]["qrs-1"], json!([30, 1_700_000_000]));
        assert_eq!(value["mastery"]["ecg-basics"], json!([3, 2]));
    }

    #[test]
    fn snapshot_reads_documents_without_revision() {
        let raw = r#"{"intervals":{"x":[100,50]},"mastery":{}}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.intervals["x"], ReviewRecord::new(100, 50));
    }

    #[test]
    fn snapshot_treats_null_sections_as_empty() {
        let raw = r#"{"intervals":null,"mastery":null,"revision":null}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot, Snapshot::default());

        let raw = r#"{"intervals":{"x":[10,0]},"mastery":null}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.intervals["x"], ReviewRecord::new(10, 0));
        assert!(snapshot.mastery.is_empty());
    }

    #[test]
    fn snapshot_still_rejects_wrong_section_types() {
        let raw = r#"{"intervals":[1,2]}"#;
        assert!(serde_json::from_str::<Snapshot>(raw).is_err());
    }

    #[test]
    fn previous_interval_defaults_to_zero() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot.previous_interval("unknown"), 0);
    }
}
