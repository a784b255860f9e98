//! # API Facade
//!
//! The request boundary of the review engine. Transports (the CLI, an HTTP
//! handler, a test) build requests and call into [`ReviewApi`]; nothing
//! behind it knows which transport is in use.
//!
//! ## Role and Responsibilities
//!
//! - **Validates requests** before any store access: an absent item id or a
//!   non-numeric rating is `MissingField`, a number outside `{0, 1, 2}` is
//!   `InvalidRating`. A rejected request never loads or writes the store.
//! - **Supplies the clock** (`now`) to the commands, with `*_at` variants for
//!   callers that need a fixed time.
//! - **Dispatches** to the command modules and returns their `CmdResult`s.
//!
//! ## Generic Over StorageBackend
//!
//! `ReviewApi<B: StorageBackend>` works the same over `FsBackend`,
//! `SqliteBackend` and `MemBackend`.

use crate::commands::{self, CmdResult};
use crate::error::{Result, SpacedError};
use crate::model::Rating;
use crate::scheduler::IntervalScheduler;
use crate::store::{ReviewStore, StorageBackend};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::commands::attempt::AttemptOutcome;
pub use crate::commands::rate::RatingOutcome;
pub use crate::commands::{CmdMessage, MessageLevel};
pub use crate::recommend::Recommendation;

/// A rating submission as it arrives from a transport.
///
/// Deserializes from bodies such as `{"itemId": "qrs-1", "rating": 2}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub rating: Value,
    /// Skill the item exercises; when present the rating also counts as a mastery attempt.
    #[serde(default)]
    pub skill: Option<String>,
}

impl RateRequest {
    pub fn new(item_id: impl Into<String>, rating: impl Into<Value>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            rating: rating.into(),
            skill: None,
        }
    }

    /// Build a request from textual arguments, keeping numbers numeric.
    pub fn from_args(item_id: impl Into<String>, rating: &str) -> Self {
        Self::new(item_id, value_from_arg(rating))
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    fn validate(&self) -> Result<(&str, Rating, Option<&str>)> {
        let item_id = self
            .item_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(SpacedError::MissingField("itemId"))?;
        let rating = Rating::from_json(&self.rating)?;
        let skill = self.skill.as_deref().filter(|s| !s.is_empty());
        Ok((item_id, rating, skill))
    }
}

/// Numbers become JSON numbers, anything else stays a string (and fails validation).
fn value_from_arg(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    match raw.parse::<f64>() {
        // Value::from maps non-finite floats to Null
        Ok(f) => Value::from(f),
        Err(_) => Value::String(raw.to_string()),
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}

/// The main API facade for review operations.
pub struct ReviewApi<B: StorageBackend> {
    store: ReviewStore<B>,
    scheduler: IntervalScheduler,
}

impl<B: StorageBackend> ReviewApi<B> {
    pub fn new(store: ReviewStore<B>, scheduler: IntervalScheduler) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &ReviewStore<B> {
        &self.store
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    pub fn submit_rating(&mut self, request: &RateRequest) -> Result<CmdResult<RatingOutcome>> {
        self.submit_rating_at(request, now())
    }

    pub fn submit_rating_at(
        &mut self,
        request: &RateRequest,
        now: i64,
    ) -> Result<CmdResult<RatingOutcome>> {
        let (item_id, rating, skill) = request.validate()?;
        commands::rate::run(&mut self.store, &self.scheduler, item_id, rating, skill, now)
    }

    pub fn record_attempt(
        &mut self,
        skill_id: &str,
        rating: Rating,
    ) -> Result<CmdResult<AttemptOutcome>> {
        if skill_id.is_empty() {
            return Err(SpacedError::MissingField("skillId"));
        }
        commands::attempt::run(&mut self.store, skill_id, rating)
    }

    pub fn mastery_snapshot(&self) -> Result<CmdResult<BTreeMap<String, f64>>> {
        commands::mastery::run(&self.store)
    }

    pub fn due_items(&self) -> Result<CmdResult<Vec<String>>> {
        self.due_items_at(now())
    }

    pub fn due_items_at(&self, now: i64) -> Result<CmdResult<Vec<String>>> {
        commands::due::run(&self.store, now)
    }

    pub fn recommend(&self, limit: Option<usize>) -> Result<CmdResult<Vec<Recommendation>>> {
        self.recommend_at(now(), limit)
    }

    pub fn recommend_at(
        &self,
        now: i64,
        limit: Option<usize>,
    ) -> Result<CmdResult<Vec<Recommendation>>> {
        commands::recommend::run(&self.store, now, limit)
    }

    pub fn init(&mut self) -> Result<CmdResult<bool>> {
        commands::init::run(&mut self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewRecord, Snapshot};
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn api() -> ReviewApi<MemBackend> {
        ReviewApi::new(
            ReviewStore::with_backend(MemBackend::new()),
            IntervalScheduler::default(),
        )
    }

    #[test]
    fn request_deserializes_from_json_body() {
        let request: RateRequest =
            serde_json::from_value(json!({"itemId": "qrs-1", "rating": 2})).unwrap();
        assert_eq!(request, RateRequest::new("qrs-1", 2));
    }

    #[test]
    fn out_of_range_rating_is_rejected_without_touching_store() {
        let mut api = api();
        let err = api
            .submit_rating_at(&RateRequest::new("qrs-1", 3), NOW)
            .unwrap_err();
        assert!(matches!(err, SpacedError::InvalidRating(_)));
        assert_eq!(api.store().backend().write_count(), 0);
        assert!(!api.store().exists());
    }

    #[test]
    fn missing_item_is_missing_field() {
        let mut api = api();
        let request: RateRequest = serde_json::from_value(json!({"rating": 1})).unwrap();
        let err = api.submit_rating_at(&request, NOW).unwrap_err();
        assert!(matches!(err, SpacedError::MissingField("itemId")));

        let err = api
            .submit_rating_at(&RateRequest::new("", 1), NOW)
            .unwrap_err();
        assert!(matches!(err, SpacedError::MissingField("itemId")));
    }

    #[test]
    fn non_numeric_rating_is_missing_field() {
        let mut api = api();
        let request: RateRequest =
            serde_json::from_value(json!({"itemId": "qrs-1", "rating": "2"})).unwrap();
        let err = api.submit_rating_at(&request, NOW).unwrap_err();
        assert!(matches!(err, SpacedError::MissingField("rating")));

        let request: RateRequest = serde_json::from_value(json!({"itemId": "qrs-1"})).unwrap();
        let err = api.submit_rating_at(&request, NOW).unwrap_err();
        assert!(matches!(err, SpacedError::MissingField("rating")));
    }

    #[test]
    fn validation_runs_before_store_load() {
        let backend = MemBackend::new();
        backend.set_corrupt(true);
        let mut api = ReviewApi::new(
            ReviewStore::with_backend(backend),
            IntervalScheduler::default(),
        );
        let err = api
            .submit_rating_at(&RateRequest::new("q", 9), NOW)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn from_args_keeps_numbers_numeric() {
        assert_eq!(RateRequest::from_args("a", "2").rating, json!(2));
        assert_eq!(RateRequest::from_args("a", "1.5").rating, json!(1.5));
        assert_eq!(RateRequest::from_args("a", "two").rating, json!("two"));
        assert_eq!(RateRequest::from_args("a", "NaN").rating, Value::Null);
    }

    #[test]
    fn rating_flow_end_to_end() {
        let mut api = api();
        let first = api
            .submit_rating_at(&RateRequest::new("qrs-1", 0), NOW)
            .unwrap();
        assert_eq!(first.value.interval.next_interval, 10);

        let second = api
            .submit_rating_at(&RateRequest::new("qrs-1", 1), NOW + 10)
            .unwrap();
        assert_eq!(second.value.interval.previous_interval, 10);
        assert_eq!(second.value.interval.next_interval, 30);

        assert!(api.due_items_at(NOW + 39).unwrap().value.is_empty());
        assert_eq!(
            api.due_items_at(NOW + 40).unwrap().value,
            vec!["qrs-1".to_string()]
        );
    }

    #[test]
    fn rating_with_skill_updates_mastery_snapshot() {
        let mut api = api();
        api.submit_rating_at(&RateRequest::new("q1", 1).with_skill("ecg-basics"), NOW)
            .unwrap();
        api.record_attempt("ecg-basics", Rating::Good).unwrap();

        let snapshot = api.mastery_snapshot().unwrap().value;
        assert_eq!(snapshot["ecg-basics"], 75.0);
    }

    #[test]
    fn empty_skill_is_ignored_on_rate_and_rejected_on_attempt() {
        let mut api = api();
        api.submit_rating_at(&RateRequest::new("q1", 2).with_skill(""), NOW)
            .unwrap();
        assert!(api.mastery_snapshot().unwrap().value.is_empty());

        let err = api.record_attempt("", Rating::Good).unwrap_err();
        assert!(matches!(err, SpacedError::MissingField("skillId")));
    }

    #[test]
    fn due_reads_existing_state() {
        let mut snapshot = Snapshot::new();
        snapshot
            .intervals
            .insert("x".into(), ReviewRecord::new(100, NOW - 150));
        snapshot
            .intervals
            .insert("y".into(), ReviewRecord::new(100, NOW - 50));
        let api = ReviewApi::new(
            ReviewStore::with_backend(MemBackend::with_snapshot(snapshot)),
            IntervalScheduler::default(),
        );
        assert_eq!(api.due_items_at(NOW).unwrap().value, vec!["x".to_string()]);
    }

    #[test]
    fn recommend_ranks_due_items_by_item_mastery() {
        let mut api = api();
        api.submit_rating_at(&RateRequest::new("strong", 2).with_skill("strong"), NOW)
            .unwrap();
        api.submit_rating_at(&RateRequest::new("weak", 0).with_skill("weak"), NOW)
            .unwrap();

        let later = NOW + 1_000;
        let ranked = api.recommend_at(later, None).unwrap().value;
        let ids: Vec<_> = ranked.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["weak", "strong"]);
        assert_eq!(ranked[1].mastery, 100.0);

        assert_eq!(api.recommend_at(later, Some(1)).unwrap().value.len(), 1);
        assert!(api.recommend_at(NOW, None).unwrap().value.is_empty());
    }
}
