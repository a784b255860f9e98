//! # Interval Scheduling
//!
//! Maps a rating and the previous interval to the next interval, in seconds.
//!
//! | Rating | Next interval |
//! |--------|---------------|
//! | Fail   | `fail_interval` (10) |
//! | Hard   | `max(hard_floor, floor(previous × hard_growth))` (30, 1.4) |
//! | Good   | `max(good_floor, floor(previous × good_growth))` (60, 2.2) |
//!
//! When the product is not a finite, non-negative number the rating's floor
//! is used instead. With the default factors this only matters for
//! misconfigured growth values; a previous interval of zero simply yields
//! the floor through `max`.

use crate::config::SchedulerConfig;
use crate::model::Rating;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalResult {
    pub item_id: String,
    pub rating: Rating,
    pub previous_interval: u64,
    pub next_interval: u64,
    pub reviewed_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    config: SchedulerConfig,
}

impl IntervalScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn next_interval(&self, rating: Rating, previous: u64) -> u64 {
        match rating {
            Rating::Fail => self.config.fail_interval,
            Rating::Hard => grow(previous, self.config.hard_growth, self.config.hard_floor),
            Rating::Good => grow(previous, self.config.good_growth, self.config.good_floor),
        }
    }

    pub fn schedule(&self, item_id: &str, rating: Rating, previous: u64, now: i64) -> IntervalResult {
        IntervalResult {
            item_id: item_id.to_string(),
            rating,
            previous_interval: previous,
            next_interval: self.next_interval(rating, previous),
            reviewed_at: now,
        }
    }
}

fn grow(previous: u64, factor: f64, floor: u64) -> u64 {
    let scaled = (previous as f64 * factor).floor();
    if !scaled.is_finite() || scaled < 0.0 {
        return floor;
    }
    // `as` saturates at u64::MAX for out-of-range floats.
    floor.max(scaled as u64)
}
