//! Output formatting. Every function returns a `String` so the handlers own
//! the actual printing and tests can inspect the text.

use super::styles;
use serde::Serialize;
use spacedapp::api::{AttemptOutcome, CmdMessage, MessageLevel, RatingOutcome, Recommendation};
use spacedapp::config::SpacedConfig;
use spacedapp::error::{Result, SpacedError};
use spacedapp::init::Scope;
use std::collections::BTreeMap;
use std::path::Path;

pub(super) fn json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

pub(super) fn error_json(err: &SpacedError, pretty: bool) -> String {
    let envelope = ErrorEnvelope {
        error: ErrorBody {
            code: err.code(),
            message: err.to_string(),
        },
    };
    // Fixed body if serialization fails
    json(&envelope, pretty).unwrap_or_else(|_| {
        format!(r#"{{"error":{{"code":"{}","message":""}}}}"#, err.code())
    })
}

pub(super) fn messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => styles::info(),
            MessageLevel::Success => styles::success(),
            MessageLevel::Warning => styles::warning(),
        };
        out.push_str(&style.apply_to(&message.content).to_string());
        out.push('\n');
    }
    out
}

pub(super) fn rating(outcome: &RatingOutcome) -> String {
    let result = &outcome.interval;
    let mut out = format!(
        "{}  {}  {} {}\n",
        styles::item().apply_to(&result.item_id),
        result.rating,
        styles::interval().apply_to(format_seconds(result.next_interval)),
        styles::info().apply_to(format!(
            "(was {})",
            format_seconds(result.previous_interval)
        )),
    );
    if let (Some(skill), Some(pct)) = (&outcome.skill, outcome.mastery) {
        out.push_str(&mastery_line(skill, pct, 0));
    }
    out
}

pub(super) fn attempt(outcome: &AttemptOutcome) -> String {
    mastery_line(&outcome.skill_id, outcome.mastery, 0)
}

pub(super) fn mastery(snapshot: &BTreeMap<String, f64>) -> String {
    let width = snapshot.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    snapshot
        .iter()
        .map(|(skill, pct)| mastery_line(skill, *pct, width))
        .collect()
}

fn mastery_line(skill: &str, pct: f64, width: usize) -> String {
    format!(
        "{:<width$}  {}\n",
        skill,
        styles::mastery(pct).apply_to(format!("{:>6.2}%", pct)),
        width = width,
    )
}

pub(super) fn due(items: &[String]) -> String {
    items
        .iter()
        .map(|id| format!("{}\n", styles::item().apply_to(id)))
        .collect()
}

pub(super) fn recommendations(ranked: &[Recommendation]) -> String {
    let width = ranked
        .iter()
        .map(|r| r.item_id.chars().count())
        .max()
        .unwrap_or(0);
    ranked
        .iter()
        .map(|r| {
            format!(
                "{:<width$}  {}\n",
                r.item_id,
                styles::mastery(r.mastery).apply_to(format!("{:>6.2}%", r.mastery)),
                width = width,
            )
        })
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ConfigView<'a> {
    pub scope: Scope,
    pub data_path: &'a Path,
    pub config: &'a SpacedConfig,
}

pub(super) fn config(view: &ConfigView<'_>) -> String {
    let cfg = view.config;
    let backend = match cfg.store.backend {
        spacedapp::config::BackendKind::Json => "json",
        spacedapp::config::BackendKind::Sqlite => "sqlite",
    };
    let scope = match view.scope {
        Scope::Project => "project",
        Scope::Global => "global",
    };
    let lines = [
        ("scope", scope.to_string()),
        ("data_path", view.data_path.display().to_string()),
        ("store.backend", backend.to_string()),
        ("scheduler.fail_interval", cfg.scheduler.fail_interval.to_string()),
        ("scheduler.hard_floor", cfg.scheduler.hard_floor.to_string()),
        ("scheduler.good_floor", cfg.scheduler.good_floor.to_string()),
        ("scheduler.hard_growth", cfg.scheduler.hard_growth.to_string()),
        ("scheduler.good_growth", cfg.scheduler.good_growth.to_string()),
        ("output.json_pretty", cfg.output.json_pretty.to_string()),
    ];
    lines
        .iter()
        .map(|(key, value)| format!("{} = {}\n", styles::info().apply_to(key), value))
        .collect()
}

/// Compact human form of a duration: `45s`, `2m 30s`, `3h 5m`, `4d 2h`.
pub(super) fn format_seconds(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let (major, major_unit, minor, minor_unit) = if seconds >= DAY {
        (seconds / DAY, "d", (seconds % DAY) / HOUR, "h")
    } else if seconds >= HOUR {
        (seconds / HOUR, "h", (seconds % HOUR) / MINUTE, "m")
    } else if seconds >= MINUTE {
        (seconds / MINUTE, "m", seconds % MINUTE, "s")
    } else {
        return format!("{}s", seconds);
    };

    if minor == 0 {
        format!("{}{}", major, major_unit)
    } else {
        format!("{}{} {}{}", major, major_unit, minor, minor_unit)
    }
}
