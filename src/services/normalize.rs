// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw Strava activity entries to [`ActivityRecord`]s.
//!
//! Normalization is all-or-nothing: one bad entry rejects the whole batch,
//! so a calendar is never built with silently missing activities.

use serde::Deserialize;
use serde_json::Value;

use crate::config::CalendarSettings;
use crate::models::{ActivityKind, ActivityMetrics, ActivityRecord};
use crate::time_utils::parse_timestamp;

/// Fields read from a Strava summary activity.
#[derive(Debug, Deserialize)]
struct RawActivity {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    activity_type: Option<String>,
    #[serde(default)]
    sport_type: Option<String>,
    start_date: String,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    average_watts: Option<f64>,
    #[serde(default)]
    suffer_score: Option<f64>,
}

/// Data-integrity errors in a batch of raw activities.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("entry {index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry {index}, activity {id}: unparseable start_date {value:?}")]
    InvalidTimestamp { index: usize, id: u64, value: String },

    #[error("entry {index}, activity {id}: negative {field} ({value})")]
    NegativeValue {
        index: usize,
        id: u64,
        field: &'static str,
        value: f64,
    },

    #[error("entry {index}, activity {id}: missing activity type")]
    MissingType { index: usize, id: u64 },
}

/// Normalize a batch of raw activity entries.
pub fn normalize(
    raw: &[Value],
    settings: &CalendarSettings,
) -> Result<Vec<ActivityRecord>, NormalizeError> {
    let records = raw
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(index, entry, settings))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = records.len(), "Normalized activities");
    Ok(records)
}

fn normalize_entry(
    index: usize,
    entry: &Value,
    settings: &CalendarSettings,
) -> Result<ActivityRecord, NormalizeError> {
    let raw = RawActivity::deserialize(entry)
        .map_err(|source| NormalizeError::Malformed { index, source })?;
    let id = raw.id;

    let start = parse_timestamp(&raw.start_date).ok_or_else(|| NormalizeError::InvalidTimestamp {
        index,
        id,
        value: raw.start_date.clone(),
    })?;

    let kind = raw
        .activity_type
        .as_deref()
        .or(raw.sport_type.as_deref())
        .map(ActivityKind::from_strava_type)
        .ok_or(NormalizeError::MissingType { index, id })?;

    let metrics = ActivityMetrics {
        distance_meters: non_negative(index, id, "distance", raw.distance)?,
        average_power_watts: non_negative(index, id, "average_watts", raw.average_watts)?,
        effort_score: non_negative(index, id, "suffer_score", raw.suffer_score)?,
    };

    Ok(ActivityRecord::new(
        id,
        raw.name.unwrap_or_default(),
        kind,
        start.with_timezone(&settings.timezone),
        metrics,
        settings,
    ))
}

fn non_negative(
    index: usize,
    id: u64,
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, NormalizeError> {
    match value {
        Some(v) if v < 0.0 => Err(NormalizeError::NegativeValue {
            index,
            id,
            field,
            value: v,
        }),
        other => Ok(other),
    }
}
