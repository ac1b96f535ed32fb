// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Normalized activity model.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::fmt;

use crate::config::CalendarSettings;
use crate::time_utils::bucket_date;

/// Activity category.
///
/// Only cycling contributes distance and power to aggregates; every kind
/// contributes effort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Cycling,
    Yoga,
    /// Anything else, keeping the Strava type label (Run, WeightTraining, ...)
    Other(String),
}

impl ActivityKind {
    /// Map a Strava activity type to a kind.
    pub fn from_strava_type(raw: &str) -> Self {
        match raw {
            "Ride" => ActivityKind::Cycling,
            "Yoga" => ActivityKind::Yoga,
            other => ActivityKind::Other(other.to_string()),
        }
    }

    /// Strava type label.
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Cycling => "Ride",
            ActivityKind::Yoga => "Yoga",
            ActivityKind::Other(label) => label,
        }
    }

    pub fn is_cycling(&self) -> bool {
        matches!(self, ActivityKind::Cycling)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional numeric fields of an activity, in source units.
///
/// `None` means the source did not report the value. It is never the same
/// as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityMetrics {
    pub distance_meters: Option<f64>,
    pub average_power_watts: Option<f64>,
    pub effort_score: Option<f64>,
}

/// An activity after normalization.
///
/// Derived values (`distance_miles`, `bucket_date`) are computed once in
/// [`ActivityRecord::new`] and the record exposes no mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    id: u64,
    name: String,
    kind: ActivityKind,
    start_time: DateTime<Tz>,
    metrics: ActivityMetrics,
    distance_miles: Option<f64>,
    bucket_date: NaiveDate,
}

impl ActivityRecord {
    /// Build a record. `start_time` is converted into the settings' timezone
    /// before the bucket date is derived.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        kind: ActivityKind,
        start_time: DateTime<Tz>,
        metrics: ActivityMetrics,
        settings: &CalendarSettings,
    ) -> Self {
        let start_time = start_time.with_timezone(&settings.timezone);
        let distance_miles = metrics
            .distance_meters
            .map(|meters| meters / settings.meters_per_mile);

        Self {
            id,
            name: name.into(),
            kind,
            bucket_date: bucket_date(&start_time, settings.day_boundary_hour),
            start_time,
            metrics,
            distance_miles,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ActivityKind {
        &self.kind
    }

    /// Start time in the configured local timezone.
    pub fn start_time(&self) -> &DateTime<Tz> {
        &self.start_time
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.metrics.distance_meters
    }

    pub fn distance_miles(&self) -> Option<f64> {
        self.distance_miles
    }

    pub fn average_power_watts(&self) -> Option<f64> {
        self.metrics.average_power_watts
    }

    pub fn effort_score(&self) -> Option<f64> {
        self.metrics.effort_score
    }

    /// Local calendar day this activity counts toward.
    pub fn bucket_date(&self) -> NaiveDate {
        self.bucket_date
    }

    /// Short one-line label for a calendar cell.
    pub fn label(&self) -> String {
        match &self.kind {
            ActivityKind::Cycling => {
                let mut label = format!("🚲 {:.1}mi", self.distance_miles.unwrap_or(0.0));
                if let Some(watts) = self.metrics.average_power_watts {
                    label.push_str(&format!(" ({:.0}W)", watts));
                }
                label
            }
            ActivityKind::Yoga => format!("🧘 {}", self.name),
            ActivityKind::Other(_) => format!("💪 {}", self.name),
        }
    }
}
