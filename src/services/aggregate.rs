// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly and monthly activity statistics.
//!
//! - Distance: cycling only, summed in miles.
//! - Power: mean over cycling activities that reported power.
//! - Effort: summed over every activity that reported an effort score.
//!
//! Records are folded in slice order, so repeated calls over the same input
//! produce identical floating point results.

use chrono::NaiveDate;

use crate::models::{ActivityRecord, Aggregate};
use crate::time_utils::in_month;

/// Aggregate an arbitrary set of records.
pub fn aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut distance_miles = 0.0;
    let mut power_sum = 0.0;
    let mut power_count = 0u32;
    let mut effort_total: Option<f64> = None;

    for record in records {
        if record.kind().is_cycling() {
            distance_miles += record.distance_miles().unwrap_or(0.0);
            if let Some(watts) = record.average_power_watts() {
                power_sum += watts;
                power_count += 1;
            }
        }
        if let Some(effort) = record.effort_score() {
            *effort_total.get_or_insert(0.0) += effort;
        }
    }

    Aggregate {
        distance_miles,
        average_power_watts: (power_count > 0).then(|| power_sum / f64::from(power_count)),
        effort_total,
    }
}

/// Aggregate records whose bucket date lies in `start..=end`.
pub fn aggregate_range(records: &[ActivityRecord], start: NaiveDate, end: NaiveDate) -> Aggregate {
    aggregate(records.iter().filter(|r| {
        let day = r.bucket_date();
        day >= start && day <= end
    }))
}

/// Aggregate records whose bucket date falls in the given month.
///
/// Keyed on the bucket date, the same rule the day cells and week rows use,
/// so a 1am activity on the 1st counts toward the previous month.
pub fn aggregate_month(records: &[ActivityRecord], year: i32, month: u32) -> Aggregate {
    aggregate(
        records
            .iter()
            .filter(|r| in_month(r.bucket_date(), year, month)),
    )
}
