// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Month calendar layout.

use chrono::NaiveDate;
use std::fmt;

use crate::models::{ActivityRecord, Aggregate};

/// One cell of a calendar week.
#[derive(Debug, Clone, PartialEq)]
pub enum DaySlot {
    /// Day outside the displayed month, rendered empty.
    Adjacent,
    /// Day of the displayed month with its activities in start order.
    Day {
        date: NaiveDate,
        activities: Vec<ActivityRecord>,
    },
}

impl DaySlot {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DaySlot::Adjacent => None,
            DaySlot::Day { date, .. } => Some(*date),
        }
    }

    pub fn activities(&self) -> &[ActivityRecord] {
        match self {
            DaySlot::Adjacent => &[],
            DaySlot::Day { activities, .. } => activities,
        }
    }
}

/// ISO week number of a calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekNumber {
    Iso(u32),
    /// The Monday of the row could not be computed.
    Unknown,
}

impl WeekNumber {
    pub fn value(&self) -> Option<u32> {
        match self {
            WeekNumber::Iso(n) => Some(*n),
            WeekNumber::Unknown => None,
        }
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekNumber::Iso(n) => write!(f, "W{}", n),
            WeekNumber::Unknown => f.write_str("-"),
        }
    }
}

/// A Monday-to-Sunday row of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub days: [DaySlot; 7],
    pub week_number: WeekNumber,
    /// Aggregate over the days of this row that belong to the month
    pub summary: Aggregate,
}

impl WeekRow {
    /// First and last in-month dates of the row.
    pub fn visible_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.days.iter().filter_map(DaySlot::date);
        let first = dates.next()?;
        let last = dates.last().unwrap_or(first);
        Some((first, last))
    }
}

/// A rendered month: grid rows plus the month aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekRow>,
    pub summary: Aggregate,
}

/// Entry of the month picker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MonthOption {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
}
