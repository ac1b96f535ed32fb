// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod calendar;
pub mod stats;

pub use activity::{ActivityKind, ActivityMetrics, ActivityRecord};
pub use calendar::{DaySlot, MonthOption, MonthView, WeekNumber, WeekRow};
pub use stats::{Aggregate, SummaryText};
