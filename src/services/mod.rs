// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod aggregate;
pub mod calendar;
pub mod normalize;
pub mod strava;

pub use activity::ActivityLoader;
pub use aggregate::{aggregate, aggregate_month, aggregate_range};
pub use calendar::{available_months, build_month, CalendarError};
pub use normalize::{normalize, NormalizeError};
pub use strava::{ActivityWindow, StravaClient};
