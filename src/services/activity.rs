// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity loading for a render request.
//!
//! Handles the core workflow:
//! 1. Fetch every page of activities in the configured window
//! 2. Normalize the whole batch (timezone, units, bucket dates)
//!
//! Nothing is cached between requests.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{CalendarSettings, Config};
use crate::error::Result;
use crate::models::ActivityRecord;
use crate::services::normalize::normalize;
use crate::services::strava::{ActivityWindow, StravaClient};

/// Fetches and normalizes a user's activities.
#[derive(Clone)]
pub struct ActivityLoader {
    strava: StravaClient,
    settings: CalendarSettings,
    activities_after: NaiveDate,
}

impl ActivityLoader {
    pub fn new(strava: StravaClient, config: &Config) -> Self {
        Self {
            strava,
            settings: config.calendar_settings(),
            activities_after: config.activities_after,
        }
    }

    /// Load all activities from the window start up to `now`.
    pub async fn load(&self, access_token: &str, now: DateTime<Utc>) -> Result<Vec<ActivityRecord>> {
        let window = ActivityWindow::since(self.activities_after, self.settings.timezone, now);
        tracing::info!(after = window.after, before = window.before, "Loading activities");

        let raw = self.strava.fetch_all_activities(access_token, &window).await?;
        let records = normalize(&raw, &self.settings)?;
        Ok(records)
    }
}
