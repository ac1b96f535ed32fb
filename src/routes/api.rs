// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::AccessToken;
use crate::models::{
    ActivityRecord, Aggregate, DaySlot, MonthOption, MonthView, SummaryText, WeekRow,
};
use crate::services::{available_months, build_month};
use crate::time_utils::month_name;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require a Strava credential).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calendar", get(get_calendar))
        .route("/api/months", get(get_months))
}

// ─── Calendar ────────────────────────────────────────────────

#[derive(Deserialize)]
struct CalendarQuery {
    /// Defaults to the current local year
    year: Option<i32>,
    /// Defaults to the current local month
    month: Option<u32>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub summary: SummaryResponse,
    pub weeks: Vec<WeekResponse>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub totals: Aggregate,
    pub text: SummaryText,
}

impl From<Aggregate> for SummaryResponse {
    fn from(totals: Aggregate) -> Self {
        Self {
            text: totals.summary(),
            totals,
        }
    }
}

#[derive(Serialize)]
pub struct WeekResponse {
    pub week_number: Option<u32>,
    /// "W7", or "-" when the week number is unknown
    pub label: String,
    pub summary: SummaryResponse,
    pub days: Vec<DayResponse>,
}

#[derive(Serialize)]
pub struct DayResponse {
    /// `None` for adjacent-month slots
    pub date: Option<NaiveDate>,
    pub day: Option<u32>,
    pub activities: Vec<ActivityResponse>,
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Local start time (RFC 3339 with offset)
    pub start_time: String,
    pub distance_miles: Option<f64>,
    pub average_power_watts: Option<f64>,
    pub effort_score: Option<f64>,
    pub label: String,
}

impl From<&ActivityRecord> for ActivityResponse {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            activity_type: record.kind().to_string(),
            start_time: record.start_time().to_rfc3339(),
            distance_miles: record.distance_miles(),
            average_power_watts: record.average_power_watts(),
            effort_score: record.effort_score(),
            label: record.label(),
        }
    }
}

impl From<&DaySlot> for DayResponse {
    fn from(slot: &DaySlot) -> Self {
        Self {
            date: slot.date(),
            day: slot.date().map(|d| d.day()),
            activities: slot.activities().iter().map(ActivityResponse::from).collect(),
        }
    }
}

impl From<&WeekRow> for WeekResponse {
    fn from(week: &WeekRow) -> Self {
        Self {
            week_number: week.week_number.value(),
            label: week.week_number.to_string(),
            summary: week.summary.into(),
            days: week.days.iter().map(DayResponse::from).collect(),
        }
    }
}

impl From<MonthView> for CalendarResponse {
    fn from(view: MonthView) -> Self {
        Self {
            year: view.year,
            month: view.month,
            month_name: month_name(view.month),
            summary: view.summary.into(),
            weeks: view.weeks.iter().map(WeekResponse::from).collect(),
        }
    }
}

/// Build the calendar for one month from a fresh fetch of the user's activities.
async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let now = Utc::now();
    let today = now.with_timezone(&state.config.timezone).date_naive();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());

    // Reject before spending any Strava calls
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(AppError::BadRequest(format!(
            "Invalid month {}-{:02}",
            year, month
        )));
    }

    tracing::debug!(year, month, "Building calendar");

    let records = state.loader.load(&token.0, now).await?;
    let view = build_month(year, month, &records)?;

    Ok(Json(view.into()))
}

// ─── Month Picker ────────────────────────────────────────────

#[derive(Serialize)]
pub struct MonthsResponse {
    pub months: Vec<MonthOption>,
}

/// Months available in the picker, newest first.
async fn get_months(
    State(state): State<Arc<AppState>>,
    Extension(_token): Extension<AccessToken>,
) -> Json<MonthsResponse> {
    let today = Utc::now()
        .with_timezone(&state.config.timezone)
        .date_naive();

    Json(MonthsResponse {
        months: available_months(today, state.config.activities_after),
    })
}
