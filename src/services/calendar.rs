// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month calendar layout.
//!
//! Builds a Monday-first grid for one month, files each activity under its
//! bucket date and attaches week and month aggregates.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{ActivityRecord, DaySlot, MonthOption, MonthView, WeekNumber, WeekRow};
use crate::services::aggregate::{aggregate_month, aggregate_range};
use crate::time_utils::{days_in_month, in_month, month_name};

/// Calendar construction errors.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Build the calendar view of one month.
pub fn build_month(
    year: i32,
    month: u32,
    records: &[ActivityRecord],
) -> Result<MonthView, CalendarError> {
    let invalid = || CalendarError::InvalidMonth { year, month };
    let day_count = days_in_month(year, month).ok_or_else(invalid)? as usize;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let lead = first.weekday().num_days_from_monday() as usize;

    let by_day = group_by_day(records, year, month);

    let rows = (lead + day_count).div_ceil(7);
    let weeks = (0..rows)
        .map(|row| {
            let days: [DaySlot; 7] = std::array::from_fn(|col| {
                let cell = row * 7 + col;
                if cell < lead || cell >= lead + day_count {
                    return DaySlot::Adjacent;
                }
                let day = (cell - lead + 1) as u32;
                match NaiveDate::from_ymd_opt(year, month, day) {
                    Some(date) => DaySlot::Day {
                        date,
                        activities: by_day.get(&date).cloned().unwrap_or_default(),
                    },
                    None => DaySlot::Adjacent,
                }
            });
            build_week(days, records)
        })
        .collect::<Vec<_>>();

    tracing::debug!(year, month, weeks = weeks.len(), "Built month calendar");

    Ok(MonthView {
        year,
        month,
        weeks,
        summary: aggregate_month(records, year, month),
    })
}

/// In-month activities keyed by bucket date, each day ordered by start time
/// and then id.
fn group_by_day(
    records: &[ActivityRecord],
    year: i32,
    month: u32,
) -> BTreeMap<NaiveDate, Vec<ActivityRecord>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<ActivityRecord>> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| in_month(r.bucket_date(), year, month))
    {
        by_day
            .entry(record.bucket_date())
            .or_default()
            .push(record.clone());
    }

    for activities in by_day.values_mut() {
        activities.sort_by(|a, b| {
            a.start_time()
                .cmp(b.start_time())
                .then_with(|| a.id().cmp(&b.id()))
        });
    }
    by_day
}

fn build_week(days: [DaySlot; 7], records: &[ActivityRecord]) -> WeekRow {
    let mut row = WeekRow {
        days,
        week_number: WeekNumber::Unknown,
        summary: Default::default(),
    };

    if let Some((first, last)) = row.visible_range() {
        row.week_number = week_number_of(first);
        row.summary = aggregate_range(records, first, last);
    }
    row
}

/// ISO week of the Monday on or before `day`.
fn week_number_of(day: NaiveDate) -> WeekNumber {
    let offset = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(offset))
        .map(|monday| WeekNumber::Iso(monday.iso_week().week()))
        .unwrap_or(WeekNumber::Unknown)
}

/// Months selectable in the dashboard, newest first.
///
/// Covers every year from `today` back to the year of `earliest`; the current
/// year only lists months up to the current one.
pub fn available_months(today: NaiveDate, earliest: NaiveDate) -> Vec<MonthOption> {
    (earliest.year()..=today.year())
        .rev()
        .flat_map(|year| {
            let last = if year == today.year() { today.month() } else { 12 };
            (1..=last).rev().map(move |month| MonthOption {
                year,
                month,
                name: month_name(month),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarSettings;
    use crate::models::{ActivityKind, ActivityMetrics};
    use chrono::{TimeZone, Weekday};
    use chrono_tz::America::Chicago;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ride_at(id: u64, (y, m, d, h, min): (i32, u32, u32, u32, u32), meters: f64) -> ActivityRecord {
        ActivityRecord::new(
            id,
            format!("Ride {}", id),
            ActivityKind::Cycling,
            Chicago.with_ymd_and_hms(y, m, d, h, min, 0).unwrap(),
            ActivityMetrics {
                distance_meters: Some(meters),
                ..Default::default()
            },
            &CalendarSettings::default(),
        )
    }

    fn week_numbers(view: &MonthView) -> Vec<WeekNumber> {
        view.weeks.iter().map(|w| w.week_number).collect()
    }

    #[test]
    fn test_february_leap_year_layout() {
        let view = build_month(2024, 2, &[]).unwrap();
        assert_eq!(view.weeks.len(), 5);

        let first = &view.weeks[0].days;
        assert_eq!(first[0], DaySlot::Adjacent);
        assert_eq!(first[1], DaySlot::Adjacent);
        assert_eq!(first[2], DaySlot::Adjacent);
        assert_eq!(first[3].date(), Some(date(2024, 2, 1)));
        assert_eq!(date(2024, 2, 1).weekday(), Weekday::Thu);

        let dates: Vec<_> = view
            .weeks
            .iter()
            .flat_map(|w| w.days.iter().filter_map(DaySlot::date))
            .collect();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates.first(), Some(&date(2024, 2, 1)));
        assert_eq!(dates.last(), Some(&date(2024, 2, 29)));

        let last = &view.weeks[4].days;
        assert_eq!(last[3].date(), Some(date(2024, 2, 29)));
        assert!(last[4..].iter().all(|slot| *slot == DaySlot::Adjacent));

        assert_eq!(
            week_numbers(&view),
            vec![
                WeekNumber::Iso(5),
                WeekNumber::Iso(6),
                WeekNumber::Iso(7),
                WeekNumber::Iso(8),
                WeekNumber::Iso(9)
            ]
        );
    }

    #[test]
    fn test_month_starting_monday_has_no_lead() {
        // January 2024 starts on a Monday
        let view = build_month(2024, 1, &[]).unwrap();
        assert_eq!(view.weeks[0].days[0].date(), Some(date(2024, 1, 1)));
        assert_eq!(view.weeks[0].week_number, WeekNumber::Iso(1));
        assert_eq!(view.weeks.len(), 5);
    }

    #[test]
    fn test_six_row_month() {
        // September 2024 starts on a Sunday and has 30 days
        let view = build_month(2024, 9, &[]).unwrap();
        assert_eq!(view.weeks.len(), 6);
        assert!(view.weeks.iter().all(|w| w.days.len() == 7));
    }

    #[test]
    fn test_week_numbers_across_year_edges() {
        // Dec 30, 2024 is the Monday of ISO week 1 of 2025
        let dec = build_month(2024, 12, &[]).unwrap();
        assert_eq!(dec.weeks.last().unwrap().week_number, WeekNumber::Iso(1));

        // Jan 1, 2021 is a Friday in ISO week 53 of 2020
        let jan = build_month(2021, 1, &[]).unwrap();
        assert_eq!(jan.weeks[0].week_number, WeekNumber::Iso(53));
    }

    #[test]
    fn test_week_number_unrepresentable_monday() {
        let min = NaiveDate::MIN;
        if min.weekday() == Weekday::Mon {
            assert!(matches!(week_number_of(min), WeekNumber::Iso(_)));
        } else {
            assert_eq!(week_number_of(min), WeekNumber::Unknown);
        }
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            build_month(2024, 13, &[]),
            Err(CalendarError::InvalidMonth { month: 13, .. })
        ));
        assert!(build_month(2024, 0, &[]).is_err());
    }

    #[test]
    fn test_activities_sorted_within_day() {
        let records = vec![
            ride_at(30, (2024, 2, 14, 18, 0), 1000.0),
            ride_at(20, (2024, 2, 14, 7, 0), 1000.0),
            ride_at(10, (2024, 2, 14, 18, 0), 1000.0),
        ];

        let view = build_month(2024, 2, &records).unwrap();
        let slot = view
            .weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .find(|s| s.date() == Some(date(2024, 2, 14)))
            .unwrap();

        let ids: Vec<u64> = slot.activities().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![20, 10, 30]);

        // Same order regardless of input order
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(build_month(2024, 2, &reversed).unwrap().weeks, view.weeks);
    }

    #[test]
    fn test_late_night_activity_lands_on_previous_day() {
        // 1:30am on March 1st belongs to Feb 29th
        let records = vec![ride_at(1, (2024, 3, 1, 1, 30), 1609.34)];

        let feb = build_month(2024, 2, &records).unwrap();
        let last_week = feb.weeks.last().unwrap();
        assert_eq!(last_week.days[3].activities().len(), 1);
        assert_eq!(last_week.summary.distance_miles, 1.0);
        assert_eq!(feb.summary.distance_miles, 1.0);

        let mar = build_month(2024, 3, &records).unwrap();
        assert!(mar
            .weeks
            .iter()
            .all(|w| w.days.iter().all(|d| d.activities().is_empty())));
        assert_eq!(mar.summary.distance_miles, 0.0);
    }

    #[test]
    fn test_week_summary_covers_visible_days_only() {
        // Week row of Feb 26 - Mar 3: only Feb 26-29 are visible in February
        let records = vec![
            ride_at(1, (2024, 2, 27, 9, 0), 1609.34),
            ride_at(2, (2024, 3, 2, 9, 0), 1609.34 * 10.0),
        ];

        let feb = build_month(2024, 2, &records).unwrap();
        assert_eq!(feb.weeks[4].summary.distance_miles, 1.0);
        assert_eq!(feb.weeks[4].visible_range(), Some((date(2024, 2, 26), date(2024, 2, 29))));

        let mar = build_month(2024, 3, &records).unwrap();
        // March 2024 starts on a Friday: first row shows Mar 1-3
        assert!((mar.weeks[0].summary.distance_miles - 10.0).abs() < 1e-9);
        assert_eq!(mar.weeks[0].week_number, WeekNumber::Iso(9));
    }

    #[test]
    fn test_available_months_current_year_truncated() {
        let months = available_months(date(2025, 3, 15), date(2024, 1, 1));
        assert_eq!(months.len(), 3 + 12);
        assert_eq!(
            months[0],
            MonthOption {
                year: 2025,
                month: 3,
                name: "March"
            }
        );
        assert_eq!(months[2].month, 1);
        assert_eq!((months[3].year, months[3].month), (2024, 12));
        assert_eq!((months[14].year, months[14].month), (2024, 1));
    }

    #[test]
    fn test_available_months_single_year() {
        let months = available_months(date(2024, 1, 5), date(2024, 1, 1));
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].name, "January");
    }
}
