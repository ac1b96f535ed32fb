// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamp parsing, month math and day bucketing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Naive layouts accepted for timestamps that carry no offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an activity timestamp.
///
/// RFC 3339 strings keep their offset; naive strings are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Calendar day an activity starting at `start_local` counts toward.
///
/// Starts before `boundary_hour` local time belong to the previous day.
pub fn bucket_date<Tz: TimeZone>(start_local: &DateTime<Tz>, boundary_hour: u32) -> NaiveDate {
    let date = start_local.date_naive();
    if start_local.hour() < boundary_hour {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Number of days in a month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?;
    match month {
        4 | 6 | 9 | 11 => Some(30),
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => Some(29),
        2 => Some(28),
        _ => Some(31),
    }
}

/// English month name for 1..=12.
pub fn month_name(month: u32) -> &'static str {
    chrono::Month::try_from(u8::try_from(month).unwrap_or(0))
        .map(|m| m.name())
        .unwrap_or("")
}

/// Whether `date` falls in the given year and month.
pub fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    fn chicago(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<chrono_tz::Tz> {
        Chicago.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let parsed = parse_timestamp("2024-01-15T10:30:00-06:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 16, 30, 0).unwrap());

        let parsed = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:30:00.000"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00Z"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_bucket_date_boundary() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let prev = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();

        assert_eq!(bucket_date(&chicago(2024, 5, 10, 0, 0), 3), prev);
        assert_eq!(bucket_date(&chicago(2024, 5, 10, 2, 59), 3), prev);
        assert_eq!(bucket_date(&chicago(2024, 5, 10, 3, 0), 3), day);
        assert_eq!(bucket_date(&chicago(2024, 5, 10, 23, 59), 3), day);
    }

    #[test]
    fn test_bucket_date_crosses_month_and_year() {
        assert_eq!(
            bucket_date(&chicago(2024, 3, 1, 1, 0), 3),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            bucket_date(&chicago(2025, 1, 1, 2, 30), 3),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_bucket_date_zero_boundary_never_shifts() {
        let midnight = chicago(2024, 5, 10, 0, 0);
        assert_eq!(
            bucket_date(&midnight, 0),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }
}
