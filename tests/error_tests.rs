// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use training_calendar::config::CalendarSettings;
use training_calendar::error::AppError;
use training_calendar::services::{build_month, normalize};

#[test]
fn test_is_strava_token_error_matches() {
    let err = AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string());
    assert!(err.is_strava_token_error());
}

#[test]
fn test_is_strava_token_error_no_match() {
    let err = AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string());
    assert!(!err.is_strava_token_error());

    let err = AppError::StravaApi("HTTP 500: oops".to_string());
    assert!(!err.is_strava_token_error());

    let err = AppError::BadRequest("Bad Request".to_string());
    assert!(!err.is_strava_token_error());
}

#[test]
fn test_error_status_codes() {
    let normalize_err =
        normalize(&[json!({"id": 1, "type": "Ride", "start_date": "nope"})], &CalendarSettings::default())
            .unwrap_err();
    let calendar_err = build_month(2024, 0, &[]).unwrap_err();

    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (
            AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string()),
            StatusCode::UNAUTHORIZED,
        ),
        (
            AppError::StravaApi("HTTP 500".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (AppError::from(normalize_err), StatusCode::BAD_GATEWAY),
        (AppError::from(calendar_err), StatusCode::BAD_REQUEST),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
