// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - OAuth authorize URL and authorization-code exchange
//! - Paginated activity listing for a time window
//! - Rate limit and expired token detection

use crate::config::Config;
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size for activity listing (Strava maximum).
pub const ACTIVITIES_PER_PAGE: u32 = 200;

/// Upper bound on pages fetched for one request.
pub const MAX_ACTIVITY_PAGES: u32 = 50;

/// OAuth scopes requested from the athlete.
const OAUTH_SCOPE: &str = "read,activity:read_all,profile:read_all";

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client from the application config.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.strava_api_url.trim_end_matches('/').to_string(),
            oauth_url: config.strava_oauth_url.trim_end_matches('/').to_string(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        }
    }

    /// URL the athlete is sent to for granting access.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/authorize?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.oauth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(OAUTH_SCOPE),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::StravaApi(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("Failed to parse token response: {}", e)))
    }

    /// List one page of activities in the window.
    ///
    /// Entries are returned untyped; validation happens in the normalizer.
    pub async fn list_activities(
        &self,
        access_token: &str,
        window: &ActivityWindow,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>, AppError> {
        let url = format!("{}/athlete/activities", self.api_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", window.after.to_string()),
                ("before", window.before.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Fetch every activity in the window, one page at a time.
    ///
    /// Stops at the first empty page. A failing page, or running past
    /// [`MAX_ACTIVITY_PAGES`], aborts the whole fetch; pages already received
    /// are dropped with the error.
    pub async fn fetch_all_activities(
        &self,
        access_token: &str,
        window: &ActivityWindow,
    ) -> Result<Vec<Value>, AppError> {
        let mut activities = Vec::new();
        let mut page = 1u32;

        loop {
            if page > MAX_ACTIVITY_PAGES {
                tracing::warn!(
                    pages = MAX_ACTIVITY_PAGES,
                    fetched = activities.len(),
                    "Activity fetch exceeded page limit"
                );
                return Err(AppError::StravaApi(format!(
                    "Activity listing did not end within {} pages",
                    MAX_ACTIVITY_PAGES
                )));
            }

            let batch = self
                .list_activities(access_token, window, page, ACTIVITIES_PER_PAGE)
                .await
                .inspect_err(|e| {
                    tracing::warn!(page, fetched = activities.len(), error = %e, "Activity fetch aborted");
                })?;

            if batch.is_empty() {
                break;
            }

            tracing::debug!(page, count = batch.len(), "Fetched activity page");
            activities.extend(batch);
            page += 1;
        }

        tracing::info!(pages = page - 1, count = activities.len(), "Fetched activities");
        Ok(activities)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 {
                return Err(AppError::StravaApi(
                    AppError::STRAVA_TOKEN_ERROR.to_string(),
                ));
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Time window for activity listing, as Unix timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub after: i64,
    pub before: i64,
}

impl ActivityWindow {
    /// Window from local midnight of `earliest` up to `now`.
    pub fn since(earliest: NaiveDate, timezone: Tz, now: DateTime<Utc>) -> Self {
        let midnight = earliest.and_hms_opt(0, 0, 0).unwrap_or_default();
        let after = timezone
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.timestamp())
            .unwrap_or_else(|| midnight.and_utc().timestamp());

        Self {
            after,
            before: now.timestamp(),
        }
    }
}

/// Token exchange response from Strava OAuth.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub athlete: Option<StravaAthlete>,
}

/// Athlete info from OAuth token exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}
