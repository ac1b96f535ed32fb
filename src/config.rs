// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The calendar-related values are
//! bundled into [`CalendarSettings`] and passed explicitly to the
//! normalizer so request handling never reads ambient state.

use chrono::NaiveDate;
use chrono_tz::Tz;
use std::env;

/// Default local timezone for bucketing and display.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Chicago;
/// Activities starting before this local hour count toward the previous day.
pub const DEFAULT_DAY_BOUNDARY_HOUR: u32 = 3;
/// Meters per statute mile.
pub const DEFAULT_METERS_PER_MILE: f64 = 1609.34;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Key for signing the OAuth `state` parameter
    pub oauth_state_key: Vec<u8>,
    /// Frontend URL for OAuth redirects
    pub frontend_url: String,
    /// Strava REST API base URL
    pub strava_api_url: String,
    /// Strava OAuth base URL (authorize + token endpoints live under it)
    pub strava_oauth_url: String,
    /// Server port
    pub port: u16,
    /// Local timezone used for bucketing and display
    pub timezone: Tz,
    /// Local hour at which a new calendar day starts
    pub day_boundary_hour: u32,
    /// Distance conversion factor
    pub meters_per_mile: f64,
    /// Earliest date of the activity fetch window
    pub activities_after: NaiveDate,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            oauth_state_key: b"test_oauth_state_key".to_vec(),
            frontend_url: "http://localhost:5173".to_string(),
            strava_api_url: "https://www.strava.com/api/v3".to_string(),
            strava_oauth_url: "https://www.strava.com/oauth".to_string(),
            port: 8080,
            timezone: DEFAULT_TIMEZONE,
            day_boundary_hour: DEFAULT_DAY_BOUNDARY_HOUR,
            meters_per_mile: DEFAULT_METERS_PER_MILE,
            activities_after: default_activities_after(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timezone = match env::var("LOCAL_TIMEZONE") {
            Ok(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("LOCAL_TIMEZONE", raw))?,
            Err(_) => DEFAULT_TIMEZONE,
        };

        let day_boundary_hour = match env::var("DAY_BOUNDARY_HOUR") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(hour) if hour < 24 => hour,
                _ => return Err(ConfigError::Invalid("DAY_BOUNDARY_HOUR", raw)),
            },
            Err(_) => DEFAULT_DAY_BOUNDARY_HOUR,
        };

        let meters_per_mile = match env::var("METERS_PER_MILE") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(factor) if factor.is_finite() && factor > 0.0 => factor,
                _ => return Err(ConfigError::Invalid("METERS_PER_MILE", raw)),
            },
            Err(_) => DEFAULT_METERS_PER_MILE,
        };

        let activities_after = match env::var("ACTIVITIES_AFTER") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ConfigError::Invalid("ACTIVITIES_AFTER", raw))?,
            Err(_) => default_activities_after(),
        };

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            strava_api_url: env::var("STRAVA_API_URL")
                .unwrap_or_else(|_| "https://www.strava.com/api/v3".to_string()),
            strava_oauth_url: env::var("STRAVA_OAUTH_URL")
                .unwrap_or_else(|_| "https://www.strava.com/oauth".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            timezone,
            day_boundary_hour,
            meters_per_mile,
            activities_after,
        })
    }

    /// Whether the frontend is served from this machine (development).
    pub fn is_local(&self) -> bool {
        reqwest::Url::parse(&self.frontend_url)
            .map(|url| is_loopback_http(&url))
            .unwrap_or(false)
    }

    /// Whether the session cookie must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }

    /// Whether `target` may receive the user after login, or make
    /// credentialed cross-origin requests.
    ///
    /// Allowed: the configured frontend's origin, plus any loopback origin
    /// when the frontend itself is local.
    pub fn is_trusted_origin(&self, target: &str) -> bool {
        let Ok(target) = reqwest::Url::parse(target) else {
            return false;
        };
        if !target.origin().is_tuple() {
            return false;
        }

        let same_origin = reqwest::Url::parse(&self.frontend_url)
            .map(|frontend| frontend.origin() == target.origin())
            .unwrap_or(false);

        same_origin || (self.is_local() && is_loopback_http(&target))
    }

    /// Settings the normalizer needs, detached from the rest of the config.
    pub fn calendar_settings(&self) -> CalendarSettings {
        CalendarSettings {
            timezone: self.timezone,
            day_boundary_hour: self.day_boundary_hour,
            meters_per_mile: self.meters_per_mile,
        }
    }
}

/// Timezone, day boundary and unit conversion for normalizing activities.
#[derive(Debug, Clone, Copy)]
pub struct CalendarSettings {
    pub timezone: Tz,
    pub day_boundary_hour: u32,
    pub meters_per_mile: f64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            day_boundary_hour: DEFAULT_DAY_BOUNDARY_HOUR,
            meters_per_mile: DEFAULT_METERS_PER_MILE,
        }
    }
}

fn is_loopback_http(url: &reqwest::Url) -> bool {
    url.scheme() == "http" && matches!(url.host_str(), Some("localhost" | "127.0.0.1"))
}

fn default_activities_after() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
