// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training Calendar: monthly training overview from Strava activities
//!
//! This crate provides the backend API that fetches a user's Strava
//! activities, buckets them into local calendar days and serves a month
//! calendar with weekly and monthly summaries.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityLoader, StravaClient};

/// Shared application state.
///
/// Immutable after startup; per-user data is passed through each request.
pub struct AppState {
    pub config: Config,
    pub strava: StravaClient,
    pub loader: ActivityLoader,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let strava = StravaClient::new(&config);
        let loader = ActivityLoader::new(strava.clone(), &config);
        Self {
            config,
            strava,
            loader,
        }
    }
}
