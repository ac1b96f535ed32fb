//! Aggregate statistics for a week or month of activities.

use serde::Serialize;

/// Placeholder shown for a metric with no value.
pub const NO_VALUE: &str = "-";

/// Totals over a set of activities.
///
/// `average_power_watts` and `effort_total` are `None` when no activity in
/// the set reported the value, which is distinct from a real zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    /// Cycling distance in miles
    pub distance_miles: f64,
    /// Mean of reported cycling power
    pub average_power_watts: Option<f64>,
    /// Sum of reported effort across all activity types
    pub effort_total: Option<f64>,
}

impl Aggregate {
    /// Display strings for the three metrics.
    pub fn summary(&self) -> SummaryText {
        SummaryText {
            miles: format!("{:.1}", self.distance_miles),
            power: self
                .average_power_watts
                .map(|w| format!("{:.0}", w))
                .unwrap_or_else(|| NO_VALUE.to_string()),
            effort: self
                .effort_total
                .map(|e| format!("{:.0}", e))
                .unwrap_or_else(|| NO_VALUE.to_string()),
        }
    }
}

/// Preformatted metrics for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryText {
    pub miles: String,
    pub power: String,
    pub effort: String,
}
