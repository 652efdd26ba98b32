//! Shared type aliases and small enums.

use serde::{Deserialize, Serialize};

/// Provider identifier (e.g., "FMP")
pub type ProviderId = String;

/// Candle resolution for intraday chart data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interval {
    OneMinute,
    OneHour,
    OneDay,
}

impl Interval {
    /// The path segment the chart endpoint expects for this resolution.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1min",
            Interval::OneHour => "1hour",
            Interval::OneDay => "1day",
        }
    }
}
