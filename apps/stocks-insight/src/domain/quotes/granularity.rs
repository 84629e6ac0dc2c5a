//! Bar granularity for each provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// Intraday bar size accepted by Alpha Vantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    /// One minute.
    #[serde(rename = "1min")]
    Min1,
    /// Five minutes.
    #[default]
    #[serde(rename = "5min")]
    Min5,
    /// Fifteen minutes.
    #[serde(rename = "15min")]
    Min15,
    /// Thirty minutes.
    #[serde(rename = "30min")]
    Min30,
    /// Sixty minutes.
    #[serde(rename = "60min")]
    Min60,
}

impl Interval {
    /// All intervals, in selector order.
    pub const ALL: [Self; 5] = [Self::Min1, Self::Min5, Self::Min15, Self::Min30, Self::Min60];

    /// Provider query value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min60 => "60min",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid(
                    "interval",
                    format!("'{s}' is not one of 1min, 5min, 15min, 30min, 60min"),
                )
            })
    }
}

/// Aggregate window unit accepted by Polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    /// Minute bars.
    Minute,
    /// Hourly bars.
    Hour,
    /// Daily bars.
    #[default]
    Day,
    /// Weekly bars.
    Week,
    /// Monthly bars.
    Month,
    /// Quarterly bars.
    Quarter,
    /// Yearly bars.
    Year,
}

impl Timespan {
    /// All timespans, in selector order.
    pub const ALL: [Self; 7] = [
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Provider path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::invalid("timespan", format!("unknown timespan '{s}'")))
    }
}
