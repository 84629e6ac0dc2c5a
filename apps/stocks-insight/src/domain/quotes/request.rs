//! Quote request parameters.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Interval, Timespan};
use crate::domain::shared::{DomainError, Symbol};

/// Days between the default `from` and `to` of an aggregates request.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 30;

/// Which quotes provider schema to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteProvider {
    /// Alpha Vantage intraday time series.
    #[default]
    AlphaVantage,
    /// Polygon aggregates.
    Polygon,
}

impl QuoteProvider {
    /// Configuration name of the provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlphaVantage => "alpha_vantage",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for QuoteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "alpha_vantage" | "alphavantage" => Ok(Self::AlphaVantage),
            "polygon" => Ok(Self::Polygon),
            other => Err(DomainError::invalid(
                "provider",
                format!("'{other}' is not alpha_vantage or polygon"),
            )),
        }
    }
}

/// A request for one symbol's bars.
///
/// Range parameters are optional; each provider applies its own defaults
/// and ignores the parameters it does not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Ticker to fetch.
    pub symbol: Symbol,
    /// Intraday bar size (Alpha Vantage).
    pub interval: Option<Interval>,
    /// Number of `timespan` units per bar (Polygon).
    pub multiplier: Option<u32>,
    /// Aggregate window unit (Polygon).
    pub timespan: Option<Timespan>,
    /// First day of the window (Polygon).
    pub from: Option<NaiveDate>,
    /// Last day of the window (Polygon).
    pub to: Option<NaiveDate>,
}

impl QuoteRequest {
    /// Request with provider defaults for every range parameter.
    #[must_use]
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            interval: None,
            multiplier: None,
            timespan: None,
            from: None,
            to: None,
        }
    }

    /// Set the intraday interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the aggregate multiplier and timespan.
    #[must_use]
    pub const fn with_aggregate(mut self, multiplier: u32, timespan: Timespan) -> Self {
        self.multiplier = Some(multiplier);
        self.timespan = Some(timespan);
        self
    }

    /// Set the date window.
    #[must_use]
    pub const fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Interval with the default applied.
    #[must_use]
    pub fn interval_or_default(&self) -> Interval {
        self.interval.unwrap_or_default()
    }

    /// Multiplier with the default applied.
    #[must_use]
    pub fn multiplier_or_default(&self) -> u32 {
        self.multiplier.unwrap_or(1)
    }

    /// Timespan with the default applied.
    #[must_use]
    pub fn timespan_or_default(&self) -> Timespan {
        self.timespan.unwrap_or_default()
    }

    /// Resolve the aggregate date window relative to `today`.
    ///
    /// `to` defaults to `today`, `from` to [`DEFAULT_LOOKBACK_DAYS`] before `to`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `from` is after `to`, or
    /// `DomainError::InvalidValue` for a zero multiplier.
    pub fn aggregate_window(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), DomainError> {
        if self.multiplier == Some(0) {
            return Err(DomainError::invalid("multiplier", "must be at least 1"));
        }
        let to = self.to.unwrap_or(today);
        let from = self.from.unwrap_or_else(|| {
            to.checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
                .unwrap_or(to)
        });
        if from > to {
            return Err(DomainError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok((from, to))
    }

    /// Human-readable date range requested by the user, if any bound was given.
    #[must_use]
    pub fn requested_range_label(&self) -> Option<String> {
        match (self.from, self.to) {
            (None, None) => None,
            (Some(from), Some(to)) => Some(format!("{from} to {to}")),
            (Some(from), None) => Some(format!("{from} onward")),
            (None, Some(to)) => Some(format!("through {to}")),
        }
    }
}
