//! Ordered OHLCV series.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::QuoteBar;

/// Numeric column of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Column {
    /// Numeric columns in table order.
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Column header.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }

    /// Value of this column for one bar.
    #[must_use]
    pub fn value(&self, bar: &QuoteBar) -> Decimal {
        match self {
            Self::Open => bar.open,
            Self::High => bar.high,
            Self::Low => bar.low,
            Self::Close => bar.close,
            Self::Volume => Decimal::from(bar.volume),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bars for one symbol, ascending by timestamp.
///
/// Built once per fetch and never mutated; filtering returns a new series.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteSeries {
    bars: Vec<QuoteBar>,
    time_zone: Option<String>,
}

impl QuoteSeries {
    /// Build a series, ordering bars by timestamp.
    ///
    /// The sort is stable, so input that is already ascending keeps its order.
    #[must_use]
    pub fn new(mut bars: Vec<QuoteBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self {
            bars,
            time_zone: None,
        }
    }

    /// An empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bars: Vec::new(),
            time_zone: None,
        }
    }

    /// Attach the provider's reported time zone.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Provider time zone of the timestamps, when known.
    #[must_use]
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    /// All bars.
    #[must_use]
    pub fn bars(&self) -> &[QuoteBar] {
        &self.bars
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last timestamp.
    #[must_use]
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.bars.first()?.timestamp, self.bars.last()?.timestamp))
    }

    /// Values of one column, in series order.
    #[must_use]
    pub fn column(&self, column: Column) -> Vec<Decimal> {
        self.bars.iter().map(|b| column.value(b)).collect()
    }

    /// The last `n` bars (fewer if the series is shorter).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[QuoteBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    /// Keep bars whose formatted timestamp contains `needle`, ignoring case.
    ///
    /// An empty or whitespace-only needle keeps every bar.
    #[must_use]
    pub fn filter_by_timestamp(&self, needle: &str) -> Self {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        Self {
            bars: self
                .bars
                .iter()
                .filter(|b| b.formatted_timestamp().to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            time_zone: self.time_zone.clone(),
        }
    }
}
