//! Single OHLCV bar.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display format for bar timestamps, also used by the timestamp filter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One sampled interval of trading activity.
///
/// Prices are trusted as delivered by the provider; `low <= {open, close} <= high`
/// holds for well-formed feeds but is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBar {
    /// Start of the interval, in the provider's reported time zone.
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: Decimal,
    /// Highest traded price.
    pub high: Decimal,
    /// Lowest traded price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
}

impl QuoteBar {
    /// Create a new bar.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDateTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Whether the close is at or above the open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Whether `low <= {open, close} <= high` and prices are positive.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.low > Decimal::ZERO
            && self.low <= self.open.min(self.close)
            && self.open.max(self.close) <= self.high
    }
}
