//! Quotes Domain
//!
//! Canonical OHLCV types and the normalization of provider payloads into them.

mod bar;
mod granularity;
mod payload;
mod request;
mod series;

pub use bar::{QuoteBar, TIMESTAMP_FORMAT};
pub use granularity::{Interval, Timespan};
pub use payload::{MissingSeries, RawQuotePayload};
pub use request::{DEFAULT_LOOKBACK_DAYS, QuoteProvider, QuoteRequest};
pub use series::{Column, QuoteSeries};
