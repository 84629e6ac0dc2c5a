//! Per-user session state.

use crate::domain::quotes::{QuoteRequest, QuoteSeries};
use crate::domain::shared::Symbol;

/// The last fetch a user made.
///
/// Owned by the interactive loop. Every fetch overwrites all three fields;
/// there is no history.
#[derive(Debug, Clone, Default)]
pub struct Session {
    symbol: Option<Symbol>,
    request: Option<QuoteRequest>,
    series: Option<QuoteSeries>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetch. `series` is `None` when the provider returned no data,
    /// which clears any earlier series.
    pub fn record_fetch(&mut self, request: QuoteRequest, series: Option<QuoteSeries>) {
        self.symbol = Some(request.symbol.clone());
        self.request = Some(request);
        self.series = series;
    }

    /// Last requested symbol.
    #[must_use]
    pub const fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// Last request.
    #[must_use]
    pub const fn request(&self) -> Option<&QuoteRequest> {
        self.request.as_ref()
    }

    /// Last fetched series, if it had rows.
    #[must_use]
    pub const fn series(&self) -> Option<&QuoteSeries> {
        self.series.as_ref()
    }

    /// Last series narrowed by a timestamp search.
    #[must_use]
    pub fn filtered(&self, needle: &str) -> Option<QuoteSeries> {
        self.series.as_ref().map(|s| s.filter_by_timestamp(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteBar;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn series(day: u32) -> QuoteSeries {
        let ts = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        QuoteSeries::new(vec![QuoteBar::new(ts, dec!(1), dec!(1), dec!(1), dec!(1), 1)])
    }

    #[test]
    fn new_session_is_empty() {
        let session = Session::new();
        assert!(session.symbol().is_none());
        assert!(session.request().is_none());
        assert!(session.series().is_none());
        assert!(session.filtered("2024").is_none());
    }

    #[test]
    fn fetch_overwrites_everything() {
        let mut session = Session::new();
        session.record_fetch(QuoteRequest::new(Symbol::new("IBM").unwrap()), Some(series(1)));
        session.record_fetch(QuoteRequest::new(Symbol::new("AAPL").unwrap()), None);

        assert_eq!(session.symbol().map(Symbol::as_str), Some("AAPL"));
        assert!(session.series().is_none());
    }

    #[test]
    fn filter_reads_last_series() {
        let mut session = Session::new();
        session.record_fetch(QuoteRequest::new(Symbol::new("IBM").unwrap()), Some(series(2)));

        assert_eq!(session.filtered("01-02").map(|s| s.len()), Some(1));
        assert_eq!(session.filtered("01-03").map(|s| s.len()), Some(0));
    }
}
