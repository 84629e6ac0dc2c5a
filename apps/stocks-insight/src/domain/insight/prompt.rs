//! Prompt template for insight requests.

use std::fmt::Write as _;

use super::SummaryStatistics;
use crate::domain::quotes::{QuoteSeries, TIMESTAMP_FORMAT};
use crate::domain::shared::{DomainError, Symbol};

/// Number of trailing Close rows quoted in the prompt by default.
pub const DEFAULT_RECENT_ROWS: usize = 5;

/// A non-blank user question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate a question.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` for empty or whitespace-only text.
    pub fn new(text: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("question", "cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The question text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Data context for one insight request.
#[derive(Debug, Clone)]
pub struct InsightPrompt<'a> {
    symbol: &'a Symbol,
    series: &'a QuoteSeries,
    requested_range: Option<String>,
    recent_rows: usize,
}

impl<'a> InsightPrompt<'a> {
    /// Prompt context for `series` fetched for `symbol`.
    #[must_use]
    pub const fn new(symbol: &'a Symbol, series: &'a QuoteSeries) -> Self {
        Self {
            symbol,
            series,
            requested_range: None,
            recent_rows: DEFAULT_RECENT_ROWS,
        }
    }

    /// Date range the user asked for; defaults to the series' own extent.
    #[must_use]
    pub fn with_requested_range(mut self, range: Option<String>) -> Self {
        self.requested_range = range;
        self
    }

    /// Number of trailing Close rows to quote.
    #[must_use]
    pub const fn with_recent_rows(mut self, rows: usize) -> Self {
        self.recent_rows = rows;
        self
    }

    /// Date range line of the prompt.
    #[must_use]
    pub fn date_range(&self) -> String {
        if let Some(range) = &self.requested_range {
            return range.clone();
        }
        self.series.time_range().map_or_else(
            || "no data".to_string(),
            |(start, end)| {
                format!(
                    "{} to {}",
                    start.format(TIMESTAMP_FORMAT),
                    end.format(TIMESTAMP_FORMAT)
                )
            },
        )
    }

    /// Render the full prompt text for `question`.
    #[must_use]
    pub fn render(&self, question: &Question) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "You are a financial data analyst. Answer the question using the stock data below."
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Symbol: {}", self.symbol);
        let _ = writeln!(out, "Date range: {}", self.date_range());
        if let Some(tz) = self.series.time_zone() {
            let _ = writeln!(out, "Time zone: {tz}");
        }
        let _ = writeln!(out, "Bars: {}", self.series.len());
        let _ = writeln!(out);

        let _ = writeln!(out, "Summary statistics:");
        match SummaryStatistics::from_series(self.series) {
            Some(stats) => out.push_str(&stats.to_table()),
            None => out.push_str("(no rows)\n"),
        }

        if self.recent_rows > 0 && !self.series.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Most recent closing prices:");
            for bar in self.series.tail(self.recent_rows) {
                let _ = writeln!(out, "{}  {:.2}", bar.formatted_timestamp(), bar.close.round_dp(2));
            }
        }

        let _ = writeln!(out);
        let _ = write!(out, "Question: {}", question.as_str());
        out
    }
}
