//! Fetch Quotes Use Case

use std::sync::Arc;

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::domain::quotes::{QuoteRequest, QuoteSeries};

/// Message shown when a fetch produced no rows.
pub const NO_DATA_MESSAGE: &str = "No data to display. Please check the API response.";

/// Result of a fetch that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// At least one bar was normalized.
    Data(QuoteSeries),
    /// The provider answered without usable rows.
    NoData {
        /// Provider explanation, if it gave one.
        notice: Option<String>,
    },
}

impl FetchOutcome {
    /// The series, if any rows came back.
    #[must_use]
    pub const fn series(&self) -> Option<&QuoteSeries> {
        match self {
            Self::Data(series) => Some(series),
            Self::NoData { .. } => None,
        }
    }

    /// User-facing text for the no-data case.
    #[must_use]
    pub fn no_data_text(&self) -> Option<String> {
        match self {
            Self::Data(_) => None,
            Self::NoData { notice: None } => Some(NO_DATA_MESSAGE.to_string()),
            Self::NoData {
                notice: Some(notice),
            } => Some(format!("{NO_DATA_MESSAGE}\nProvider said: {notice}")),
        }
    }
}

/// Use case for fetching and normalizing one symbol's bars.
pub struct FetchQuotesUseCase<Q>
where
    Q: QuoteSourcePort,
{
    source: Arc<Q>,
}

impl<Q> FetchQuotesUseCase<Q>
where
    Q: QuoteSourcePort,
{
    /// Create a new `FetchQuotesUseCase`.
    pub const fn new(source: Arc<Q>) -> Self {
        Self { source }
    }

    /// Issue one provider call and normalize the body.
    ///
    /// A missing result field or an empty result set is a
    /// [`FetchOutcome::NoData`], never an error.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteSourceError`] when the request is invalid or the
    /// provider cannot be reached.
    pub async fn execute(&self, request: &QuoteRequest) -> Result<FetchOutcome, QuoteSourceError> {
        let provider = self.source.provider();
        tracing::info!(symbol = %request.symbol, %provider, "Fetching quotes");

        let payload = self.source.fetch(request).await?;

        match payload.normalize() {
            Ok(series) if series.is_empty() => {
                tracing::warn!(symbol = %request.symbol, %provider, "Provider returned no rows");
                Ok(FetchOutcome::NoData { notice: None })
            }
            Ok(series) => {
                tracing::info!(
                    symbol = %request.symbol,
                    %provider,
                    rows = series.len(),
                    "Quotes normalized"
                );
                Ok(FetchOutcome::Data(series))
            }
            Err(missing) => {
                tracing::warn!(symbol = %request.symbol, %provider, error = %missing, "No series in response");
                Ok(FetchOutcome::NoData {
                    notice: missing.notice,
                })
            }
        }
    }
}
