//! Polygon aggregates adapter.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::domain::quotes::{QuoteProvider, QuoteRequest, RawQuotePayload};
use crate::infrastructure::http::JsonHttpClient;

/// `QuoteSourcePort` backed by
/// `GET {base}/v2/aggs/ticker/{symbol}/range/{multiplier}/{timespan}/{from}/{to}`.
#[derive(Clone)]
pub struct PolygonSource {
    http: JsonHttpClient,
    base_url: String,
    api_key: String,
}

impl PolygonSource {
    /// Create an adapter for `base_url`.
    #[must_use]
    pub fn new(http: JsonHttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Aggregates URL for `request`, with `today` as the default `to`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteSourceError::InvalidRequest`] for a zero multiplier or
    /// an inverted date range.
    pub fn aggregates_url(
        &self,
        request: &QuoteRequest,
        today: NaiveDate,
    ) -> Result<String, QuoteSourceError> {
        let (from, to) = request.aggregate_window(today)?;
        Ok(format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.base_url,
            request.symbol,
            request.multiplier_or_default(),
            request.timespan_or_default(),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
        ))
    }
}

impl std::fmt::Debug for PolygonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QuoteSourcePort for PolygonSource {
    fn provider(&self) -> QuoteProvider {
        QuoteProvider::Polygon
    }

    async fn fetch(&self, request: &QuoteRequest) -> Result<RawQuotePayload, QuoteSourceError> {
        let url = self.aggregates_url(request, Utc::now().date_naive())?;

        tracing::debug!(symbol = %request.symbol, %url, "GET Polygon aggregates");

        let body = self
            .http
            .get_json_or_error_body(&url, &[("apiKey", self.api_key.as_str())])
            .await?;

        Ok(RawQuotePayload::Polygon(body))
    }
}
