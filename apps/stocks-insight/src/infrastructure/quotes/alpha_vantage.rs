//! Alpha Vantage intraday adapter.

use async_trait::async_trait;

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::domain::quotes::{QuoteProvider, QuoteRequest, RawQuotePayload};
use crate::infrastructure::http::JsonHttpClient;

const FUNCTION: &str = "TIME_SERIES_INTRADAY";

/// `QuoteSourcePort` backed by `GET {base}/query?function=TIME_SERIES_INTRADAY`.
#[derive(Clone)]
pub struct AlphaVantageSource {
    http: JsonHttpClient,
    base_url: String,
    api_key: String,
}

impl AlphaVantageSource {
    /// Create an adapter for `base_url`.
    #[must_use]
    pub fn new(http: JsonHttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for AlphaVantageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QuoteSourcePort for AlphaVantageSource {
    fn provider(&self) -> QuoteProvider {
        QuoteProvider::AlphaVantage
    }

    async fn fetch(&self, request: &QuoteRequest) -> Result<RawQuotePayload, QuoteSourceError> {
        let interval = request.interval_or_default();
        let url = format!("{}/query", self.base_url);

        tracing::debug!(symbol = %request.symbol, %interval, "GET Alpha Vantage intraday");

        let body = self
            .http
            .get_json_or_error_body(
                &url,
                &[
                    ("function", FUNCTION),
                    ("symbol", request.symbol.as_str()),
                    ("interval", interval.as_str()),
                    ("apikey", self.api_key.as_str()),
                ],
            )
            .await?;

        Ok(RawQuotePayload::AlphaVantage(body))
    }
}
