//! Quotes provider adapters.

mod alpha_vantage;
mod polygon;

use std::time::Duration;

use async_trait::async_trait;

pub use alpha_vantage::AlphaVantageSource;
pub use polygon::PolygonSource;

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::config::QuotesConfig;
use crate::domain::quotes::{QuoteProvider, QuoteRequest, RawQuotePayload};
use crate::infrastructure::http::{HttpError, JsonHttpClient};

/// Either provider, chosen at runtime.
#[derive(Debug, Clone)]
pub enum QuoteSource {
    /// Alpha Vantage intraday.
    AlphaVantage(AlphaVantageSource),
    /// Polygon aggregates.
    Polygon(PolygonSource),
}

impl QuoteSource {
    /// Build the adapter for `provider` from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &QuotesConfig, provider: QuoteProvider) -> Result<Self, HttpError> {
        let http = JsonHttpClient::new(Duration::from_secs(config.timeout_secs))?;
        let key = config.api_key.clone();

        Ok(match provider {
            QuoteProvider::AlphaVantage => {
                Self::AlphaVantage(AlphaVantageSource::new(http, &config.alpha_vantage_url, key))
            }
            QuoteProvider::Polygon => {
                Self::Polygon(PolygonSource::new(http, &config.polygon_url, key))
            }
        })
    }
}

#[async_trait]
impl QuoteSourcePort for QuoteSource {
    fn provider(&self) -> QuoteProvider {
        match self {
            Self::AlphaVantage(source) => source.provider(),
            Self::Polygon(source) => source.provider(),
        }
    }

    async fn fetch(&self, request: &QuoteRequest) -> Result<RawQuotePayload, QuoteSourceError> {
        match self {
            Self::AlphaVantage(source) => source.fetch(request).await,
            Self::Polygon(source) => source.fetch(request).await,
        }
    }
}
