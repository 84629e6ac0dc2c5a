//! Quotes provider configuration.

use serde::{Deserialize, Serialize};

use crate::domain::quotes::QuoteProvider;

/// Quotes provider settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Provider schema to query.
    #[serde(default)]
    pub provider: QuoteProvider,
    /// Provider API key (`STOCKS_API`).
    #[serde(default)]
    pub api_key: String,
    /// Alpha Vantage base URL.
    #[serde(default = "default_alpha_vantage_url")]
    pub alpha_vantage_url: String,
    /// Polygon base URL.
    #[serde(default = "default_polygon_url")]
    pub polygon_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl QuotesConfig {
    /// Base URL of the configured provider.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self.provider {
            QuoteProvider::AlphaVantage => &self.alpha_vantage_url,
            QuoteProvider::Polygon => &self.polygon_url,
        }
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            provider: QuoteProvider::default(),
            api_key: String::new(),
            alpha_vantage_url: default_alpha_vantage_url(),
            polygon_url: default_polygon_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for QuotesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotesConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("alpha_vantage_url", &self.alpha_vantage_url)
            .field("polygon_url", &self.polygon_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_alpha_vantage_url() -> String {
    "https://www.alphavantage.co".to_string()
}

fn default_polygon_url() -> String {
    "https://api.polygon.io".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}
