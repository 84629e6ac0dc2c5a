//! Quote Source Port (Driven Port)
//!
//! Interface for fetching bars from an external quotes provider.

use async_trait::async_trait;

use crate::domain::quotes::{QuoteProvider, QuoteRequest, RawQuotePayload};
use crate::domain::shared::DomainError;

/// Errors reaching a quotes provider.
///
/// A body that parses but lacks the series field is not an error here; it is
/// reported by [`RawQuotePayload::normalize`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteSourceError {
    /// The request parameters were rejected before any network call.
    #[error("Invalid quote request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// Connection, DNS, TLS or timeout failure.
    #[error("Quotes provider connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("Quotes provider returned HTTP {status}: {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The body was not JSON.
    #[error("Quotes provider returned malformed JSON: {message}")]
    MalformedBody {
        /// Parser error.
        message: String,
    },
}

/// Port for one-shot quote fetches.
///
/// Implementations issue exactly one outbound request per call and never
/// cache or retry.
#[async_trait]
pub trait QuoteSourcePort: Send + Sync {
    /// Provider whose schema this source returns.
    fn provider(&self) -> QuoteProvider;

    /// Fetch the raw payload for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteSourceError`] if the request is invalid or the provider
    /// cannot be reached or answers with an error status.
    async fn fetch(&self, request: &QuoteRequest) -> Result<RawQuotePayload, QuoteSourceError>;
}
