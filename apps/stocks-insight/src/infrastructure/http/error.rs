//! HTTP transport errors.

use thiserror::Error;

use crate::application::ports::{GenerationError, QuoteSourceError};

/// Errors from a single HTTP exchange.
#[derive(Debug, Error, Clone)]
pub enum HttpError {
    /// The client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The body was not valid JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<HttpError> for QuoteSourceError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Client(message) | HttpError::Network(message) => {
                Self::ConnectionError { message }
            }
            HttpError::Status { status, body } => Self::HttpStatus {
                status,
                message: body,
            },
            HttpError::JsonParse(message) => Self::MalformedBody { message },
        }
    }
}

impl From<HttpError> for GenerationError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Client(message) | HttpError::Network(message) => {
                Self::ConnectionError { message }
            }
            HttpError::Status {
                status: 401 | 403, ..
            } => Self::AuthenticationFailed,
            HttpError::Status { status, body } => Self::Api {
                status,
                message: body,
            },
            HttpError::JsonParse(message) => Self::MalformedResponse { message },
        }
    }
}
