//! Text Generation Port (Driven Port)
//!
//! Interface for submitting a prompt to a hosted language model.

use async_trait::async_trait;

/// Errors from a text-generation call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The provider answered with an error.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider.
        message: String,
    },

    /// The provider declined to answer (safety block or similar).
    #[error("prompt blocked: {reason}")]
    Blocked {
        /// Block reason reported by the provider.
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Parser error.
        message: String,
    },
}

/// Port for one-shot text generation.
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// Model identifier used for generation.
    fn model(&self) -> &str;

    /// Submit `prompt` and return the generated text (possibly empty).
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on transport, authentication or API failure.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
