//! Gemini `generateContent` adapter.

use std::time::Duration;

use async_trait::async_trait;

use super::api_types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::application::ports::{GenerationError, TextGenerationPort};
use crate::config::InsightConfig;
use crate::infrastructure::http::{HttpError, JsonHttpClient};

/// `TextGenerationPort` backed by
/// `POST {base}/v1beta/models/{model}:generateContent?key=...`.
#[derive(Clone)]
pub struct GeminiClient {
    http: JsonHttpClient,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &InsightConfig) -> Result<Self, HttpError> {
        let http = JsonHttpClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(http, &config.base_url, &config.model, &config.api_key))
    }

    /// Create a client for `model` at `base_url`.
    #[must_use]
    pub fn new(
        http: JsonHttpClient,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Replace a raw error body with the message from Gemini's error envelope.
fn api_error(err: HttpError) -> GenerationError {
    let envelope = match &err {
        HttpError::Status { status, body } => serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|parsed| (*status, parsed)),
        _ => None,
    };
    let Some((status, parsed)) = envelope else {
        return err.into();
    };

    if parsed.error.status.as_deref() == Some("PERMISSION_DENIED")
        || parsed.error.message.contains("API key not valid")
    {
        return GenerationError::AuthenticationFailed;
    }
    GenerationError::Api {
        status,
        message: parsed.error.message,
    }
}

#[async_trait]
impl TextGenerationPort for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = self
            .http
            .post_json(
                &self.endpoint(),
                &[("key", self.api_key.as_str())],
                &GenerateContentRequest::from_prompt(prompt),
            )
            .await
            .map_err(api_error)?;

        let response: GenerateContentResponse =
            serde_json::from_value(body).map_err(|e| GenerationError::MalformedResponse {
                message: e.to_string(),
            })?;

        if let Some(reason) = response.block_reason() {
            return Err(GenerationError::Blocked {
                reason: reason.to_string(),
            });
        }

        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        let text = response.text();
        tracing::debug!(model = %self.model, ?finish_reason, chars = text.len(), "Gemini answered");

        Ok(text)
    }
}
