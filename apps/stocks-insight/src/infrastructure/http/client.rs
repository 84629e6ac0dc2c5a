//! JSON-over-HTTP client wrapper.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::HttpError;

/// Bodies longer than this are cut when carried in an error.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client returning decoded JSON bodies.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    client: Client,
}

impl JsonHttpClient {
    /// Build a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the TLS backend cannot initialize.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stocks-insight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET `url` with query parameters, keeping JSON error bodies.
    ///
    /// A non-2xx response whose body is JSON is returned as the body, so
    /// providers that explain auth or rate-limit failures in JSON reach
    /// payload normalization. Only non-JSON error bodies become
    /// [`HttpError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure, a non-2xx status with a
    /// non-JSON body, or a 2xx body that is not JSON.
    pub async fn get_json_or_error_body<Q>(&self, url: &str, query: &Q) -> Result<Value, HttpError>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let (status, text) = self.read(self.client.get(url).query(query)).await?;

        if status.is_success() {
            return parse(&text);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                tracing::warn!(status = status.as_u16(), "Provider returned JSON error body");
                Ok(body)
            }
            Err(_) => Err(status_error(status, &text)),
        }
    }

    /// POST a JSON `body` to `url` with query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure, non-2xx status, or a
    /// body that is not JSON.
    pub async fn post_json<Q, B>(&self, url: &str, query: &Q, body: &B) -> Result<Value, HttpError>
    where
        Q: Serialize + ?Sized + Sync,
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.client.post(url).query(query).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, HttpError> {
        let (status, text) = self.read(request).await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        parse(&text)
    }

    async fn read(&self, request: RequestBuilder) -> Result<(StatusCode, String), HttpError> {
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Network(e.without_url().to_string()))?;

        Ok((status, text))
    }
}

fn parse(text: &str) -> Result<Value, HttpError> {
    serde_json::from_str(text).map_err(|e| HttpError::JsonParse(e.to_string()))
}

fn status_error(status: StatusCode, text: &str) -> HttpError {
    tracing::debug!(status = status.as_u16(), "Provider returned error status");
    HttpError::Status {
        status: status.as_u16(),
        body: truncate(text),
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_cut() {
        let body = "x".repeat(MAX_ERROR_BODY + 10);
        let cut = truncate(&body);
        assert_eq!(cut.len(), MAX_ERROR_BODY + 3);
        assert!(cut.ends_with("..."));
    }
}
