//! Insight Integration Tests
//!
//! Drives `RequestInsightUseCase` through the Gemini adapter against a
//! local mock server.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stocks_insight::application::ports::{GenerationError, TextGenerationPort};
use stocks_insight::application::use_cases::{
    BLANK_QUESTION_MESSAGE, EMPTY_RESPONSE_MESSAGE, InsightOutcome, RequestInsightUseCase,
};
use stocks_insight::domain::quotes::{QuoteBar, QuoteSeries};
use stocks_insight::domain::shared::Symbol;
use stocks_insight::infrastructure::http::JsonHttpClient;
use stocks_insight::infrastructure::llm::GeminiClient;

const ENDPOINT: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    let http = JsonHttpClient::new(Duration::from_secs(5)).unwrap();
    GeminiClient::new(http, server.uri(), "gemini-1.5-pro", "gem-key")
}

fn series() -> QuoteSeries {
    let bars = (0..8_u32)
        .map(|i| {
            let close = Decimal::from(100 + i);
            QuoteBar::new(
                NaiveDate::from_ymd_opt(2024, 3, 1 + i)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                close - Decimal::ONE,
                close + Decimal::ONE,
                close - Decimal::TWO,
                close,
                u64::from(1_000 * (i + 1)),
            )
        })
        .collect();
    QuoteSeries::new(bars).with_time_zone("UTC")
}

fn symbol() -> Symbol {
    Symbol::new("AAPL").unwrap()
}

fn answer(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

// =============================================================================
// Successful answers
// =============================================================================

#[tokio::test]
async fn answer_parts_are_concatenated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", "gem-key"))
        .and(body_string_contains("Symbol: AAPL"))
        .and(body_string_contains("Question: Is the trend up?"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer(&["The trend ", "is up."])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let use_case = RequestInsightUseCase::new(Arc::new(client(&server)));
    let outcome = use_case
        .execute(&symbol(), &series(), None, "Is the trend up?")
        .await;

    assert_eq!(outcome, InsightOutcome::Answer("The trend is up.".to_string()));
}

#[tokio::test]
async fn prompt_carries_range_and_recent_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(&["ok"])))
        .mount(&server)
        .await;

    let use_case = RequestInsightUseCase::new(Arc::new(client(&server))).with_recent_rows(3);
    let range = Some("2024-03-01 to 2024-03-08".to_string());
    let outcome = use_case
        .execute(&symbol(), &series(), range, "Summarize")
        .await;
    assert_eq!(outcome.display_text(), "ok");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

    assert!(prompt.contains("Date range: 2024-03-01 to 2024-03-08"));
    assert!(prompt.contains("Time zone: UTC"));
    assert!(prompt.contains("2024-03-08 00:00:00  107.00"));
    assert!(prompt.contains("2024-03-06 00:00:00  105.00"));
    assert!(!prompt.contains("2024-03-05 00:00:00  104.00"));
}

// =============================================================================
// Empty and failed answers
// =============================================================================

#[tokio::test]
async fn no_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let outcome = RequestInsightUseCase::new(Arc::new(client(&server)))
        .execute(&symbol(), &series(), None, "Anything?")
        .await;

    assert_eq!(outcome, InsightOutcome::EmptyResponse);
    assert_eq!(outcome.display_text(), EMPTY_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "Request payload size exceeds the limit",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let outcome = RequestInsightUseCase::new(Arc::new(client(&server)))
        .execute(&symbol(), &series(), None, "Why?")
        .await;

    assert_eq!(
        outcome.display_text(),
        "Error generating insight: API error 400: Request payload size exceeds the limit"
    );
}

#[tokio::test]
async fn rejected_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let result = client(&server).generate("hello").await;
    assert!(matches!(result, Err(GenerationError::AuthenticationFailed)));
}

#[tokio::test]
async fn blocked_prompt_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let outcome = RequestInsightUseCase::new(Arc::new(client(&server)))
        .execute(&symbol(), &series(), None, "Something")
        .await;

    assert_eq!(
        outcome,
        InsightOutcome::Failed("prompt blocked: SAFETY".to_string())
    );
}

#[tokio::test]
async fn blank_question_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(&["unused"])))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = RequestInsightUseCase::new(Arc::new(client(&server)))
        .execute(&symbol(), &series(), None, "   \n")
        .await;

    assert_eq!(outcome, InsightOutcome::Rejected);
    assert_eq!(outcome.display_text(), BLANK_QUESTION_MESSAGE);
}
