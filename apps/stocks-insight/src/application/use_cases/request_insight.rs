//! Request Insight Use Case

use std::sync::Arc;

use crate::application::ports::TextGenerationPort;
use crate::domain::insight::{DEFAULT_RECENT_ROWS, InsightPrompt, Question};
use crate::domain::quotes::QuoteSeries;
use crate::domain::shared::Symbol;

/// Shown when the model answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "The model returned an empty response.";

/// Shown when the question is blank; no call is made.
pub const BLANK_QUESTION_MESSAGE: &str = "Please enter a question before requesting an insight.";

/// What the user sees after asking a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    /// The model's text, verbatim.
    Answer(String),
    /// The model answered with nothing.
    EmptyResponse,
    /// The call failed; carries the error text.
    Failed(String),
    /// The question was blank and nothing was sent.
    Rejected,
}

impl InsightOutcome {
    /// Text to display for this outcome.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Answer(text) => text.clone(),
            Self::EmptyResponse => EMPTY_RESPONSE_MESSAGE.to_string(),
            Self::Failed(error) => format!("Error generating insight: {error}"),
            Self::Rejected => BLANK_QUESTION_MESSAGE.to_string(),
        }
    }
}

/// Use case for asking the model about a fetched series.
pub struct RequestInsightUseCase<T>
where
    T: TextGenerationPort,
{
    generator: Arc<T>,
    recent_rows: usize,
}

impl<T> RequestInsightUseCase<T>
where
    T: TextGenerationPort,
{
    /// Create a new `RequestInsightUseCase`.
    pub const fn new(generator: Arc<T>) -> Self {
        Self {
            generator,
            recent_rows: DEFAULT_RECENT_ROWS,
        }
    }

    /// Number of trailing Close rows quoted in the prompt.
    #[must_use]
    pub const fn with_recent_rows(mut self, rows: usize) -> Self {
        self.recent_rows = rows;
        self
    }

    /// Build the prompt and submit it once.
    ///
    /// Failures are caught and returned as [`InsightOutcome::Failed`].
    pub async fn execute(
        &self,
        symbol: &Symbol,
        series: &QuoteSeries,
        requested_range: Option<String>,
        question: &str,
    ) -> InsightOutcome {
        let Ok(question) = Question::new(question) else {
            tracing::warn!(%symbol, "Blank question rejected");
            return InsightOutcome::Rejected;
        };

        let prompt = InsightPrompt::new(symbol, series)
            .with_requested_range(requested_range)
            .with_recent_rows(self.recent_rows)
            .render(&question);

        tracing::info!(
            %symbol,
            model = self.generator.model(),
            rows = series.len(),
            prompt_chars = prompt.len(),
            "Requesting insight"
        );

        match self.generator.generate(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!(%symbol, "Model returned an empty response");
                InsightOutcome::EmptyResponse
            }
            Ok(text) => InsightOutcome::Answer(text),
            Err(e) => {
                tracing::error!(%symbol, error = %e, "Insight generation failed");
                InsightOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use crate::domain::quotes::QuoteBar;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct MockGenerator {
        reply: Result<String, GenerationError>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn new(reply: Result<String, GenerationError>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerationPort for MockGenerator {
        fn model(&self) -> &str {
            "mock-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn series() -> QuoteSeries {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        QuoteSeries::new(vec![QuoteBar::new(ts, dec!(10), dec!(12), dec!(9), dec!(11), 1000)])
    }

    #[tokio::test]
    async fn answer_is_returned_verbatim() {
        let generator = Arc::new(MockGenerator::new(Ok("Trend is up.".to_string())));
        let use_case = RequestInsightUseCase::new(Arc::clone(&generator));
        let symbol = Symbol::new("IBM").unwrap();

        let outcome = use_case
            .execute(&symbol, &series(), None, "Is the trend up?")
            .await;

        assert_eq!(outcome.display_text(), "Trend is up.");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Symbol: IBM"));
        assert!(prompts[0].ends_with("Question: Is the trend up?"));
    }

    #[tokio::test]
    async fn blank_question_makes_no_call() {
        let generator = Arc::new(MockGenerator::new(Ok("unused".to_string())));
        let use_case = RequestInsightUseCase::new(Arc::clone(&generator));
        let symbol = Symbol::new("IBM").unwrap();

        let outcome = use_case.execute(&symbol, &series(), None, "   ").await;

        assert_eq!(outcome, InsightOutcome::Rejected);
        assert_eq!(outcome.display_text(), BLANK_QUESTION_MESSAGE);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn empty_text_maps_to_fixed_message() {
        let generator = Arc::new(MockGenerator::new(Ok(String::new())));
        let use_case = RequestInsightUseCase::new(generator);
        let symbol = Symbol::new("IBM").unwrap();

        let outcome = use_case.execute(&symbol, &series(), None, "q").await;
        assert_eq!(outcome.display_text(), EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn failure_is_caught_and_prefixed() {
        let generator = Arc::new(MockGenerator::new(Err(GenerationError::AuthenticationFailed)));
        let use_case = RequestInsightUseCase::new(generator);
        let symbol = Symbol::new("IBM").unwrap();

        let outcome = use_case.execute(&symbol, &series(), None, "q").await;
        assert_eq!(
            outcome.display_text(),
            "Error generating insight: authentication failed"
        );
    }

    #[tokio::test]
    async fn requested_range_is_forwarded() {
        let generator = Arc::new(MockGenerator::new(Ok("ok".to_string())));
        let use_case = RequestInsightUseCase::new(Arc::clone(&generator)).with_recent_rows(1);
        let symbol = Symbol::new("IBM").unwrap();

        use_case
            .execute(
                &symbol,
                &series(),
                Some("2024-01-01 to 2024-01-31".to_string()),
                "q",
            )
            .await;

        assert!(generator.prompts()[0].contains("Date range: 2024-01-01 to 2024-01-31"));
    }
}
