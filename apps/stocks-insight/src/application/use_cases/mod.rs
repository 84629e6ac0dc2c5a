//! Application Use Cases
//!
//! Each use case performs one user-triggered action against one port.

mod fetch_quotes;
mod request_insight;

pub use fetch_quotes::{FetchOutcome, FetchQuotesUseCase, NO_DATA_MESSAGE};
pub use request_insight::{
    BLANK_QUESTION_MESSAGE, EMPTY_RESPONSE_MESSAGE, InsightOutcome, RequestInsightUseCase,
};
