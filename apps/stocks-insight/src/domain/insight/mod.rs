//! Insight Domain
//!
//! Descriptive statistics over a series and the prompt sent to the
//! text-generation model.

mod math;
mod prompt;
mod summary;

pub use prompt::{DEFAULT_RECENT_ROWS, InsightPrompt, Question};
pub use summary::{ColumnSummary, SummaryStatistics};
