//! Ask command - fetch bars and ask the model a question about them

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::args::QuoteArgs;
use crate::application::use_cases::{
    BLANK_QUESTION_MESSAGE, FetchOutcome, FetchQuotesUseCase, RequestInsightUseCase,
};
use crate::config::Config;
use crate::infrastructure::llm::GeminiClient;
use crate::infrastructure::quotes::QuoteSource;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Symbol, provider and range
    #[command(flatten)]
    pub quote: QuoteArgs,

    /// Question about the fetched data
    #[arg(long, short)]
    pub question: String,
}

/// Execute the ask command
pub async fn execute(args: AskArgs, config: &Config) -> Result<()> {
    if args.question.trim().is_empty() {
        println!("{BLANK_QUESTION_MESSAGE}");
        return Ok(());
    }

    let request = args.quote.request()?;
    let source = QuoteSource::from_config(&config.quotes, args.quote.provider(config))?;
    let fetch = FetchQuotesUseCase::new(Arc::new(source));

    let series = match fetch.execute(&request).await? {
        FetchOutcome::Data(series) => series,
        outcome @ FetchOutcome::NoData { .. } => {
            if let Some(text) = outcome.no_data_text() {
                println!("{text}");
            }
            return Ok(());
        }
    };

    let generator = GeminiClient::from_config(&config.insight)?;
    let insight = RequestInsightUseCase::new(Arc::new(generator))
        .with_recent_rows(config.insight.recent_rows);

    let outcome = insight
        .execute(
            &request.symbol,
            &series,
            request.requested_range_label(),
            &args.question,
        )
        .await;

    println!("{}", outcome.display_text());
    Ok(())
}
