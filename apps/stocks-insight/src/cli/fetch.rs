//! Fetch command - fetch bars, print the table, optionally write charts

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::args::QuoteArgs;
use super::output::{ChartFormat, table_text, write_chart};
use crate::application::use_cases::{FetchOutcome, FetchQuotesUseCase};
use crate::config::Config;
use crate::infrastructure::quotes::QuoteSource;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Symbol, provider and range
    #[command(flatten)]
    pub quote: QuoteArgs,

    /// Only show rows whose timestamp contains this text (e.g. 2024-01-02)
    #[arg(long)]
    pub filter: Option<String>,

    /// Write the candlestick/volume chart as SVG
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Write the chart as Plotly figure JSON
    #[arg(long)]
    pub plotly: Option<PathBuf>,
}

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> Result<()> {
    let request = args.quote.request()?;
    let provider = args.quote.provider(config);
    let source = QuoteSource::from_config(&config.quotes, provider)?;
    let use_case = FetchQuotesUseCase::new(Arc::new(source));

    let series = match use_case.execute(&request).await? {
        FetchOutcome::Data(series) => series,
        outcome @ FetchOutcome::NoData { .. } => {
            if let Some(text) = outcome.no_data_text() {
                println!("{text}");
            }
            return Ok(());
        }
    };

    println!("{} ({provider}, {} rows)", request.symbol, series.len());
    if let Some(tz) = series.time_zone() {
        println!("Time zone: {tz}");
    }
    println!();
    println!("{}", table_text(&series, args.filter.as_deref()));

    if let Some(path) = &args.chart {
        write_chart(&series, path, ChartFormat::Svg)?;
        println!("Chart written to {}", path.display());
    }
    if let Some(path) = &args.plotly {
        write_chart(&series, path, ChartFormat::Plotly)?;
        println!("Plotly figure written to {}", path.display());
    }

    Ok(())
}
