//! Stocks Insight Binary
//!
//! Loads `.env` and configuration, installs logging, validates credentials,
//! then runs one command.
//!
//! # Environment Variables
//!
//! - `STOCKS_API`: quotes provider API key
//! - `GEMINI_API`: text-generation API key
//! - `RUST_LOG`: log filter override

use anyhow::Result;
use clap::Parser;

use stocks_insight::cli::{self, Cli, Commands};
use stocks_insight::config::{load_config, validate_startup};
use stocks_insight::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_telemetry(&config.observability.logging);

    tracing::debug!(
        provider = %config.quotes.provider,
        model = %config.insight.model,
        "Configuration loaded"
    );

    validate_startup(&config, cli.command.credential_needs())?;

    match cli.command {
        Commands::Fetch(args) => cli::fetch::execute(args, &config).await?,
        Commands::Ask(args) => cli::ask::execute(args, &config).await?,
        Commands::Symbols => cli::symbols::execute(),
        Commands::Session(args) => cli::session::execute(args, &config).await?,
    }

    Ok(())
}
