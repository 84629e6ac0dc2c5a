//! Command-line interface
//!
//! Provides the `fetch`, `ask`, `symbols` and `session` commands.

pub mod args;
pub mod ask;
pub mod fetch;
pub mod output;
pub mod session;
pub mod symbols;

use clap::{Parser, Subcommand};

use crate::config::CredentialNeeds;

/// Stocks Insight CLI
#[derive(Parser, Debug)]
#[command(name = "stocks-insight")]
#[command(about = "Stock data visualization and model-generated insights")]
#[command(version)]
pub struct Cli {
    /// Path to a YAML config file (default: ./config.yaml if present)
    #[arg(long, short, global = true)]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch bars and print them as a table, optionally writing charts
    Fetch(fetch::FetchArgs),
    /// Fetch bars and ask the model a question about them
    Ask(ask::AskArgs),
    /// List the popular symbols picker
    Symbols,
    /// Interactive session: fetch, filter, chart and ask repeatedly
    Session(session::SessionArgs),
}

impl Commands {
    /// Secrets checked before this command runs.
    ///
    /// Every command that talks to a provider requires both keys; only the
    /// offline symbol listing skips the check.
    pub const fn credential_needs(&self) -> CredentialNeeds {
        match self {
            Self::Fetch(_) | Self::Ask(_) | Self::Session(_) => CredentialNeeds::ALL,
            Self::Symbols => CredentialNeeds::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fetch_flags() {
        let cli = Cli::try_parse_from([
            "stocks-insight",
            "fetch",
            "--symbol",
            "ibm",
            "--provider",
            "polygon",
            "--timespan",
            "hour",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--filter",
            "01-02",
            "--chart",
            "out.svg",
        ])
        .unwrap();
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.quote.symbol.as_deref(), Some("ibm"));
        assert_eq!(args.filter.as_deref(), Some("01-02"));
        assert!(args.chart.is_some());
        assert!(args.quote.request().is_ok());
    }

    #[test]
    fn symbol_and_pick_conflict() {
        let result = Cli::try_parse_from([
            "stocks-insight",
            "fetch",
            "--symbol",
            "IBM",
            "--pick",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_interval_is_rejected() {
        let result = Cli::try_parse_from(["stocks-insight", "fetch", "-s", "IBM", "-i", "2min"]);
        assert!(result.is_err());
    }

    #[test]
    fn symbols_needs_no_credentials() {
        let cli = Cli::try_parse_from(["stocks-insight", "symbols"]).unwrap();
        assert_eq!(cli.command.credential_needs(), CredentialNeeds::NONE);
    }
}
