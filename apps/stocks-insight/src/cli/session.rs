//! Session command - interactive loop over one in-memory session
//!
//! Each line is one user action: `fetch`, `filter`, `show`, `chart`, `ask`,
//! `symbols`, `help`, `quit`. A fetch replaces the whole session state.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::args::QuoteArgs;
use super::output::{ChartFormat, table_text, write_chart};
use super::symbols::picker_lines;
use crate::application::Session;
use crate::application::ports::{QuoteSourcePort, TextGenerationPort};
use crate::application::use_cases::{
    BLANK_QUESTION_MESSAGE, FetchOutcome, FetchQuotesUseCase, RequestInsightUseCase,
};
use crate::config::Config;
use crate::domain::quotes::{QuoteRequest, Timespan};
use crate::domain::shared::SymbolChoice;
use crate::infrastructure::llm::GeminiClient;
use crate::infrastructure::quotes::QuoteSource;

const HELP: &str = "\
Commands:
  fetch <SYMBOL|N|other:TICKER> [interval=5min] [multiplier=1] [timespan=day] [from=YYYY-MM-DD] [to=YYYY-MM-DD]
  filter <TEXT>     show rows whose timestamp contains TEXT
  show              show every row of the last fetch
  chart <PATH>      write the chart (.svg or Plotly .json)
  ask <QUESTION>    ask the model about the last fetch
  symbols           list popular symbols
  help              show this help
  quit              leave the session";

/// Arguments for the session command
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Fetch this selection before the first prompt
    #[command(flatten)]
    pub quote: QuoteArgs,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Fetch a new series.
    Fetch(QuoteRequest),
    /// Show rows matching a timestamp search.
    Filter(String),
    /// Show every row.
    Show,
    /// Write the chart to a file.
    Chart(PathBuf),
    /// Ask the model a question.
    Ask(String),
    /// List popular symbols.
    Symbols,
    /// Show help.
    Help,
    /// Leave the loop.
    Quit,
    /// Blank line.
    Nothing,
}

impl SessionCommand {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        match head.to_ascii_lowercase().as_str() {
            "" => Ok(Self::Nothing),
            "fetch" => parse_fetch(rest).map(Self::Fetch),
            "filter" => Ok(Self::Filter(rest.to_string())),
            "show" => Ok(Self::Show),
            "chart" if rest.is_empty() => Err("Usage: chart <PATH.svg|PATH.json>".to_string()),
            "chart" => Ok(Self::Chart(PathBuf::from(rest))),
            "ask" => Ok(Self::Ask(rest.to_string())),
            "symbols" => Ok(Self::Symbols),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
        }
    }
}

fn parse_fetch(rest: &str) -> Result<QuoteRequest, String> {
    let mut parts = rest.split_whitespace();
    let choice = parts
        .next()
        .ok_or_else(|| "Usage: fetch <SYMBOL|N|other:TICKER> [key=value ...]".to_string())?;
    let symbol = SymbolChoice::parse(choice)
        .map_err(|e| e.to_string())?
        .into_symbol();
    let mut request = QuoteRequest::new(symbol);

    for part in parts {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{part}'"))?;
        match key.to_ascii_lowercase().as_str() {
            "interval" => request.interval = Some(value.parse().map_err(|e| format!("{e}"))?),
            "multiplier" => {
                request.multiplier = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid multiplier '{value}'"))?,
                );
            }
            "timespan" => {
                request.timespan = Some(value.parse::<Timespan>().map_err(|e| format!("{e}"))?);
            }
            "from" => request.from = Some(parse_date(value)?),
            "to" => request.to = Some(parse_date(value)?),
            other => return Err(format!("Unknown fetch option '{other}'")),
        }
    }

    Ok(request)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("Invalid date '{value}'"))
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading.
    Output(String),
    /// Stop reading.
    Quit,
}

/// Session state plus the use cases that act on it.
pub struct SessionShell<Q, T>
where
    Q: QuoteSourcePort,
    T: TextGenerationPort,
{
    fetch_quotes: FetchQuotesUseCase<Q>,
    request_insight: RequestInsightUseCase<T>,
    session: Session,
}

impl<Q, T> SessionShell<Q, T>
where
    Q: QuoteSourcePort,
    T: TextGenerationPort,
{
    /// Create a shell with an empty session.
    pub fn new(
        fetch_quotes: FetchQuotesUseCase<Q>,
        request_insight: RequestInsightUseCase<T>,
    ) -> Self {
        Self {
            fetch_quotes,
            request_insight,
            session: Session::new(),
        }
    }

    /// Current session state.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Run one command against the session.
    pub async fn handle(&mut self, command: SessionCommand) -> Reply {
        let text = match command {
            SessionCommand::Quit => return Reply::Quit,
            SessionCommand::Nothing => String::new(),
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Symbols => picker_lines().join("\n"),
            SessionCommand::Fetch(request) => self.fetch(request).await,
            SessionCommand::Show => self.table(None),
            SessionCommand::Filter(needle) => self.table(Some(&needle)),
            SessionCommand::Chart(path) => self.chart(&path),
            SessionCommand::Ask(question) => self.ask(&question).await,
        };
        Reply::Output(text)
    }

    async fn fetch(&mut self, request: QuoteRequest) -> String {
        match self.fetch_quotes.execute(&request).await {
            Ok(FetchOutcome::Data(series)) => {
                let text = format!(
                    "{}: {} rows\n\n{}",
                    request.symbol,
                    series.len(),
                    table_text(&series, None)
                );
                self.session.record_fetch(request, Some(series));
                text
            }
            Ok(outcome @ FetchOutcome::NoData { .. }) => {
                self.session.record_fetch(request, None);
                outcome.no_data_text().unwrap_or_default()
            }
            Err(e) => format!("Error fetching quotes: {e}"),
        }
    }

    fn table(&self, filter: Option<&str>) -> String {
        self.session.series().map_or_else(
            || "No data. Use 'fetch <SYMBOL>' first.".to_string(),
            |series| table_text(series, filter),
        )
    }

    fn chart(&self, path: &std::path::Path) -> String {
        let Some(series) = self.session.series() else {
            return "No data to chart. Use 'fetch <SYMBOL>' first.".to_string();
        };
        let Some(format) = ChartFormat::from_path(path) else {
            return "Chart path must end in .svg or .json".to_string();
        };
        match write_chart(series, path, format) {
            Ok(()) => format!("Chart written to {}", path.display()),
            Err(e) => format!("Error writing chart: {e}"),
        }
    }

    async fn ask(&self, question: &str) -> String {
        if question.trim().is_empty() {
            return BLANK_QUESTION_MESSAGE.to_string();
        }
        let (Some(symbol), Some(series)) = (self.session.symbol(), self.session.series()) else {
            return "No data. Use 'fetch <SYMBOL>' before asking.".to_string();
        };
        let range = self
            .session
            .request()
            .and_then(QuoteRequest::requested_range_label);
        self.request_insight
            .execute(symbol, series, range, question)
            .await
            .display_text()
    }
}

/// Execute the session command
pub async fn execute(args: SessionArgs, config: &Config) -> Result<()> {
    let source = QuoteSource::from_config(&config.quotes, args.quote.provider(config))?;
    let generator = GeminiClient::from_config(&config.insight)?;
    let mut shell = SessionShell::new(
        FetchQuotesUseCase::new(Arc::new(source)),
        RequestInsightUseCase::new(Arc::new(generator)).with_recent_rows(config.insight.recent_rows),
    );

    println!("Stock Data Visualization and Insights. Type 'help' for commands.");

    if args.quote.symbol.is_some() || args.quote.pick.is_some() {
        let request = args.quote.request()?;
        if let Reply::Output(text) = shell.handle(SessionCommand::Fetch(request)).await {
            println!("{text}");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match shell.handle(command).await {
            Reply::Quit => break,
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{text}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::Interval;

    #[test]
    fn parse_basic_commands() {
        assert_eq!(SessionCommand::parse("  "), Ok(SessionCommand::Nothing));
        assert_eq!(SessionCommand::parse("SHOW"), Ok(SessionCommand::Show));
        assert_eq!(SessionCommand::parse("quit"), Ok(SessionCommand::Quit));
        assert_eq!(SessionCommand::parse("exit"), Ok(SessionCommand::Quit));
        assert_eq!(
            SessionCommand::parse("filter 2024-01-02 09"),
            Ok(SessionCommand::Filter("2024-01-02 09".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("ask Is it going up?"),
            Ok(SessionCommand::Ask("Is it going up?".to_string()))
        );
    }

    #[test]
    fn parse_fetch_with_options() {
        let Ok(SessionCommand::Fetch(request)) =
            SessionCommand::parse("fetch 3 interval=15min from=2024-01-01 to=2024-01-31")
        else {
            panic!("expected fetch");
        };
        assert_eq!(request.symbol.as_str(), "GOOGL");
        assert_eq!(request.interval, Some(Interval::Min15));
        assert_eq!(
            request.requested_range_label().as_deref(),
            Some("2024-01-01 to 2024-01-31")
        );
    }

    #[test]
    fn parse_errors_are_messages() {
        assert!(SessionCommand::parse("fetch").is_err());
        assert!(SessionCommand::parse("fetch IBM interval=2min").is_err());
        assert!(SessionCommand::parse("fetch IBM bogus=1").is_err());
        assert!(SessionCommand::parse("chart").is_err());
        assert!(SessionCommand::parse("dance").is_err());
    }
}
