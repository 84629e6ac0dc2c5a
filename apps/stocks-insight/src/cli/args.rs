//! Quote selection arguments shared by `fetch`, `ask` and `session`.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;

use crate::config::Config;
use crate::domain::quotes::{Interval, QuoteProvider, QuoteRequest, Timespan};
use crate::domain::shared::{Symbol, SymbolChoice};

/// Symbol, provider and range selection
#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    /// Ticker to fetch (free text, e.g. IBM)
    #[arg(long, short, conflicts_with = "pick")]
    pub symbol: Option<String>,

    /// Pick from the popular list: 1-based index, ticker, or other:<TICKER>
    #[arg(long)]
    pub pick: Option<String>,

    /// Quotes provider (alpha_vantage, polygon); defaults to the configured one
    #[arg(long, short)]
    pub provider: Option<QuoteProvider>,

    /// Alpha Vantage bar size (1min, 5min, 15min, 30min, 60min)
    #[arg(long, short)]
    pub interval: Option<Interval>,

    /// Polygon: number of timespan units per bar
    #[arg(long)]
    pub multiplier: Option<u32>,

    /// Polygon: bar unit (minute, hour, day, week, month, quarter, year)
    #[arg(long)]
    pub timespan: Option<Timespan>,

    /// Polygon: start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Polygon: end date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl QuoteArgs {
    /// Resolve the ticker from `--symbol` or `--pick`.
    pub fn symbol(&self) -> Result<Symbol> {
        match (&self.symbol, &self.pick) {
            (Some(text), _) => Ok(Symbol::new(text)?),
            (None, Some(pick)) => Ok(SymbolChoice::parse(pick)?.into_symbol()),
            (None, None) => bail!("Provide --symbol <TICKER> or --pick <N|TICKER|other:TICKER>"),
        }
    }

    /// Provider to use: `--provider` or the configured default.
    pub fn provider(&self, config: &Config) -> QuoteProvider {
        self.provider.unwrap_or(config.quotes.provider)
    }

    /// Build the quote request.
    pub fn request(&self) -> Result<QuoteRequest> {
        let mut request = QuoteRequest::new(self.symbol()?).with_dates(self.from, self.to);
        request.interval = self.interval;
        request.multiplier = self.multiplier;
        request.timespan = self.timespan;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_from_pick_index() {
        let args = QuoteArgs {
            pick: Some("2".to_string()),
            ..QuoteArgs::default()
        };
        assert_eq!(args.symbol().unwrap().as_str(), "MSFT");
    }

    #[test]
    fn symbol_required() {
        assert!(QuoteArgs::default().symbol().is_err());
    }

    #[test]
    fn request_carries_parameters() {
        let args = QuoteArgs {
            symbol: Some("ibm".to_string()),
            interval: Some(Interval::Min15),
            multiplier: Some(2),
            timespan: Some(Timespan::Hour),
            ..QuoteArgs::default()
        };
        let request = args.request().unwrap();
        assert_eq!(request.symbol.as_str(), "IBM");
        assert_eq!(request.interval_or_default(), Interval::Min15);
        assert_eq!(request.multiplier_or_default(), 2);
        assert_eq!(request.timespan_or_default(), Timespan::Hour);
    }

    #[test]
    fn provider_falls_back_to_config() {
        let mut config = Config::default();
        config.quotes.provider = QuoteProvider::Polygon;
        assert_eq!(QuoteArgs::default().provider(&config), QuoteProvider::Polygon);
    }
}
