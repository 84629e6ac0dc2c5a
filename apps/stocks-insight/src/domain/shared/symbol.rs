//! Symbol value object for ticker identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Tickers offered by the symbol picker, in display order.
pub const POPULAR_SYMBOLS: [&str; 8] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "IBM",
];

/// Label of the picker's free-text escape.
pub const OTHER_CHOICE: &str = "Other";

/// A ticker symbol such as "IBM" or "AAPL".
///
/// Always non-empty, trimmed, and upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol, trimming whitespace and normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the symbol is empty or contains
    /// characters that cannot appear in a ticker.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("symbol", "cannot be empty"));
        }
        if trimmed.len() > 21 {
            return Err(DomainError::invalid("symbol", "exceeds 21 characters"));
        }
        // Tickers may carry class suffixes ("BRK.B"), crypto pairs ("X:BTCUSD") or indices ("^GSPC").
        if let Some(bad) = trimmed
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '^')))
        {
            return Err(DomainError::invalid(
                "symbol",
                format!("unexpected character '{bad}'"),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the symbol is one of [`POPULAR_SYMBOLS`].
    #[must_use]
    pub fn is_popular(&self) -> bool {
        POPULAR_SYMBOLS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A selection from the popular-symbols picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolChoice {
    /// One of the listed tickers.
    Popular(Symbol),
    /// The "Other" escape with a user-typed ticker.
    Other(Symbol),
}

impl SymbolChoice {
    /// Parse picker input.
    ///
    /// Accepts a 1-based index into [`POPULAR_SYMBOLS`], a listed ticker,
    /// `other:<TICKER>`, or any other ticker text. A number outside the
    /// picker's range is read as a ticker, so numeric symbols such as
    /// `7203` stay reachable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` for an invalid ticker.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let input = input.trim();

        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|i| POPULAR_SYMBOLS.get(i));
        if let Some(popular) = picked {
            return Symbol::new(popular).map(Self::Popular);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("other:") {
            return Symbol::new(rest).map(Self::Other);
        }

        let symbol = Symbol::new(input)?;
        if symbol.is_popular() {
            Ok(Self::Popular(symbol))
        } else {
            Ok(Self::Other(symbol))
        }
    }

    /// The chosen symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        match self {
            Self::Popular(s) | Self::Other(s) => s,
        }
    }

    /// Consume and return the chosen symbol.
    #[must_use]
    pub fn into_symbol(self) -> Symbol {
        match self {
            Self::Popular(s) | Self::Other(s) => s,
        }
    }
}
