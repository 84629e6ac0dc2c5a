//! Symbols command - list the popular-symbols picker

use crate::domain::shared::{OTHER_CHOICE, POPULAR_SYMBOLS};

/// Picker lines: numbered popular tickers followed by the "Other" escape.
pub fn picker_lines() -> Vec<String> {
    POPULAR_SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, symbol)| format!("{:>2}. {symbol}", i + 1))
        .chain(std::iter::once(format!(
            "    {OTHER_CHOICE} (use --symbol <TICKER> or --pick other:<TICKER>)"
        )))
        .collect()
}

/// Execute the symbols command
pub fn execute() {
    for line in picker_lines() {
        println!("{line}");
    }
}
