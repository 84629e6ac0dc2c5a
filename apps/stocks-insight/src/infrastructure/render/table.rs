//! Text table of a quote series.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::domain::quotes::{QuoteBar, QuoteSeries};

/// Volume with thousands separators: `1234567` becomes `1,234,567`.
#[must_use]
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

impl From<&QuoteBar> for BarRow {
    fn from(bar: &QuoteBar) -> Self {
        Self {
            timestamp: bar.formatted_timestamp(),
            open: format!("{:.2}", bar.open.round_dp(2)),
            high: format!("{:.2}", bar.high.round_dp(2)),
            low: format!("{:.2}", bar.low.round_dp(2)),
            close: format!("{:.2}", bar.close.round_dp(2)),
            volume: format_volume(bar.volume),
        }
    }
}

/// Table with one row per bar: prices with two decimals, volume with separators.
#[must_use]
pub fn render_table(series: &QuoteSeries) -> String {
    Table::new(series.bars().iter().map(BarRow::from))
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
