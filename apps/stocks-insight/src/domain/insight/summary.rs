//! Descriptive statistics per numeric column.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::math::{mean, quantile_sorted, std_dev};
use crate::domain::quotes::{Column, QuoteSeries};

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    /// Column described.
    pub column: Column,
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean; `None` when the column sum overflows.
    pub mean: Option<Decimal>,
    /// Sample standard deviation; `None` with fewer than two values or on
    /// overflow.
    pub std: Option<Decimal>,
    /// Minimum.
    pub min: Decimal,
    /// 25th percentile.
    pub q25: Decimal,
    /// Median.
    pub q50: Decimal,
    /// 75th percentile.
    pub q75: Decimal,
    /// Maximum.
    pub max: Decimal,
}

impl ColumnSummary {
    fn from_values(column: Column, mut values: Vec<Decimal>) -> Option<Self> {
        values.sort();
        Some(Self {
            column,
            count: values.len(),
            mean: mean(&values),
            std: std_dev(&values),
            min: *values.first()?,
            q25: quantile_sorted(&values, dec!(0.25))?,
            q50: quantile_sorted(&values, dec!(0.5))?,
            q75: quantile_sorted(&values, dec!(0.75))?,
            max: *values.last()?,
        })
    }
}

/// One statistic across every column, as printed.
#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "")]
    statistic: &'static str,
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

type StatFn = fn(&ColumnSummary) -> String;

const STATISTICS: [(&str, StatFn); 8] = [
    ("count", |s| s.count.to_string()),
    ("mean", |s| fmt_optional(s.mean)),
    ("std", |s| fmt_optional(s.std)),
    ("min", |s| fmt_stat(s.min)),
    ("25%", |s| fmt_stat(s.q25)),
    ("50%", |s| fmt_stat(s.q50)),
    ("75%", |s| fmt_stat(s.q75)),
    ("max", |s| fmt_stat(s.max)),
];

/// count/mean/std/min/quartiles/max for Open, High, Low, Close and Volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStatistics {
    columns: Vec<ColumnSummary>,
}

impl SummaryStatistics {
    /// Describe every numeric column of a series.
    ///
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn from_series(series: &QuoteSeries) -> Option<Self> {
        let columns = Column::ALL
            .into_iter()
            .map(|c| ColumnSummary::from_values(c, series.column(c)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { columns })
    }

    /// Per-column statistics in table order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSummary] {
        &self.columns
    }

    /// Statistics for one column.
    #[must_use]
    pub fn column(&self, column: Column) -> Option<&ColumnSummary> {
        self.columns.iter().find(|s| s.column == column)
    }

    /// Plain-text table with one row per statistic and one column per field.
    #[must_use]
    pub fn to_table(&self) -> String {
        let rows = STATISTICS.iter().map(|&(statistic, value)| {
            let cell = |column| self.column(column).map(value).unwrap_or_default();
            StatRow {
                statistic,
                open: cell(Column::Open),
                high: cell(Column::High),
                low: cell(Column::Low),
                close: cell(Column::Close),
                volume: cell(Column::Volume),
            }
        });

        let mut out = Table::new(rows)
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        out.push('\n');
        out
    }
}

fn fmt_optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| "NaN".to_string(), fmt_stat)
}

fn fmt_stat(value: Decimal) -> String {
    format!("{:.4}", value.round_dp(4))
}
