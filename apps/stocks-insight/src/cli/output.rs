//! Chart and table output shared by the commands.

use std::path::Path;

use anyhow::{Result, bail};

use crate::domain::chart::ChartBuilder;
use crate::domain::quotes::QuoteSeries;
use crate::infrastructure::render::{PlotlyFigure, SvgRenderer, render_table, write_output};

/// Output format of a chart file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// Standalone SVG image.
    Svg,
    /// Plotly figure JSON.
    Plotly,
}

impl ChartFormat {
    /// Format implied by the file extension (`.svg` or `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Plotly),
            _ => None,
        }
    }
}

/// Build the chart for `series` and write it to `path` as `format`.
///
/// An empty series is reported as an error, not written.
pub fn write_chart(series: &QuoteSeries, path: &Path, format: ChartFormat) -> Result<()> {
    if series.is_empty() {
        bail!("No data to chart.");
    }
    let spec = ChartBuilder::new().build(series)?;
    let contents = match format {
        ChartFormat::Svg => SvgRenderer::new().render(&spec),
        ChartFormat::Plotly => PlotlyFigure::from_spec(&spec).to_json()?,
    };
    write_output(path, &contents)?;
    tracing::info!(path = %path.display(), bars = spec.len(), ?format, "Chart written");
    Ok(())
}

/// Table for `series`, optionally narrowed by a timestamp search.
pub fn table_text(series: &QuoteSeries, filter: Option<&str>) -> String {
    match filter {
        Some(needle) => {
            let filtered = series.filter_by_timestamp(needle);
            if filtered.is_empty() {
                format!("No rows match '{needle}'.")
            } else {
                render_table(&filtered)
            }
        }
        None => render_table(series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteBar;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("chart.svg", Some(ChartFormat::Svg))]
    #[test_case("chart.SVG", Some(ChartFormat::Svg))]
    #[test_case("figure.json", Some(ChartFormat::Plotly))]
    #[test_case("chart.png", None)]
    #[test_case("chart", None)]
    fn format_from_extension(path: &str, expected: Option<ChartFormat>) {
        assert_eq!(ChartFormat::from_path(Path::new(path)), expected);
    }

    fn series() -> QuoteSeries {
        let bars = [(1, 30), (2, 30)]
            .into_iter()
            .map(|(d, m)| {
                let ts = NaiveDate::from_ymd_opt(2024, 1, d)
                    .unwrap()
                    .and_hms_opt(9, m, 0)
                    .unwrap();
                QuoteBar::new(ts, dec!(1), dec!(2), dec!(1), dec!(2), 10)
            })
            .collect();
        QuoteSeries::new(bars)
    }

    #[test]
    fn filter_narrows_table() {
        let text = table_text(&series(), Some("01-01"));
        assert!(text.contains("2024-01-01 09:30:00"));
        assert!(!text.contains("2024-01-02 09:30:00"));
    }

    #[test]
    fn filter_without_matches_says_so() {
        assert_eq!(table_text(&series(), Some("2030")), "No rows match '2030'.");
    }

    #[test]
    fn chart_files_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("c.svg");
        let json = dir.path().join("c.json");
        write_chart(&series(), &svg, ChartFormat::Svg).unwrap();
        write_chart(&series(), &json, ChartFormat::Plotly).unwrap();
        assert!(std::fs::read_to_string(svg).unwrap().starts_with("<svg"));
        let figure: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(figure["data"][0]["type"], "candlestick");
    }

    #[test]
    fn empty_series_is_not_charted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.svg");
        assert!(write_chart(&QuoteSeries::empty(), &path, ChartFormat::Svg).is_err());
        assert!(!path.exists());
    }
}
