//! Provider payload normalization.
//!
//! Each provider's JSON body is wrapped in a [`RawQuotePayload`] variant and
//! projected into the canonical [`QuoteBar`] columns:
//!
//! - Alpha Vantage: `{"Time Series (5min)": {"2024-01-02 09:30:00": {"1. open": "10.0", ...}}}`
//! - Polygon: `{"results": [{"t": 1700000000000, "o": 10, "h": 12, "l": 9, "c": 11, "v": 1000}]}`

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{QuoteBar, QuoteProvider, QuoteSeries};

/// Key prefix of the Alpha Vantage series object.
const TIME_SERIES_PREFIX: &str = "Time Series";

/// Keys providers use to explain why no data came back, in priority order.
const NOTICE_KEYS: [&str; 6] = [
    "Error Message",
    "Note",
    "Information",
    "error",
    "message",
    "status",
];

/// The expected result field was absent from a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} response has no '{expected}' field{}", notice_suffix(.notice.as_deref()))]
pub struct MissingSeries {
    /// Provider that answered.
    pub provider: QuoteProvider,
    /// The field that was looked for.
    pub expected: &'static str,
    /// Provider explanation (rate limit note, error message), if any.
    pub notice: Option<String>,
}

fn notice_suffix(notice: Option<&str>) -> String {
    notice.map_or_else(String::new, |n| format!(": {n}"))
}

/// Decoded JSON body tagged by the schema it follows.
#[derive(Debug, Clone, PartialEq)]
pub enum RawQuotePayload {
    /// Alpha Vantage intraday body.
    AlphaVantage(Value),
    /// Polygon aggregates body.
    Polygon(Value),
}

impl RawQuotePayload {
    /// Provider whose schema this payload follows.
    #[must_use]
    pub const fn provider(&self) -> QuoteProvider {
        match self {
            Self::AlphaVantage(_) => QuoteProvider::AlphaVantage,
            Self::Polygon(_) => QuoteProvider::Polygon,
        }
    }

    /// Project the payload into a [`QuoteSeries`].
    ///
    /// Rows whose numeric fields cannot be parsed are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`MissingSeries`] when the provider's result field is absent.
    pub fn normalize(&self) -> Result<QuoteSeries, MissingSeries> {
        match self {
            Self::AlphaVantage(body) => normalize_alpha_vantage(body),
            Self::Polygon(body) => normalize_polygon(body),
        }
    }
}

// =============================================================================
// Alpha Vantage
// =============================================================================

/// Leading ordinal such as `"1. "` on Alpha Vantage field names.
///
/// Whitespace after the dot is required so a plain decimal like `"189.45"`
/// is never mistaken for a prefix.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn ordinal_prefix() -> &'static Regex {
    static ORDINAL_PREFIX: OnceLock<Regex> = OnceLock::new();
    ORDINAL_PREFIX.get_or_init(|| Regex::new(r"^\d+\.\s+").expect("ordinal prefix regex is valid"))
}

/// Strip a leading ordinal prefix from a field name or value.
fn strip_ordinal(text: &str) -> &str {
    let text = text.trim();
    ordinal_prefix().find(text).map_or(text, |m| &text[m.end()..])
}

fn normalize_alpha_vantage(body: &Value) -> Result<QuoteSeries, MissingSeries> {
    let missing = || MissingSeries {
        provider: QuoteProvider::AlphaVantage,
        expected: TIME_SERIES_PREFIX,
        notice: provider_notice(body),
    };

    let root = body.as_object().ok_or_else(missing)?;
    let rows = root
        .iter()
        .find(|(key, _)| key.starts_with(TIME_SERIES_PREFIX))
        .and_then(|(_, value)| value.as_object())
        .ok_or_else(missing)?;

    let bars = rows
        .iter()
        .filter_map(|(timestamp, fields)| {
            let bar = parse_alpha_vantage_row(timestamp, fields);
            if bar.is_none() {
                tracing::warn!(timestamp = %timestamp, "Dropping unparseable Alpha Vantage row");
            }
            bar
        })
        .collect::<Vec<_>>();
    flag_ill_formed(&bars);

    let series = QuoteSeries::new(bars);
    Ok(match alpha_vantage_time_zone(root) {
        Some(tz) => series.with_time_zone(tz),
        None => series,
    })
}

fn parse_alpha_vantage_row(timestamp: &str, fields: &Value) -> Option<QuoteBar> {
    let fields = fields.as_object()?;
    let timestamp = parse_provider_timestamp(timestamp)?;

    let mut open = None;
    let mut high = None;
    let mut low = None;
    let mut close = None;
    let mut volume = None;

    for (name, value) in fields {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        let number = Decimal::from_str(strip_ordinal(&text)).ok();
        match strip_ordinal(name).to_ascii_lowercase().as_str() {
            "open" => open = number,
            "high" => high = number,
            "low" => low = number,
            "close" => close = number,
            "volume" => volume = number.and_then(whole_volume),
            _ => {}
        }
    }

    Some(QuoteBar::new(timestamp, open?, high?, low?, close?, volume?))
}

/// The `N. Time Zone` entry of the `Meta Data` object.
fn alpha_vantage_time_zone(root: &Map<String, Value>) -> Option<String> {
    root.get("Meta Data")?
        .as_object()?
        .iter()
        .find(|(key, _)| strip_ordinal(key).eq_ignore_ascii_case("time zone"))
        .and_then(|(_, value)| value.as_str())
        .map(str::to_string)
}

fn parse_provider_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// =============================================================================
// Polygon
// =============================================================================

/// One element of the Polygon `results` array.
#[derive(Debug, Deserialize)]
struct PolygonAggregate {
    /// Window start, epoch milliseconds.
    t: i64,
    o: Decimal,
    h: Decimal,
    l: Decimal,
    c: Decimal,
    v: Decimal,
}

fn normalize_polygon(body: &Value) -> Result<QuoteSeries, MissingSeries> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| MissingSeries {
            provider: QuoteProvider::Polygon,
            expected: "results",
            notice: provider_notice(body),
        })?;

    let bars = results
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let bar = parse_polygon_row(entry);
            if bar.is_none() {
                tracing::warn!(index, "Dropping unparseable Polygon aggregate");
            }
            bar
        })
        .collect::<Vec<_>>();
    flag_ill_formed(&bars);

    Ok(QuoteSeries::new(bars).with_time_zone("UTC"))
}

fn parse_polygon_row(entry: &Value) -> Option<QuoteBar> {
    let agg = PolygonAggregate::deserialize(entry).ok()?;
    let timestamp = DateTime::from_timestamp_millis(agg.t)?.naive_utc();
    Some(QuoteBar::new(
        timestamp,
        agg.o,
        agg.h,
        agg.l,
        agg.c,
        whole_volume(agg.v)?,
    ))
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Round a volume to a whole, non-negative share count.
fn whole_volume(volume: Decimal) -> Option<u64> {
    if volume.is_sign_negative() && !volume.is_zero() {
        return None;
    }
    volume.round().to_u64()
}

/// Log bars whose prices are inconsistent. They are kept as delivered.
fn flag_ill_formed(bars: &[QuoteBar]) -> usize {
    let mut count = 0;
    for bar in bars.iter().filter(|b| !b.is_well_formed()) {
        tracing::debug!(
            timestamp = %bar.formatted_timestamp(),
            open = %bar.open,
            high = %bar.high,
            low = %bar.low,
            close = %bar.close,
            "Provider bar has inconsistent prices"
        );
        count += 1;
    }
    count
}

/// First explanatory message found in an error body.
fn provider_notice(body: &Value) -> Option<String> {
    let root = body.as_object()?;
    NOTICE_KEYS.iter().find_map(|key| match root.get(*key)? {
        Value::String(s) if !s.trim().is_empty() && !s.trim().eq_ignore_ascii_case("ok") => {
            Some(s.trim().to_string())
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn alpha_vantage_body() -> Value {
        json!({
            "Meta Data": {
                "1. Information": "Intraday (5min) open, high, low, close prices and volume",
                "2. Symbol": "IBM",
                "6. Time Zone": "US/Eastern"
            },
            "Time Series (5min)": {
                "2024-01-02 09:35:00": {
                    "1. open": "161.5000",
                    "2. high": "162.0000",
                    "3. low": "161.2500",
                    "4. close": "161.9000",
                    "5. volume": "12345"
                },
                "2024-01-02 09:30:00": {
                    "1. open": "161.0000",
                    "2. high": "161.6000",
                    "3. low": "160.9000",
                    "4. close": "161.5000",
                    "5. volume": "23456"
                }
            }
        })
    }

    #[test]
    fn alpha_vantage_one_row_per_timestamp() {
        let series = RawQuotePayload::AlphaVantage(alpha_vantage_body())
            .normalize()
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.time_zone(), Some("US/Eastern"));

        let first = &series.bars()[0];
        assert_eq!(first.formatted_timestamp(), "2024-01-02 09:30:00");
        assert_eq!(first.open, dec!(161.0));
        assert_eq!(first.high, dec!(161.6));
        assert_eq!(first.low, dec!(160.9));
        assert_eq!(first.close, dec!(161.5));
        assert_eq!(first.volume, 23456);
    }

    #[test]
    fn alpha_vantage_missing_key_carries_note() {
        let body = json!({ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute." });
        let err = RawQuotePayload::AlphaVantage(body).normalize().unwrap_err();
        assert_eq!(err.provider, QuoteProvider::AlphaVantage);
        assert!(err.notice.unwrap().contains("call frequency"));
    }

    #[test]
    fn alpha_vantage_error_message_for_unknown_symbol() {
        let body = json!({ "Error Message": "Invalid API call." });
        let err = RawQuotePayload::AlphaVantage(body).normalize().unwrap_err();
        assert_eq!(err.notice.as_deref(), Some("Invalid API call."));
        assert!(err.to_string().contains("Invalid API call."));
    }

    #[test]
    fn alpha_vantage_drops_row_with_bad_number() {
        let body = json!({
            "Time Series (1min)": {
                "2024-01-02 09:30:00": {
                    "1. open": "n/a", "2. high": "1", "3. low": "1", "4. close": "1", "5. volume": "1"
                },
                "2024-01-02 09:31:00": {
                    "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "1", "5. volume": "1"
                }
            }
        });
        let series = RawQuotePayload::AlphaVantage(body).normalize().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.bars()[0].formatted_timestamp(), "2024-01-02 09:31:00");
    }

    #[test]
    fn alpha_vantage_strips_prefix_from_values() {
        let body = json!({
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "1. 10.5", "2. high": "11", "3. low": "10", "4. close": "10.75", "5. volume": "900"
                }
            }
        });
        let series = RawQuotePayload::AlphaVantage(body).normalize().unwrap();
        assert_eq!(series.bars()[0].open, dec!(10.5));
        assert_eq!(series.bars()[0].formatted_timestamp(), "2024-01-02 00:00:00");
    }

    #[test]
    fn strip_ordinal_leaves_plain_decimals() {
        assert_eq!(strip_ordinal("189.45"), "189.45");
        assert_eq!(strip_ordinal("1. open"), "open");
        assert_eq!(strip_ordinal("5. volume"), "volume");
        assert_eq!(strip_ordinal("1. 10.5"), "10.5");
    }

    #[test]
    fn polygon_end_to_end_example() {
        let body = json!({"results":[{"t":1700000000000_i64,"o":10,"h":12,"l":9,"c":11,"v":1000}]});
        let series = RawQuotePayload::Polygon(body).normalize().unwrap();
        assert_eq!(series.len(), 1);

        let bar = &series.bars()[0];
        assert_eq!(bar.open, dec!(10));
        assert_eq!(bar.high, dec!(12));
        assert_eq!(bar.low, dec!(9));
        assert_eq!(bar.close, dec!(11));
        assert_eq!(bar.volume, 1000);
        assert_eq!(
            bar.timestamp,
            DateTime::from_timestamp_millis(1_700_000_000_000)
                .unwrap()
                .naive_utc()
        );
        assert_eq!(bar.formatted_timestamp(), "2023-11-14 22:13:20");
        assert_eq!(series.time_zone(), Some("UTC"));
    }

    #[test]
    fn polygon_preserves_input_order() {
        let body = json!({"results":[
            {"t":1_700_000_000_000_i64,"o":1,"h":1,"l":1,"c":1,"v":1},
            {"t":1_700_000_060_000_i64,"o":2,"h":2,"l":2,"c":2,"v":2},
            {"t":1_700_000_120_000_i64,"o":3,"h":3,"l":3,"c":3,"v":3}
        ]});
        let series = RawQuotePayload::Polygon(body).normalize().unwrap();
        let closes: Vec<_> = series.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[test]
    fn polygon_fractional_volume_rounds() {
        let body = json!({"results":[{"t":1_700_000_000_000_i64,"o":1.5,"h":2,"l":1,"c":1.75,"v":1234.6}]});
        let series = RawQuotePayload::Polygon(body).normalize().unwrap();
        assert_eq!(series.bars()[0].volume, 1235);
        assert_eq!(series.bars()[0].close, dec!(1.75));
    }

    #[test]
    fn polygon_missing_results_carries_error() {
        let body = json!({"status":"NOT_AUTHORIZED","request_id":"abc","message":"Unknown API Key"});
        let err = RawQuotePayload::Polygon(body).normalize().unwrap_err();
        assert_eq!(err.expected, "results");
        assert_eq!(err.notice.as_deref(), Some("Unknown API Key"));
    }

    #[test]
    fn polygon_ok_status_without_results_has_no_notice() {
        let body = json!({"status": "OK", "resultsCount": 0, "ticker": "IBM"});
        let err = RawQuotePayload::Polygon(body).normalize().unwrap_err();
        assert!(err.notice.is_none());
    }

    #[test]
    fn polygon_empty_results_is_empty_series() {
        let body = json!({"results": [], "resultsCount": 0});
        let series = RawQuotePayload::Polygon(body).normalize().unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn non_object_body_is_missing() {
        let err = RawQuotePayload::AlphaVantage(json!([1, 2, 3]))
            .normalize()
            .unwrap_err();
        assert!(err.notice.is_none());
    }

    #[test]
    fn whole_volume_rejects_negative() {
        assert_eq!(whole_volume(dec!(-1)), None);
        assert_eq!(whole_volume(dec!(0)), Some(0));
    }

    #[test]
    fn inconsistent_bars_are_flagged_but_kept() {
        let body = json!({
            "results": [
                { "t": 1_704_067_200_000_i64, "o": 10, "h": 12, "l": 9, "c": 11, "v": 100 },
                { "t": 1_704_153_600_000_i64, "o": 10, "h": 9, "l": 11, "c": 13, "v": 200 }
            ]
        });

        let series = RawQuotePayload::Polygon(body).normalize().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(flag_ill_formed(series.bars()), 1);
    }
}
