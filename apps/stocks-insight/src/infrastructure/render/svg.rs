//! Self-contained SVG rendering of a chart.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::chart::{ChartSpec, ValueAxis};

const RISING_COLOR: &str = "#26a69a";
const FALLING_COLOR: &str = "#ef5350";
const AXIS_COLOR: &str = "#444";
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MAX_CANDLE_WIDTH: f64 = 12.0;
const FIGURE_WIDTH: u32 = 1000;

/// Vertical extent of one panel in pixels.
#[derive(Debug, Clone, Copy)]
struct Panel {
    top: f64,
    height: f64,
}

impl Panel {
    fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Pixel y of `value` on `axis`, inverted so larger values sit higher.
    fn y(self, value: Decimal, axis: &ValueAxis) -> f64 {
        let min = to_f64(axis.min);
        let max = to_f64(axis.max);
        let span = max - min;
        if span <= 0.0 {
            return self.top + self.height / 2.0;
        }
        self.bottom() - (to_f64(value) - min) / span * self.height
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a [`ChartSpec`] as SVG markup, 1000 px wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    /// Create a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render `spec`. Height comes from the spec.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, spec: &ChartSpec) -> String {
        let width = f64::from(FIGURE_WIDTH);
        let height = f64::from(spec.height);
        let plot_left = MARGIN_LEFT;
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        let gap = plot_height * spec.vertical_spacing;
        let usable = plot_height - gap;
        let total_ratio = spec.price.height_ratio + spec.volume.height_ratio;
        let price_panel = Panel {
            top: MARGIN_TOP,
            height: usable * spec.price.height_ratio / total_ratio,
        };
        let volume_panel = Panel {
            top: price_panel.bottom() + gap,
            height: usable * spec.volume.height_ratio / total_ratio,
        };

        let start = spec.x_axis.start;
        let span_secs = (spec.x_axis.end - start).num_seconds() as f64;
        let slots = spec.len().max(1) as f64;
        let candle_width = (plot_width / slots * 0.7).clamp(1.0, MAX_CANDLE_WIDTH);
        let inner_width = plot_width - candle_width;
        let x_of = |ts: NaiveDateTime| -> f64 {
            if span_secs <= 0.0 {
                return plot_left + plot_width / 2.0;
            }
            let offset = (ts - start).num_seconds() as f64;
            plot_left + candle_width / 2.0 + offset / span_secs * inner_width
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = FIGURE_WIDTH,
            h = spec.height,
        );
        let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="18">{}</text>"#,
            width / 2.0,
            escape(&spec.title)
        );

        for (panel, title, axis) in [
            (price_panel, &spec.price.title, &spec.price.y_axis),
            (volume_panel, &spec.volume.title, &spec.volume.y_axis),
        ] {
            let _ = writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
                plot_left + plot_width / 2.0,
                panel.top - 6.0,
                escape(title)
            );
            let _ = writeln!(
                out,
                r#"<rect x="{plot_left:.1}" y="{:.1}" width="{plot_width:.1}" height="{:.1}" fill="none" stroke="{AXIS_COLOR}"/>"#,
                panel.top, panel.height
            );
            let mid = panel.top + panel.height / 2.0;
            let _ = writeln!(
                out,
                r#"<text x="16" y="{mid:.1}" text-anchor="middle" transform="rotate(-90 16 {mid:.1})">{}</text>"#,
                escape(&axis.title)
            );
            let _ = writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                plot_left - 4.0,
                panel.top + 10.0,
                axis.max.round_dp(2)
            );
            let _ = writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                plot_left - 4.0,
                panel.bottom(),
                axis.min.round_dp(2)
            );
        }

        let _ = writeln!(out, r#"<g class="candles">"#);
        for candle in &spec.price.candles {
            let x = x_of(candle.timestamp);
            let color = if candle.is_rising() {
                RISING_COLOR
            } else {
                FALLING_COLOR
            };
            let axis = &spec.price.y_axis;
            let y_high = price_panel.y(candle.high, axis);
            let y_low = price_panel.y(candle.low, axis);
            let y_open = price_panel.y(candle.open, axis);
            let y_close = price_panel.y(candle.close, axis);
            let body_top = y_open.min(y_close);
            let body_height = (y_open - y_close).abs().max(1.0);
            let _ = writeln!(
                out,
                r#"<line x1="{x:.1}" y1="{y_high:.1}" x2="{x:.1}" y2="{y_low:.1}" stroke="{color}"/>"#
            );
            let _ = writeln!(
                out,
                r#"<rect x="{:.1}" y="{body_top:.1}" width="{candle_width:.1}" height="{body_height:.1}" fill="{color}"/>"#,
                x - candle_width / 2.0
            );
        }
        let _ = writeln!(out, "</g>");

        let _ = writeln!(out, r#"<g class="volume" fill="{}">"#, escape(&spec.volume.color));
        for bar in &spec.volume.bars {
            let x = x_of(bar.timestamp);
            let top = volume_panel.y(Decimal::from(bar.volume), &spec.volume.y_axis);
            let bar_height = (volume_panel.bottom() - top).max(0.0);
            let _ = writeln!(
                out,
                r#"<rect x="{:.1}" y="{top:.1}" width="{candle_width:.1}" height="{bar_height:.1}"/>"#,
                x - candle_width / 2.0
            );
        }
        let _ = writeln!(out, "</g>");

        let axis_y = volume_panel.bottom() + 16.0;
        let _ = writeln!(
            out,
            r#"<text x="{plot_left:.1}" y="{axis_y:.1}" text-anchor="start">{}</text>"#,
            start.format("%Y-%m-%d %H:%M")
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{axis_y:.1}" text-anchor="end">{}</text>"#,
            plot_left + plot_width,
            spec.x_axis.end.format("%Y-%m-%d %H:%M")
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            plot_left + plot_width / 2.0,
            axis_y + 18.0,
            escape(&spec.x_axis.title)
        );
        let _ = writeln!(out, "</svg>");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartBuilder;
    use crate::domain::quotes::{QuoteBar, QuoteSeries};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn spec(n: u32) -> ChartSpec {
        let bars = (1..=n)
            .map(|d| {
                let ts = NaiveDate::from_ymd_opt(2024, 1, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap();
                let (open, close) = if d % 2 == 0 {
                    (dec!(10), dec!(11))
                } else {
                    (dec!(11), dec!(10))
                };
                QuoteBar::new(ts, open, dec!(12), dec!(9), close, 500)
            })
            .collect();
        ChartBuilder::new().build(&QuoteSeries::new(bars)).unwrap()
    }

    #[test]
    fn svg_has_both_panels_and_titles() {
        let svg = SvgRenderer::new().render(&spec(4));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Stock Data"));
        assert!(svg.contains("Stock Price"));
        assert!(svg.contains(r#"height="600""#));
        assert!(svg.contains(r#"fill="rgba(0, 0, 255, 0.5)""#));
    }

    #[test]
    fn candles_are_colored_by_direction() {
        let svg = SvgRenderer::new().render(&spec(4));
        assert!(svg.contains(RISING_COLOR));
        assert!(svg.contains(FALLING_COLOR));
    }

    #[test]
    fn single_bar_renders() {
        let svg = SvgRenderer::new().render(&spec(1));
        assert!(svg.contains(r#"width="1000""#));
        assert_eq!(svg.matches("<line").count(), 1);
    }

    #[test]
    fn title_is_escaped() {
        let mut chart = spec(2);
        chart.title = "A & B <C>".to_string();
        let svg = SvgRenderer::new().render(&chart);
        assert!(svg.contains("A &amp; B &lt;C&gt;"));
    }
}
