//! Plotly figure JSON.
//!
//! Two stacked subplots sharing the x axis: candlesticks on `x`/`y`, volume
//! bars on `x2`/`y2`. The result can be passed to `Plotly.newPlot` as is.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::RenderError;
use crate::domain::chart::ChartSpec;
use crate::domain::quotes::TIMESTAMP_FORMAT;

/// Serializable Plotly figure.
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyFigure {
    data: (CandlestickTrace, BarTrace),
    layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
struct CandlestickTrace {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    x: Vec<String>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    xaxis: &'static str,
    yaxis: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct BarTrace {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    x: Vec<String>,
    y: Vec<u64>,
    marker: Marker,
    xaxis: &'static str,
    yaxis: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct Marker {
    color: String,
}

#[derive(Debug, Clone, Serialize)]
struct Title {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct RangeSlider {
    visible: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Axis {
    anchor: &'static str,
    domain: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct Annotation {
    text: String,
    x: f64,
    y: f64,
    xref: &'static str,
    yref: &'static str,
    xanchor: &'static str,
    yanchor: &'static str,
    showarrow: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Layout {
    title: Title,
    height: u32,
    showlegend: bool,
    xaxis: Axis,
    yaxis: Axis,
    xaxis2: Axis,
    yaxis2: Axis,
    annotations: Vec<Annotation>,
}

fn num(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn title(text: &str) -> Option<Title> {
    Some(Title {
        text: text.to_string(),
    })
}

fn subplot_title(text: &str, top: f64) -> Annotation {
    Annotation {
        text: text.to_string(),
        x: 0.5,
        y: top,
        xref: "paper",
        yref: "paper",
        xanchor: "center",
        yanchor: "bottom",
        showarrow: false,
    }
}

impl PlotlyFigure {
    /// Lay out `spec` as a two-row Plotly figure.
    #[must_use]
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let price = &spec.price;
        let volume = &spec.volume;

        // Row domains, bottom-up in paper coordinates.
        let spacing = spec.vertical_spacing.clamp(0.0, 0.9);
        let usable = 1.0 - spacing;
        let total_ratio = price.height_ratio + volume.height_ratio;
        let volume_top = usable * volume.height_ratio / total_ratio;
        let price_bottom = volume_top + spacing;

        let candle_x = price
            .candles
            .iter()
            .map(|c| c.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();
        let bar_x = volume
            .bars
            .iter()
            .map(|b| b.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();

        let candles = CandlestickTrace {
            kind: "candlestick",
            name: price.name.clone(),
            x: candle_x,
            open: price.candles.iter().map(|c| num(c.open)).collect(),
            high: price.candles.iter().map(|c| num(c.high)).collect(),
            low: price.candles.iter().map(|c| num(c.low)).collect(),
            close: price.candles.iter().map(|c| num(c.close)).collect(),
            xaxis: "x",
            yaxis: "y",
        };

        let bars = BarTrace {
            kind: "bar",
            name: volume.name.clone(),
            x: bar_x,
            y: volume.bars.iter().map(|b| b.volume).collect(),
            marker: Marker {
                color: volume.color.clone(),
            },
            xaxis: "x2",
            yaxis: "y2",
        };

        let layout = Layout {
            title: Title {
                text: spec.title.clone(),
            },
            height: spec.height,
            showlegend: false,
            xaxis: Axis {
                anchor: "y",
                domain: [0.0, 1.0],
                title: None,
                matches: Some("x2"),
                rangeslider: Some(RangeSlider {
                    visible: price.range_slider,
                }),
                range: None,
            },
            yaxis: Axis {
                anchor: "x",
                domain: [price_bottom, 1.0],
                title: title(&price.y_axis.title),
                matches: None,
                rangeslider: None,
                range: None,
            },
            xaxis2: Axis {
                anchor: "y2",
                domain: [0.0, 1.0],
                title: title(&spec.x_axis.title),
                matches: None,
                rangeslider: None,
                range: None,
            },
            yaxis2: Axis {
                anchor: "x2",
                domain: [0.0, volume_top],
                title: title(&volume.y_axis.title),
                matches: None,
                rangeslider: None,
                range: Some([num(volume.y_axis.min), num(volume.y_axis.max)]),
            },
            annotations: vec![
                subplot_title(&price.title, 1.0),
                subplot_title(&volume.title, volume_top),
            ],
        };

        Self {
            data: (candles, bars),
            layout,
        }
    }

    /// Figure as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
