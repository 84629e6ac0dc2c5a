//! Chart specification types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Identifies the y-axis a track is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisId {
    /// Price axis of the candlestick track.
    Price,
    /// Volume axis of the volume track.
    Volume,
}

/// Time axis shared by both tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeAxis {
    /// Axis title, drawn under the bottom track.
    pub title: String,
    /// Earliest bar timestamp.
    pub start: NaiveDateTime,
    /// Latest bar timestamp.
    pub end: NaiveDateTime,
}

/// A value axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueAxis {
    /// Which axis this is.
    pub id: AxisId,
    /// Axis title.
    pub title: String,
    /// Smallest plotted value.
    pub min: Decimal,
    /// Largest plotted value.
    pub max: Decimal,
}

/// One candlestick glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candle {
    /// X position.
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
}

impl Candle {
    /// Whether the body is drawn as rising.
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// One volume bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeBar {
    /// X position.
    pub timestamp: NaiveDateTime,
    /// Bar height.
    pub volume: u64,
}

/// Upper track: candlesticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTrack {
    /// Subplot title.
    pub title: String,
    /// Trace name.
    pub name: String,
    /// Price axis.
    pub y_axis: ValueAxis,
    /// Share of the plot height.
    pub height_ratio: f64,
    /// Whether the x range slider is shown under this track.
    pub range_slider: bool,
    /// Glyphs in time order.
    pub candles: Vec<Candle>,
}

/// Lower track: volume bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeTrack {
    /// Subplot title.
    pub title: String,
    /// Trace name.
    pub name: String,
    /// Volume axis.
    pub y_axis: ValueAxis,
    /// Share of the plot height.
    pub height_ratio: f64,
    /// Bar fill color (CSS).
    pub color: String,
    /// Bars in time order.
    pub bars: Vec<VolumeBar>,
}

/// Stateless two-track rendering of a quote series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Figure title.
    pub title: String,
    /// Figure height in pixels.
    pub height: u32,
    /// Gap between the tracks as a share of the plot height.
    pub vertical_spacing: f64,
    /// Shared time axis.
    pub x_axis: TimeAxis,
    /// Candlestick track.
    pub price: PriceTrack,
    /// Volume track.
    pub volume: VolumeTrack,
}

impl ChartSpec {
    /// First and last x of the candlestick track.
    #[must_use]
    pub fn price_x_extent(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((
            self.price.candles.first()?.timestamp,
            self.price.candles.last()?.timestamp,
        ))
    }

    /// First and last x of the volume track.
    #[must_use]
    pub fn volume_x_extent(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((
            self.volume.bars.first()?.timestamp,
            self.volume.bars.last()?.timestamp,
        ))
    }

    /// Number of bars plotted on each track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.price.candles.len()
    }

    /// Whether the chart has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price.candles.is_empty()
    }
}
