//! Chart builder.

use rust_decimal::Decimal;
use thiserror::Error;

use super::spec::{
    AxisId, Candle, ChartSpec, PriceTrack, TimeAxis, ValueAxis, VolumeBar, VolumeTrack,
};
use crate::domain::quotes::QuoteSeries;

/// Chart construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The series had no bars; callers branch on emptiness before building.
    #[error("cannot chart an empty series")]
    EmptySeries,
}

/// Layout options for [`ChartSpec`].
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    title: String,
    height: u32,
    price_ratio: f64,
    vertical_spacing: f64,
    volume_color: String,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self {
            title: "Stock Data".to_string(),
            height: 600,
            price_ratio: 0.7,
            vertical_spacing: 0.1,
            volume_color: "rgba(0, 0, 255, 0.5)".to_string(),
        }
    }
}

impl ChartBuilder {
    /// Builder with the default layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the figure title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the figure height in pixels.
    #[must_use]
    pub const fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Build the two-track chart.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::EmptySeries`] if the series has no bars.
    pub fn build(&self, series: &QuoteSeries) -> Result<ChartSpec, ChartError> {
        let (start, end) = series.time_range().ok_or(ChartError::EmptySeries)?;
        let bars = series.bars();

        let candles: Vec<Candle> = bars
            .iter()
            .map(|b| Candle {
                timestamp: b.timestamp,
                open: b.open,
                high: b.high,
                low: b.low,
                close: b.close,
            })
            .collect();

        let volume_bars: Vec<VolumeBar> = bars
            .iter()
            .map(|b| VolumeBar {
                timestamp: b.timestamp,
                volume: b.volume,
            })
            .collect();

        let price_min = bars.iter().map(|b| b.low).min().unwrap_or(Decimal::ZERO);
        let price_max = bars.iter().map(|b| b.high).max().unwrap_or(Decimal::ZERO);
        let volume_max = bars.iter().map(|b| b.volume).max().unwrap_or(0);

        Ok(ChartSpec {
            title: self.title.clone(),
            height: self.height,
            vertical_spacing: self.vertical_spacing,
            x_axis: TimeAxis {
                title: "Date".to_string(),
                start,
                end,
            },
            price: PriceTrack {
                title: "Stock Price".to_string(),
                name: "Price".to_string(),
                y_axis: ValueAxis {
                    id: AxisId::Price,
                    title: "Price".to_string(),
                    min: price_min,
                    max: price_max,
                },
                height_ratio: self.price_ratio,
                range_slider: false,
                candles,
            },
            volume: VolumeTrack {
                title: "Volume".to_string(),
                name: "Volume".to_string(),
                y_axis: ValueAxis {
                    id: AxisId::Volume,
                    title: "Volume".to_string(),
                    min: Decimal::ZERO,
                    max: Decimal::from(volume_max),
                },
                height_ratio: 1.0 - self.price_ratio,
                color: self.volume_color.clone(),
                bars: volume_bars,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteBar;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn series() -> QuoteSeries {
        let bar = |hour: u32, low: Decimal, high: Decimal, volume: u64| {
            let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap();
            QuoteBar::new(ts, dec!(10), high, low, dec!(11), volume)
        };
        QuoteSeries::new(vec![
            bar(10, dec!(9), dec!(12), 500),
            bar(11, dec!(8.5), dec!(13), 1500),
            bar(12, dec!(9.5), dec!(11.5), 700),
        ])
    }

    #[test]
    fn empty_series_is_rejected() {
        let result = ChartBuilder::new().build(&QuoteSeries::empty());
        assert_eq!(result, Err(ChartError::EmptySeries));
    }

    #[test]
    fn tracks_share_x_extent() {
        let chart = ChartBuilder::new().build(&series()).unwrap();
        assert_eq!(chart.price_x_extent(), chart.volume_x_extent());
        assert_eq!(
            chart.price_x_extent(),
            Some((chart.x_axis.start, chart.x_axis.end))
        );
        assert_eq!(chart.price.candles.len(), chart.volume.bars.len());
    }

    #[test]
    fn volume_uses_its_own_axis() {
        let chart = ChartBuilder::new().build(&series()).unwrap();
        assert_eq!(chart.price.y_axis.id, AxisId::Price);
        assert_eq!(chart.volume.y_axis.id, AxisId::Volume);
        assert_ne!(chart.price.y_axis.id, chart.volume.y_axis.id);
    }

    #[test]
    fn layout_defaults() {
        let chart = ChartBuilder::new().build(&series()).unwrap();
        assert!((chart.price.height_ratio - 0.7).abs() < 1e-9);
        assert!((chart.volume.height_ratio - 0.3).abs() < 1e-9);
        assert!(!chart.price.range_slider);
        assert_eq!(chart.height, 600);
        assert_eq!(chart.title, "Stock Data");
        assert_eq!(chart.x_axis.title, "Date");
    }

    #[test]
    fn axis_ranges_cover_data() {
        let chart = ChartBuilder::new().build(&series()).unwrap();
        assert_eq!(chart.price.y_axis.min, dec!(8.5));
        assert_eq!(chart.price.y_axis.max, dec!(13));
        assert_eq!(chart.volume.y_axis.min, Decimal::ZERO);
        assert_eq!(chart.volume.y_axis.max, dec!(1500));
    }

    #[test]
    fn custom_title_and_height() {
        let chart = ChartBuilder::new()
            .with_title("IBM Stock Data")
            .with_height(800)
            .build(&series())
            .unwrap();
        assert_eq!(chart.title, "IBM Stock Data");
        assert_eq!(chart.height, 800);
    }
}
