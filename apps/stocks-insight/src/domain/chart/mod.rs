//! Chart Domain
//!
//! Two-track chart derived from a [`QuoteSeries`](crate::domain::quotes::QuoteSeries):
//! a candlestick track above a volume track, sharing one time axis.

mod builder;
mod spec;

pub use builder::{ChartBuilder, ChartError};
pub use spec::{AxisId, Candle, ChartSpec, PriceTrack, TimeAxis, ValueAxis, VolumeBar, VolumeTrack};
