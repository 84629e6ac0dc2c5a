//! Domain Layer
//!
//! Pure types and transforms with no I/O:
//!
//! - `shared`: Symbol value object and popular-symbol picker
//! - `quotes`: `QuoteBar`, `QuoteSeries`, provider payload normalization
//! - `chart`: Two-track candlestick/volume `ChartSpec`
//! - `insight`: Summary statistics and prompt construction

pub mod chart;
pub mod insight;
pub mod quotes;
pub mod shared;
