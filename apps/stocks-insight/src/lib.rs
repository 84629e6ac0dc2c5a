// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Stocks Insight - Quote Dashboard Library
//!
//! Fetches OHLCV bars from a quotes provider, normalizes them into one
//! series type, renders a candlestick/volume chart, and asks a hosted model
//! about the data.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure types and transforms
//!   - `quotes`: `QuoteBar`, `QuoteSeries`, provider payload normalization
//!   - `chart`: two-track `ChartSpec` built from a series
//!   - `insight`: summary statistics and the prompt template
//!   - `shared`: `Symbol`, popular-symbols picker, `DomainError`
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `QuoteSourcePort`, `TextGenerationPort`
//!   - `use_cases`: `FetchQuotes`, `RequestInsight`
//!   - `Session`: last symbol, request and series for one user
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `quotes`: Alpha Vantage and Polygon HTTP sources
//!   - `llm`: Gemini client
//!   - `render`: SVG, Plotly JSON and text table output
//!
//! - **Config / CLI / Telemetry**: YAML configuration, clap commands, tracing setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Hexagonal Layers
// =============================================================================

pub mod application;
pub mod domain;
pub mod infrastructure;

// =============================================================================
// Edges
// =============================================================================

pub mod cli;
pub mod config;
pub mod telemetry;

pub use application::Session;
pub use config::{Config, ConfigError, load_config};
pub use domain::chart::{ChartBuilder, ChartSpec};
pub use domain::quotes::{QuoteBar, QuoteRequest, QuoteSeries, RawQuotePayload};
pub use domain::shared::Symbol;
