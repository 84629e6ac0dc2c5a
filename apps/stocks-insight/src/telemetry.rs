//! Tracing Setup
//!
//! Console logging to stderr so command output on stdout stays clean.
//!
//! # Configuration
//!
//! - `RUST_LOG`: overrides the configured level when set
//! - `observability.logging.level`: level for this crate (default `info`)
//! - `observability.logging.format`: `pretty` or `json`
//!
//! # Usage
//!
//! ```rust,ignore
//! use stocks_insight::telemetry::init_telemetry;
//!
//! let config = load_config(None)?;
//! init_telemetry(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG` when set, else `stocks_insight=<level>` with
/// everything else at `warn`.
#[must_use]
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!("warn,stocks_insight={}", logging.level))
            .unwrap_or_else(|_| EnvFilter::new("warn,stocks_insight=info"))
    })
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_telemetry(logging: &LoggingConfig) {
    let filter = env_filter(logging);

    let result = match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(level = %logging.level, format = ?logging.format, "Logging initialized");
    }
}
