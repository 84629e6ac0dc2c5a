//! Configuration loading and validation.
//!
//! Settings come from a YAML document with `${VAR}` / `${VAR:-default}`
//! environment interpolation. When the file does not exist the embedded
//! default document is used, so the two secret variables alone are enough.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stocks_insight::config::load_config;
//!
//! // config.yaml if present, embedded defaults otherwise
//! let config = load_config(None)?;
//!
//! // Explicit path; a missing file is an error
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

mod insight;
mod observability;
mod quotes;
mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use insight::InsightConfig;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use quotes::QuotesConfig;
pub use validation::{
    CredentialNeeds, INSIGHT_KEY_VAR, QUOTES_KEY_VAR, StartupError, validate_startup,
};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Document used when no config file exists.
pub const DEFAULT_CONFIG: &str = r#"
quotes:
  provider: ${STOCKS_PROVIDER:-alpha_vantage}
  api_key: "${STOCKS_API:-${stocks_api}}"
  alpha_vantage_url: https://www.alphavantage.co
  polygon_url: https://api.polygon.io
  timeout_secs: 30
insight:
  api_key: "${GEMINI_API:-${gemini_api}}"
  model: ${GEMINI_MODEL:-gemini-1.5-pro}
  base_url: https://generativelanguage.googleapis.com
  recent_rows: 5
  timeout_secs: 60
observability:
  logging:
    level: ${LOG_LEVEL:-info}
    format: ${LOG_FORMAT:-pretty}
"#;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Quotes provider settings.
    #[serde(default)]
    pub quotes: QuotesConfig,
    /// Text-generation settings.
    #[serde(default)]
    pub insight: InsightConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// With `path` unset, `config.yaml` is read if it exists and
/// [`DEFAULT_CONFIG`] is used otherwise.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let contents = match path {
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => read_file(DEFAULT_CONFIG_PATH)?,
        None => DEFAULT_CONFIG.to_string(),
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset variables
/// without a default become empty strings. A default may itself be a
/// reference, as in `${STOCKS_API:-${stocks_api}}`; the innermost
/// reference is resolved first.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    /// Deepest default nesting resolved.
    const MAX_PASSES: usize = 4;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^{}]*))?\}")
            .expect("env var regex is valid")
    });

    let mut output = input.to_string();
    for _ in 0..MAX_PASSES {
        let next = re
            .replace_all(&output, |cap: &regex::Captures<'_>| {
                let default_value = cap.get(2).map(|m| m.as_str());
                match std::env::var(&cap[1]) {
                    Ok(v) if !v.is_empty() => v,
                    _ => default_value.map_or_else(String::new, str::to_string),
                }
            })
            .into_owned();
        if next == output {
            break;
        }
        output = next;
    }
    output
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.quotes.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "quotes.timeout_secs must be positive".to_string(),
        ));
    }

    if config.insight.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "insight.timeout_secs must be positive".to_string(),
        ));
    }

    if config.insight.recent_rows == 0 {
        return Err(ConfigError::ValidationError(
            "insight.recent_rows must be positive".to_string(),
        ));
    }

    if config.insight.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "insight.model cannot be empty".to_string(),
        ));
    }

    for (name, url) in [
        ("quotes.alpha_vantage_url", &config.quotes.alpha_vantage_url),
        ("quotes.polygon_url", &config.quotes.polygon_url),
        ("insight.base_url", &config.insight.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be an http(s) URL, got '{url}'"
            )));
        }
    }

    Ok(())
}
