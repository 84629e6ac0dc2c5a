//! Text-generation configuration.

use serde::{Deserialize, Serialize};

use crate::domain::insight::DEFAULT_RECENT_ROWS;

/// Hosted model settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Model API key (`GEMINI_API`).
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Trailing Close rows quoted in the prompt.
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            recent_rows: default_recent_rows(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("recent_rows", &self.recent_rows)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

const fn default_recent_rows() -> usize {
    DEFAULT_RECENT_ROWS
}

const fn default_timeout_secs() -> u64 {
    60
}
