//! Runtime configuration from environment variables.

use std::time::Duration;

pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Gemini API key; `None` switches the AI calls to their fallbacks
    pub api_key: Option<String>,
    /// Gemini REST endpoint
    pub genai_base_url: String,
    /// Interval between video operation polls
    pub poll_interval: Duration,
    /// Emit JSON log lines instead of the pretty format
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            genai_base_url: DEFAULT_GENAI_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup("API_KEY")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            genai_base_url: lookup("GENAI_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_GENAI_BASE_URL.to_string()),
            poll_interval: lookup("GENAI_POLL_INTERVAL_MS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            log_json: lookup("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}
