use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::errors::CoreError;

use super::scan::ScanParams;

/// Tickers scanned when the service cannot list its universe.
pub const FALLBACK_TICKERS: [&str; 8] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "ADSK",
];

/// Scanner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Base URL of the scanning service
    pub api_base: String,

    /// HTTP timeout per request (native only)
    pub request_timeout_secs: u64,

    /// Symbols per scan request
    pub chunk_size: usize,

    /// Pause between consecutive scan requests
    pub chunk_delay_ms: u64,

    pub days_back: u32,
    pub entry_lookback: u32,
    pub exit_lookback: u32,

    /// Largest `days_ago` still considered recent (inclusive)
    pub recency_window_days: u32,

    /// History points kept per display record
    pub history_limit: usize,

    pub fallback_tickers: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let params = ScanParams::default();
        Self {
            api_base: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            chunk_size: 20,
            chunk_delay_ms: 100,
            days_back: params.days_back,
            entry_lookback: params.entry_lookback,
            exit_lookback: params.exit_lookback,
            recency_window_days: 11,
            history_limit: 30,
            fallback_tickers: FALLBACK_TICKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScannerConfig {
    /// Defaults overlaid with `TURTLE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = env::var("TURTLE_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base.trim().to_string();
            }
        }
        overlay(&mut config.chunk_size, "TURTLE_CHUNK_SIZE");
        overlay(&mut config.days_back, "TURTLE_DAYS_BACK");
        overlay(&mut config.entry_lookback, "TURTLE_ENTRY_LOOKBACK");
        overlay(&mut config.exit_lookback, "TURTLE_EXIT_LOOKBACK");
        overlay(&mut config.recency_window_days, "TURTLE_RECENCY_WINDOW_DAYS");

        config
    }

    /// Reject settings the scanner cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_base.trim().is_empty() {
            return Err(CoreError::InvalidConfig("api_base must not be empty".into()));
        }
        if self.chunk_size == 0 {
            return Err(CoreError::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if self.entry_lookback == 0 || self.exit_lookback == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "lookbacks must be positive (entry {}, exit {})",
                self.entry_lookback, self.exit_lookback
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            days_back: self.days_back,
            entry_lookback: self.entry_lookback,
            exit_lookback: self.exit_lookback,
        }
    }
}

fn overlay<T: FromStr>(slot: &mut T, key: &str) {
    let Ok(raw) = env::var(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!("ignoring {key}={raw:?}: not a valid number"),
    }
}
