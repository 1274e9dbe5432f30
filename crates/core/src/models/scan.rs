use serde::{Deserialize, Serialize};

use super::display::DisplayRecord;
use super::entry::ScanData;

/// Strategy lookbacks forwarded to the scanning service.
/// They shape the upstream buy/sell events, not the local badge logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanParams {
    pub days_back: u32,
    pub entry_lookback: u32,
    pub exit_lookback: u32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            days_back: 10,
            entry_lookback: 20,
            exit_lookback: 10,
        }
    }
}

/// Result of scanning one batch of symbols.
#[derive(Debug, Clone, Default)]
pub struct ScanBatch {
    pub data: ScanData,
    pub processed: usize,
    pub errors: usize,
}

/// Result of a full (possibly multi-batch) scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub data: ScanData,
    pub requested: usize,
    pub processed: usize,
    pub errors: usize,
    /// The ticker universe was unavailable and the fallback list was scanned
    pub used_fallback: bool,
}

/// Progress through a chunked scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanProgress {
    pub current: usize,
    pub total: usize,
}

impl ScanProgress {
    /// Rounded completion percentage, 0 when nothing was requested.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Service metadata reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub available_tickers: Option<u64>,
}

impl HealthResponse {
    /// One-line summary, e.g. `"Version: 1.2 | 503 tickers available"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let version = self
            .version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("N/A");
        format!(
            "Version: {version} | {} tickers available",
            self.available_tickers.unwrap_or(0)
        )
    }
}

/// Aggregate counters over one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Entries that scanned without error
    pub total_symbols: usize,
    /// Entries with an open position
    pub active_positions: usize,
    /// Entries with at least one recent buy
    pub recent_signals: usize,
    /// Entries that failed
    pub errors: usize,
}

/// Ranked, transformed output of one scan, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub stats: ScanStats,
    pub records: Vec<DisplayRecord>,
}

/// Wire shape of the scan endpoint. Entries stay raw JSON until
/// [`super::entry::ScanEntry::from_value`] resolves them one by one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub data: std::collections::HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub processed: usize,
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub total_requested: usize,
}

/// Wire shape of the ticker universe endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickersListResponse {
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub description: String,
}
