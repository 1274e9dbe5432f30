use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::scan::{HealthResponse, ScanBatch, ScanParams};

/// Trait abstraction over the remote scanning service.
///
/// The scanner only depends on this contract, so the HTTP client can be
/// swapped (or mocked in tests) without touching the orchestration.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ScanProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Service metadata; fails when the service is unreachable.
    async fn health(&self) -> Result<HealthResponse, CoreError>;

    /// Every ticker the service can scan.
    async fn tickers_list(&self) -> Result<Vec<String>, CoreError>;

    /// Scan one batch of symbols with the given strategy lookbacks.
    /// Per-symbol failures come back as `ScanEntry::Failed` inside the batch.
    async fn scan(&self, symbols: &[String], params: ScanParams) -> Result<ScanBatch, CoreError>;
}
