use crate::errors::CoreError;
use crate::models::scan::{HealthResponse, ScanOutcome, ScanParams, ScanProgress};
use crate::models::settings::ScannerConfig;
use crate::providers::traits::ScanProvider;

/// Turn user input like `"aapl, msft,,"` into `["AAPL", "MSFT"]`.
pub fn parse_symbol_list(input: &str) -> Result<Vec<String>, CoreError> {
    let symbols: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(CoreError::ValidationError(
            "No ticker(s) has been entered".into(),
        ));
    }
    Ok(symbols)
}

/// Drives the scanning service: batching, aggregation, fallbacks.
///
/// Batches run one after another with a short pause in between. A failed
/// batch counts every one of its symbols as an error and the scan moves on.
pub struct ScanService {
    provider: Box<dyn ScanProvider>,
    chunk_size: usize,
    chunk_delay_ms: u64,
    fallback_tickers: Vec<String>,
}

impl ScanService {
    pub fn new(provider: Box<dyn ScanProvider>, config: &ScannerConfig) -> Self {
        Self {
            provider,
            chunk_size: config.chunk_size.max(1),
            chunk_delay_ms: config.chunk_delay_ms,
            fallback_tickers: config.fallback_tickers.clone(),
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the service for its metadata.
    pub async fn check_health(&self) -> Result<HealthResponse, CoreError> {
        match self.provider.health().await {
            Ok(health) => {
                tracing::info!(provider = self.provider.name(), "{}", health.summary());
                Ok(health)
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), "health check failed: {e}");
                Err(e)
            }
        }
    }

    /// Scan `symbols` in batches, reporting progress before each batch
    /// and once more when done.
    pub async fn scan<F>(
        &self,
        symbols: &[String],
        params: ScanParams,
        mut progress: F,
    ) -> Result<ScanOutcome, CoreError>
    where
        F: FnMut(ScanProgress) + Send,
    {
        let total = symbols.len();
        let mut outcome = ScanOutcome {
            requested: total,
            ..ScanOutcome::default()
        };

        for (index, chunk) in symbols.chunks(self.chunk_size).enumerate() {
            progress(ScanProgress {
                current: index * self.chunk_size,
                total,
            });

            match self.provider.scan(chunk, params).await {
                Ok(batch) => {
                    outcome.data.extend(batch.data);
                    outcome.processed += batch.processed;
                    outcome.errors += batch.errors;
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        batch = index,
                        symbols = chunk.len(),
                        "scan batch failed: {e}"
                    );
                    outcome.errors += chunk.len();
                }
            }

            self.pause().await;
        }

        progress(ScanProgress { current: total, total });
        tracing::info!(
            requested = outcome.requested,
            received = outcome.data.len(),
            processed = outcome.processed,
            errors = outcome.errors,
            "scan finished"
        );
        Ok(outcome)
    }

    /// Scan the whole ticker universe, or the fallback list when the
    /// universe cannot be listed.
    pub async fn scan_all<F>(
        &self,
        params: ScanParams,
        progress: F,
    ) -> Result<ScanOutcome, CoreError>
    where
        F: FnMut(ScanProgress) + Send,
    {
        let (tickers, used_fallback) = match self.provider.tickers_list().await {
            Ok(list) if !list.is_empty() => (list, false),
            Ok(_) => {
                tracing::warn!("ticker list is empty, using fallback list");
                (self.fallback_tickers.clone(), true)
            }
            Err(e) => {
                tracing::warn!("could not get ticker list ({e}), using fallback list");
                (self.fallback_tickers.clone(), true)
            }
        };

        let mut outcome = self.scan(&tickers, params, progress).await?;
        outcome.used_fallback = used_fallback;
        Ok(outcome)
    }

    async fn pause(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        if self.chunk_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.chunk_delay_ms)).await;
        }
    }
}
