use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::entry::ScanEntry;
use crate::models::scan::{
    HealthResponse, ScanBatch, ScanParams, ScanResponse, TickersListResponse,
};
use super::traits::ScanProvider;

const PROVIDER: &str = "TurtleApi";

/// HTTP client for the turtle scanning service.
///
/// - `GET /health` → service metadata
/// - `GET /tickers_list` → ticker universe
/// - `GET /scan?symbols=A,B&daysBack=..&entry=..&exit=..` → per-symbol results
///
/// Scan entries are resolved into [`ScanEntry`] one by one, so a single
/// malformed symbol never fails the whole batch.
pub struct TurtleApiProvider {
    client: Client,
    base_url: String,
}

impl TurtleApiProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the scan request. Query values are percent-encoded, so
    /// symbols may carry characters such as `&` or spaces.
    pub fn scan_request(
        &self,
        symbols: &[String],
        params: ScanParams,
    ) -> Result<Request, CoreError> {
        Ok(self
            .client
            .get(format!("{}/scan", self.base_url))
            .query(&[
                ("symbols", symbols.join(",")),
                ("daysBack", params.days_back.to_string()),
                ("entry", params.entry_lookback.to_string()),
                ("exit", params.exit_lookback.to_string()),
            ])
            .build()?)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: Request,
        what: &str,
    ) -> Result<T, CoreError> {
        let resp = self.client.execute(request).await?;
        let body = check_status(resp, what)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, CoreError> {
        let request = self.client.get(url).build()?;
        self.fetch_json(request, what).await
    }
}

fn check_status(resp: Response, what: &str) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("{what} request failed with HTTP {status}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ScanProvider for TurtleApiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn health(&self) -> Result<HealthResponse, CoreError> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url, "health").await
    }

    async fn tickers_list(&self) -> Result<Vec<String>, CoreError> {
        let url = format!("{}/tickers_list", self.base_url);
        let resp: TickersListResponse = self.get_json(&url, "tickers_list").await?;
        Ok(resp.tickers)
    }

    async fn scan(&self, symbols: &[String], params: ScanParams) -> Result<ScanBatch, CoreError> {
        let request = self.scan_request(symbols, params)?;
        let resp: ScanResponse = self.fetch_json(request, "scan").await?;
        Ok(batch_from_response(resp))
    }
}

/// Resolve every raw entry of a scan response.
pub fn batch_from_response(resp: ScanResponse) -> ScanBatch {
    let data = resp
        .data
        .into_iter()
        .map(|(symbol, value)| {
            let entry = ScanEntry::from_value(&symbol, value);
            (symbol, entry)
        })
        .collect();

    ScanBatch {
        data,
        processed: resp.processed,
        errors: resp.errors,
    }
}
