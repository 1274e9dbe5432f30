pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use models::{
    badge::BadgeKind,
    display::DisplayRecord,
    entry::ScanData,
    filter::FilterState,
    scan::{HealthResponse, ScanOutcome, ScanParams, ScanProgress, ScanReport},
    settings::ScannerConfig,
};
use providers::{traits::ScanProvider, turtle_api::TurtleApiProvider};
use services::{
    badge_service::ClassificationObserver,
    export_service::ExportService,
    filter_service::FilterService,
    report_service::ReportService,
    scan_service::{parse_symbol_list, ScanService},
};

use errors::CoreError;

/// Main entry point for the turtle scanner core library.
///
/// Holds the last scan, the current filter and the services needed to
/// fetch, rank, filter and export results. Rendering is pure: it takes
/// the current moment as an argument.
#[must_use]
pub struct TurtleScanner {
    config: ScannerConfig,
    scan_service: ScanService,
    report_service: ReportService,
    filter_service: FilterService,
    export_service: ExportService,
    last_scan: Option<ScanData>,
    filters: FilterState,
}

impl std::fmt::Debug for TurtleScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurtleScanner")
            .field("provider", &self.scan_service.provider_name())
            .field("last_scan", &self.last_scan.as_ref().map(|d| d.len()))
            .field("filters", &self.filters)
            .finish()
    }
}

impl TurtleScanner {
    /// Scanner talking HTTP to `config.api_base`.
    pub fn new(config: ScannerConfig) -> Result<Self, CoreError> {
        let provider = TurtleApiProvider::new(config.api_base.clone(), config.request_timeout_secs);
        Self::with_provider(config, Box::new(provider))
    }

    /// Scanner configured from `TURTLE_*` environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::new(ScannerConfig::from_env())
    }

    /// Scanner backed by any provider (used by tests and alternate transports).
    pub fn with_provider(
        config: ScannerConfig,
        provider: Box<dyn ScanProvider>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            scan_service: ScanService::new(provider, &config),
            report_service: ReportService::from_config(&config),
            filter_service: FilterService::new(),
            export_service: ExportService::new(),
            last_scan: None,
            filters: FilterState::default(),
            config,
        })
    }

    /// Send classification diagnostics to `observer`, e.g.
    /// [`services::badge_service::TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn ClassificationObserver>) -> Self {
        self.report_service = self.report_service.with_observer(observer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    // ── Scanning ────────────────────────────────────────────────────

    /// Check that the scanning service is reachable.
    pub async fn check_health(&self) -> Result<HealthResponse, CoreError> {
        self.scan_service.check_health().await
    }

    /// Scan a comma-separated list of symbols typed by the user.
    pub async fn scan_input(
        &mut self,
        input: &str,
        progress: impl FnMut(ScanProgress) + Send,
    ) -> Result<ScanOutcome, CoreError> {
        let symbols = parse_symbol_list(input)?;
        self.scan(&symbols, progress).await
    }

    /// Scan the given symbols with the configured lookbacks.
    pub async fn scan(
        &mut self,
        symbols: &[String],
        progress: impl FnMut(ScanProgress) + Send,
    ) -> Result<ScanOutcome, CoreError> {
        let outcome = self
            .scan_service
            .scan(symbols, self.scan_params(), progress)
            .await?;
        self.last_scan = Some(outcome.data.clone());
        Ok(outcome)
    }

    /// Scan the service's whole ticker universe (or the fallback list).
    pub async fn scan_all(
        &mut self,
        progress: impl FnMut(ScanProgress) + Send,
    ) -> Result<ScanOutcome, CoreError> {
        let outcome = self.scan_service.scan_all(self.scan_params(), progress).await?;
        self.last_scan = Some(outcome.data.clone());
        Ok(outcome)
    }

    /// Replace the last scan with externally obtained data.
    pub fn load_scan(&mut self, data: ScanData) {
        self.last_scan = Some(data);
    }

    #[must_use]
    pub fn last_scan(&self) -> Option<&ScanData> {
        self.last_scan.as_ref()
    }

    // ── Results ─────────────────────────────────────────────────────

    /// Rank and transform the last scan as of `now`.
    pub fn render(&self, now: DateTime<Utc>) -> Result<ScanReport, CoreError> {
        let data = self.last_scan.as_ref().ok_or(CoreError::EmptyResult)?;
        self.report_service.build_report(data, now)
    }

    /// Records of `report` that pass the current filter.
    #[must_use]
    pub fn visible<'a>(&self, report: &'a ScanReport) -> Vec<&'a DisplayRecord> {
        self.filter_service.apply(&report.records, &self.filters)
    }

    // ── Filters ─────────────────────────────────────────────────────

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn toggle_badge_filter(&mut self, badge: BadgeKind) {
        self.filters.toggle_badge(badge);
    }

    #[must_use]
    pub fn is_badge_selected(&self, badge: BadgeKind) -> bool {
        self.filters.is_badge_selected(badge)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.set_search_term(term);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // ── Export ──────────────────────────────────────────────────────

    /// CSV summary of the last scan.
    pub fn export_csv(&self) -> Result<String, CoreError> {
        let data = self.last_scan.as_ref().ok_or_else(|| {
            CoreError::ValidationError("No data to export, run a scan first".into())
        })?;
        self.export_service.to_csv(data)
    }

    /// File name for an export taken on `date`.
    #[must_use]
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        self.export_service.file_name(date)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn scan_params(&self) -> ScanParams {
        self.config.scan_params()
    }
}
