use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::entry::{ScanData, ScanEntry};
use crate::models::scan::{ScanReport, ScanStats};
use crate::models::settings::ScannerConfig;
use crate::services::badge_service::{BadgeService, ClassificationObserver};
use crate::services::ranking_service::RankingService;
use crate::services::transform_service::TransformService;

/// Runs the pure pipeline: stats, rank, transform.
///
/// No I/O and no clock access; `now` is always supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportService {
    badge_service: BadgeService,
    ranking_service: RankingService,
    transform_service: TransformService,
}

impl ReportService {
    pub fn new(badge_service: BadgeService, transform_service: TransformService) -> Self {
        Self {
            badge_service,
            ranking_service: RankingService::new(),
            transform_service,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            BadgeService::with_window(config.recency_window_days),
            TransformService::with_history_limit(config.history_limit),
        )
    }

    /// Route classification and ranking diagnostics to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn ClassificationObserver>) -> Self {
        self.badge_service = self.badge_service.with_observer(observer);
        self
    }

    #[must_use]
    pub fn badge_service(&self) -> &BadgeService {
        &self.badge_service
    }

    /// Rank and transform every symbol in `data`.
    ///
    /// An empty map is reported as `CoreError::EmptyResult`, distinct
    /// from a map whose entries all failed.
    pub fn build_report(
        &self,
        data: &ScanData,
        now: DateTime<Utc>,
    ) -> Result<ScanReport, CoreError> {
        if data.is_empty() {
            return Err(CoreError::EmptyResult);
        }

        let stats = compute_stats(data);
        let ranked = self.ranking_service.rank_all(data, &self.badge_service, now);
        let records = self
            .transform_service
            .transform(&ranked, data, &self.badge_service, now);

        Ok(ScanReport { stats, records })
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(BadgeService::new(), TransformService::new())
    }
}

/// Count errors, open positions and entries with recent buys.
pub fn compute_stats(data: &ScanData) -> ScanStats {
    let mut stats = ScanStats::default();
    for entry in data.values() {
        match entry {
            ScanEntry::Failed(_) => stats.errors += 1,
            ScanEntry::Ok(entry) => {
                stats.total_symbols += 1;
                if entry.is_active() {
                    stats.active_positions += 1;
                }
                if !entry.recent_buys.is_empty() {
                    stats.recent_signals += 1;
                }
            }
        }
    }
    stats
}
