use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::badge::BadgeClassification;
use crate::models::entry::{NormalizedEntry, ScanEntry};
use crate::services::signal_service::SignalService;

/// Default inclusive upper bound on `days_ago` for a signal to count as recent.
pub const DEFAULT_RECENCY_WINDOW_DAYS: u32 = 11;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Receives diagnostics from classification and ranking.
///
/// Observers see data only; nothing they do can change a result.
pub trait ClassificationObserver: Send + Sync {
    fn classified(&self, _symbol: &str, _classification: &BadgeClassification) {}

    fn ranked(&self, _order: &[String]) {}
}

/// Forwards classification diagnostics to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ClassificationObserver for TracingObserver {
    fn classified(&self, symbol: &str, classification: &BadgeClassification) {
        tracing::debug!(
            symbol,
            badge = %classification.badge(),
            priority = classification.priority(),
            days_ago = ?classification.days_ago(),
            "classified symbol"
        );
    }

    fn ranked(&self, order: &[String]) {
        tracing::debug!(count = order.len(), first = ?order.first(), "ranked symbols");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Buy,
    Sell,
}

/// Classifies a scan entry into a single badge.
///
/// Pure: the result depends only on the entry and the `now` passed in.
///
/// Precedence, most recent action only:
/// - buy within the window, position closed → `RECENT_BUY` (0)
/// - buy within the window, position open → `BUY_SIGNAL` (1)
/// - sell within the window, position closed → `SELL_SIGNAL` (2)
/// - anything else → `NO_SIGNAL` (3)
/// - failed entry → `ERROR` (4)
#[derive(Clone)]
pub struct BadgeService {
    signal_service: SignalService,
    recency_window_days: u32,
    observer: Option<Arc<dyn ClassificationObserver>>,
}

impl std::fmt::Debug for BadgeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeService")
            .field("recency_window_days", &self.recency_window_days)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl BadgeService {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_RECENCY_WINDOW_DAYS)
    }

    pub fn with_window(recency_window_days: u32) -> Self {
        Self {
            signal_service: SignalService::new(),
            recency_window_days,
            observer: None,
        }
    }

    /// Attach a diagnostics observer.
    pub fn with_observer(mut self, observer: Arc<dyn ClassificationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    #[must_use]
    pub fn recency_window_days(&self) -> u32 {
        self.recency_window_days
    }

    pub(crate) fn observer(&self) -> Option<&dyn ClassificationObserver> {
        self.observer.as_deref()
    }

    pub(crate) fn signal_service(&self) -> &SignalService {
        &self.signal_service
    }

    /// Classify a possibly missing entry. Missing and failed entries are `ERROR`.
    pub fn classify(&self, entry: Option<&ScanEntry>, now: DateTime<Utc>) -> BadgeClassification {
        match entry {
            Some(ScanEntry::Ok(entry)) => self.classify_entry(entry, now),
            Some(ScanEntry::Failed(_)) | None => BadgeClassification::error(),
        }
    }

    /// Classify a well-formed entry.
    pub fn classify_entry(
        &self,
        entry: &NormalizedEntry,
        now: DateTime<Utc>,
    ) -> BadgeClassification {
        let result = self.compute(entry, now);
        if let Some(observer) = self.observer() {
            observer.classified(&entry.symbol, &result);
        }
        result
    }

    fn compute(&self, entry: &NormalizedEntry, now: DateTime<Utc>) -> BadgeClassification {
        let signals = self.signal_service.extract_sorted(entry);
        let is_active = entry.is_active();

        // Same-day buy and sell resolve to the sell.
        let most_recent = match (signals.latest_buy(), signals.latest_sell()) {
            (Some(buy), Some(sell)) if buy.at > sell.at => Some((Action::Buy, buy.at)),
            (Some(_), Some(sell)) => Some((Action::Sell, sell.at)),
            (Some(buy), None) => Some((Action::Buy, buy.at)),
            (None, Some(sell)) => Some((Action::Sell, sell.at)),
            (None, None) => None,
        };

        let Some((action, Some(at))) = most_recent else {
            return BadgeClassification::no_signal();
        };

        let Some(days_ago) = self.days_within_window(at, now) else {
            return BadgeClassification::no_signal();
        };

        match (action, is_active) {
            (Action::Buy, true) => BadgeClassification::buy_signal(days_ago),
            (Action::Buy, false) => BadgeClassification::recent_buy(days_ago),
            (Action::Sell, false) => BadgeClassification::sell_signal(days_ago),
            (Action::Sell, true) => BadgeClassification::no_signal(),
        }
    }

    /// Whole days elapsed since `at`, if that falls inside the window.
    fn days_within_window(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
        let days = (now - at).num_milliseconds().div_euclid(MILLIS_PER_DAY);
        if (0..=i64::from(self.recency_window_days)).contains(&days) {
            u32::try_from(days).ok()
        } else {
            None
        }
    }
}

impl Default for BadgeService {
    fn default() -> Self {
        Self::new()
    }
}
