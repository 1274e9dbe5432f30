use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::badge::VisualCategory;
use crate::models::display::{AnnotatedHistoryPoint, DisplayRecord, SignalView};
use crate::models::entry::{NormalizedEntry, ScanData, ScanEntry, NO_DATA};
use crate::models::signal::{RawSignalEvent, BUY, SELL, UNKNOWN};
use crate::services::badge_service::BadgeService;

/// Default number of history points kept per record.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Builds the denormalized display records from ranked symbols.
#[derive(Debug, Clone, Copy)]
pub struct TransformService {
    history_limit: usize,
}

impl TransformService {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self { history_limit }
    }

    /// Transform symbols in the order given.
    pub fn transform(
        &self,
        symbols: &[String],
        data: &ScanData,
        badges: &BadgeService,
        now: DateTime<Utc>,
    ) -> Vec<DisplayRecord> {
        symbols
            .iter()
            .map(|symbol| self.transform_one(symbol, data.get(symbol), badges, now))
            .collect()
    }

    /// Transform a single symbol. Missing entries become a failed record.
    pub fn transform_one(
        &self,
        symbol: &str,
        entry: Option<&ScanEntry>,
        badges: &BadgeService,
        now: DateTime<Utc>,
    ) -> DisplayRecord {
        match entry {
            Some(ScanEntry::Ok(entry)) => {
                DisplayRecord::Ready(Box::new(self.build_view(symbol, entry, badges, now)))
            }
            Some(ScanEntry::Failed(message)) => DisplayRecord::Failed {
                symbol: symbol.to_string(),
                error: if message.is_empty() {
                    NO_DATA.to_string()
                } else {
                    message.clone()
                },
            },
            None => DisplayRecord::Failed {
                symbol: symbol.to_string(),
                error: NO_DATA.to_string(),
            },
        }
    }

    fn build_view(
        &self,
        symbol: &str,
        entry: &NormalizedEntry,
        badges: &BadgeService,
        now: DateTime<Utc>,
    ) -> SignalView {
        let classification = badges.classify_entry(entry, now);
        let signals = badges.signal_service().extract_sorted(entry);
        let latest_buy = signals.latest_buy().map(|d| d.event.clone());
        let latest_sell = signals.latest_sell().map(|d| d.event.clone());
        let is_active = entry.is_active();

        let performance = latest_buy
            .as_ref()
            .and_then(|buy| performance_pct(entry.last_state.current_price, buy.price));

        let index = signal_index(&entry.signals);
        let history = entry
            .history
            .iter()
            .take(self.history_limit)
            .map(|point| {
                let types = index.get(point.date.as_str()).cloned().unwrap_or_default();
                AnnotatedHistoryPoint {
                    point: point.clone(),
                    has_buy_signal: types.iter().any(|t| t == BUY),
                    has_sell_signal: types.iter().any(|t| t == SELL),
                    signal_types: types,
                }
            })
            .collect();

        SignalView {
            symbol: symbol.to_string(),
            is_active,
            classification,
            badge_text: classification.badge().label().to_string(),
            visual: VisualCategory::for_badge(classification.badge()),
            last_state: entry.last_state.clone(),
            sell_signal: latest_sell.is_some() && !is_active,
            latest_buy,
            latest_sell,
            performance,
            history,
            signals: entry.signals.clone(),
        }
    }
}

impl Default for TransformService {
    fn default() -> Self {
        Self::new()
    }
}

/// Map from event date to the uppercased labels of the signals on it.
/// Events without a date are skipped; untyped ones are `UNKNOWN`.
pub fn signal_index(signals: &[RawSignalEvent]) -> HashMap<&str, Vec<String>> {
    let mut index: HashMap<&str, Vec<String>> = HashMap::new();
    for signal in signals {
        if signal.date.is_empty() {
            continue;
        }
        index
            .entry(signal.date.as_str())
            .or_default()
            .push(signal.label().unwrap_or_else(|| UNKNOWN.to_string()));
    }
    index
}

/// Percent change from `buy_price` to `current_price`.
///
/// `None` unless both prices are present, finite and non-zero.
pub fn performance_pct(current_price: Option<f64>, buy_price: Option<f64>) -> Option<f64> {
    let current = current_price.filter(|p| p.is_finite() && *p != 0.0)?;
    let buy = buy_price.filter(|p| p.is_finite() && *p != 0.0)?;
    Some((current - buy) / buy * 100.0)
}
