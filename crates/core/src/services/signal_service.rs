use chrono::{DateTime, Utc};

use crate::models::entry::NormalizedEntry;
use crate::models::signal::RawSignalEvent;

/// A signal event paired with its parsed date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedEvent<'a> {
    pub event: &'a RawSignalEvent,
    /// `None` when the date did not parse; such events order earliest
    pub at: Option<DateTime<Utc>>,
}

/// Buy and sell events of one entry, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSignals<'a> {
    pub buys: Vec<DatedEvent<'a>>,
    pub sells: Vec<DatedEvent<'a>>,
}

impl<'a> ExtractedSignals<'a> {
    #[must_use]
    pub fn latest_buy(&self) -> Option<DatedEvent<'a>> {
        self.buys.first().copied()
    }

    #[must_use]
    pub fn latest_sell(&self) -> Option<DatedEvent<'a>> {
        self.sells.first().copied()
    }
}

/// Pulls normalized buy/sell lists out of a scan entry.
///
/// Buys come from `recent_buys`. Sells come from `recent_sells` when the
/// service sent that list (even empty), otherwise from the `SELL` events
/// in `signals`.
#[derive(Debug, Clone, Copy)]
pub struct SignalService;

impl SignalService {
    pub fn new() -> Self {
        Self
    }

    /// Extract buys and sells in upstream order.
    pub fn extract<'a>(
        &self,
        entry: &'a NormalizedEntry,
    ) -> (Vec<&'a RawSignalEvent>, Vec<&'a RawSignalEvent>) {
        let buys = entry.recent_buys.iter().collect();
        let sells = match &entry.recent_sells {
            Some(sells) => sells.iter().collect(),
            None => entry.signals.iter().filter(|s| s.is_sell()).collect(),
        };
        (buys, sells)
    }

    /// Extract buys and sells, each sorted most recent first.
    ///
    /// The sort is stable, so events sharing a date (or both lacking one)
    /// keep their upstream order.
    pub fn extract_sorted<'a>(&self, entry: &'a NormalizedEntry) -> ExtractedSignals<'a> {
        let (buys, sells) = self.extract(entry);
        ExtractedSignals {
            buys: sort_recent_first(buys),
            sells: sort_recent_first(sells),
        }
    }
}

impl Default for SignalService {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_recent_first(events: Vec<&RawSignalEvent>) -> Vec<DatedEvent<'_>> {
    let mut dated: Vec<DatedEvent<'_>> = events
        .into_iter()
        .map(|event| DatedEvent {
            event,
            at: event.timestamp(),
        })
        .collect();
    dated.sort_by(|a, b| b.at.cmp(&a.at));
    dated
}
