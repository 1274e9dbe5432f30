use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::badge::BadgeClassification;
use crate::models::entry::ScanData;
use crate::services::badge_service::BadgeService;

/// Orders symbols for presentation.
///
/// Failed entries go last (alphabetically among themselves). Everything
/// else is ordered by badge priority, then by `days_ago` when both sides
/// have one, then alphabetically. Ties always end in the symbol name, so
/// the order is total and reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    /// Return `symbols` in ranked order. Symbols missing from `data`
    /// rank as failed entries.
    pub fn rank(
        &self,
        symbols: &[String],
        data: &ScanData,
        badges: &BadgeService,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        // Classify each symbol once rather than once per comparison.
        let classified: HashMap<&str, BadgeClassification> = symbols
            .iter()
            .map(|s| (s.as_str(), badges.classify(data.get(s), now)))
            .collect();

        let mut ranked: Vec<String> = symbols.to_vec();
        ranked.sort_by(|a, b| {
            let a_failed = data.get(a).map_or(true, |e| e.is_error());
            let b_failed = data.get(b).map_or(true, |e| e.is_error());
            match (a_failed, b_failed) {
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                (true, true) => return a.cmp(b),
                (false, false) => {}
            }
            compare_classified(&classified[a.as_str()], &classified[b.as_str()])
                .then_with(|| a.cmp(b))
        });

        if let Some(observer) = badges.observer() {
            observer.ranked(&ranked);
        }
        ranked
    }

    /// Rank every symbol present in `data`.
    pub fn rank_all(
        &self,
        data: &ScanData,
        badges: &BadgeService,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let symbols: Vec<String> = data.keys().cloned().collect();
        self.rank(&symbols, data, badges, now)
    }
}

/// Priority ascending, then most recent first when both are dated.
fn compare_classified(a: &BadgeClassification, b: &BadgeClassification) -> Ordering {
    a.priority().cmp(&b.priority()).then_with(|| match (a.days_ago(), b.days_ago()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    })
}
