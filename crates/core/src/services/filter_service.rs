use crate::models::badge::BadgeKind;
use crate::models::display::DisplayRecord;
use crate::models::filter::FilterState;

/// Narrows ranked records to what the current filter shows.
///
/// Order is preserved, and applying the same filter again changes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Records passing both the search and the badge filter.
    pub fn apply<'a>(
        &self,
        records: &'a [DisplayRecord],
        filter: &FilterState,
    ) -> Vec<&'a DisplayRecord> {
        records.iter().filter(|r| self.matches(r, filter)).collect()
    }

    /// Owned variant of [`FilterService::apply`].
    pub fn apply_owned(
        &self,
        records: &[DisplayRecord],
        filter: &FilterState,
    ) -> Vec<DisplayRecord> {
        self.apply(records, filter).into_iter().cloned().collect()
    }

    pub fn matches(&self, record: &DisplayRecord, filter: &FilterState) -> bool {
        if !filter.search_term.is_empty()
            && !record
                .symbol()
                .to_lowercase()
                .contains(&filter.search_term.to_lowercase())
        {
            return false;
        }

        if filter.selected_badges.is_empty() {
            return true;
        }

        let badge = match record {
            DisplayRecord::Failed { .. } => BadgeKind::Error,
            DisplayRecord::Ready(view) => view.badge(),
        };
        filter.selected_badges.contains(&badge)
    }
}
