use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::badge::BadgeKind;

/// User-selected narrowing of the visible result set.
///
/// Changing the filter never touches the ranked data, only what is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Badge kinds to keep. Empty means no badge filter.
    pub selected_badges: BTreeSet<BadgeKind>,
    /// Case-insensitive substring matched against the symbol
    pub search_term: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: start with the given badges selected.
    pub fn with_badges(badges: impl IntoIterator<Item = BadgeKind>) -> Self {
        Self {
            selected_badges: badges.into_iter().collect(),
            search_term: String::new(),
        }
    }

    /// Builder-style: set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Select the badge if unselected, unselect it otherwise.
    pub fn toggle_badge(&mut self, badge: BadgeKind) {
        if !self.selected_badges.remove(&badge) {
            self.selected_badges.insert(badge);
        }
    }

    #[must_use]
    pub fn is_badge_selected(&self, badge: BadgeKind) -> bool {
        self.selected_badges.contains(&badge)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn clear(&mut self) {
        self.selected_badges.clear();
        self.search_term.clear();
    }

    /// True when neither a badge nor a search filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_badges.is_empty() && self.search_term.is_empty()
    }
}
