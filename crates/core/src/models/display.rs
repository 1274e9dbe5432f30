use serde::{Deserialize, Serialize};

use super::badge::{BadgeClassification, BadgeKind, VisualCategory};
use super::entry::LastState;
use super::signal::{HistoryPoint, RawSignalEvent};

/// History point annotated with the signals that fired on its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedHistoryPoint {
    #[serde(flatten)]
    pub point: HistoryPoint,
    pub has_buy_signal: bool,
    pub has_sell_signal: bool,
    /// Uppercased labels of every signal on this date, upstream order
    pub signal_types: Vec<String>,
}

/// Denormalized view of a symbol whose scan succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalView {
    pub symbol: String,
    pub is_active: bool,
    pub classification: BadgeClassification,
    /// Badge text, e.g. "BUY SIGNAL"
    pub badge_text: String,
    pub visual: VisualCategory,
    pub last_state: LastState,
    pub latest_buy: Option<RawSignalEvent>,
    pub latest_sell: Option<RawSignalEvent>,
    /// A sell exists and the position is closed
    pub sell_signal: bool,
    /// Percent change from the latest buy price to the current price
    pub performance: Option<f64>,
    pub history: Vec<AnnotatedHistoryPoint>,
    pub signals: Vec<RawSignalEvent>,
}

impl SignalView {
    #[must_use]
    pub fn badge(&self) -> BadgeKind {
        self.classification.badge()
    }
}

/// One row of the ranked result set handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayRecord {
    Failed { symbol: String, error: String },
    Ready(Box<SignalView>),
}

impl DisplayRecord {
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            DisplayRecord::Failed { symbol, .. } => symbol,
            DisplayRecord::Ready(view) => &view.symbol,
        }
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        matches!(self, DisplayRecord::Failed { .. })
    }

    /// `Error` for failed rows, otherwise the classified badge.
    #[must_use]
    pub fn badge(&self) -> BadgeKind {
        match self {
            DisplayRecord::Failed { .. } => BadgeKind::Error,
            DisplayRecord::Ready(view) => view.badge(),
        }
    }

    #[must_use]
    pub fn view(&self) -> Option<&SignalView> {
        match self {
            DisplayRecord::Failed { .. } => None,
            DisplayRecord::Ready(view) => Some(view),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            DisplayRecord::Failed { error, .. } => Some(error),
            DisplayRecord::Ready(_) => None,
        }
    }
}
