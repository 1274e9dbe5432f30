use serde::{Deserialize, Serialize};

/// Classification label summarizing a symbol's most recent signal state.
///
/// Variants are declared in precedence order, so the derived `Ord`
/// matches [`BadgeKind::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeKind {
    /// Bought inside the recency window, position already closed
    RecentBuy,
    /// Bought inside the recency window, position still open
    BuySignal,
    /// Sold inside the recency window, position closed
    SellSignal,
    /// Nothing actionable inside the recency window
    NoSignal,
    /// The scan for this symbol failed
    Error,
}

impl BadgeKind {
    /// All kinds, highest precedence first.
    pub const ALL: [BadgeKind; 5] = [
        BadgeKind::RecentBuy,
        BadgeKind::BuySignal,
        BadgeKind::SellSignal,
        BadgeKind::NoSignal,
        BadgeKind::Error,
    ];

    /// Fixed precedence, 0 is highest.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            BadgeKind::RecentBuy => 0,
            BadgeKind::BuySignal => 1,
            BadgeKind::SellSignal => 2,
            BadgeKind::NoSignal => 3,
            BadgeKind::Error => 4,
        }
    }

    /// Human-readable badge text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            BadgeKind::RecentBuy => "RECENT BUY",
            BadgeKind::BuySignal => "BUY SIGNAL",
            BadgeKind::SellSignal => "SELL SIGNAL",
            BadgeKind::NoSignal => "NO RECENT SIGNAL",
            BadgeKind::Error => "ERROR",
        }
    }

    /// Whether classifications of this kind carry a `days_ago` value.
    #[must_use]
    pub fn is_dated(&self) -> bool {
        matches!(
            self,
            BadgeKind::RecentBuy | BadgeKind::BuySignal | BadgeKind::SellSignal
        )
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeKind::RecentBuy => write!(f, "RECENT_BUY"),
            BadgeKind::BuySignal => write!(f, "BUY_SIGNAL"),
            BadgeKind::SellSignal => write!(f, "SELL_SIGNAL"),
            BadgeKind::NoSignal => write!(f, "NO_SIGNAL"),
            BadgeKind::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of classifying one symbol. Derived on demand, never stored upstream.
///
/// Built only through the constructors, which keep `days_ago` present
/// exactly for the dated kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeClassification {
    badge: BadgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_ago: Option<u32>,
}

impl BadgeClassification {
    pub fn recent_buy(days_ago: u32) -> Self {
        Self {
            badge: BadgeKind::RecentBuy,
            days_ago: Some(days_ago),
        }
    }

    pub fn buy_signal(days_ago: u32) -> Self {
        Self {
            badge: BadgeKind::BuySignal,
            days_ago: Some(days_ago),
        }
    }

    pub fn sell_signal(days_ago: u32) -> Self {
        Self {
            badge: BadgeKind::SellSignal,
            days_ago: Some(days_ago),
        }
    }

    pub fn no_signal() -> Self {
        Self {
            badge: BadgeKind::NoSignal,
            days_ago: None,
        }
    }

    pub fn error() -> Self {
        Self {
            badge: BadgeKind::Error,
            days_ago: None,
        }
    }

    #[must_use]
    pub fn badge(&self) -> BadgeKind {
        self.badge
    }

    #[must_use]
    pub fn priority(&self) -> u8 {
        self.badge.priority()
    }

    #[must_use]
    pub fn days_ago(&self) -> Option<u32> {
        self.days_ago
    }
}

/// Presentation category for a badge, kept apart from the classification
/// itself so renderers never switch on [`BadgeKind`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualCategory {
    Active,
    Recent,
    Sell,
    No,
    Error,
}

impl VisualCategory {
    /// Fixed lookup from badge kind to visual category.
    #[must_use]
    pub fn for_badge(kind: BadgeKind) -> Self {
        match kind {
            BadgeKind::BuySignal => VisualCategory::Active,
            BadgeKind::RecentBuy => VisualCategory::Recent,
            BadgeKind::SellSignal => VisualCategory::Sell,
            BadgeKind::NoSignal => VisualCategory::No,
            BadgeKind::Error => VisualCategory::Error,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualCategory::Active => "active",
            VisualCategory::Recent => "recent",
            VisualCategory::Sell => "sell",
            VisualCategory::No => "no",
            VisualCategory::Error => "error",
        }
    }
}

impl std::fmt::Display for VisualCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
