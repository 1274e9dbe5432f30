use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::de::{de_lenient_f64, de_lenient_opt_string, de_lenient_string};

/// Normalized type string for a buy event.
pub const BUY: &str = "BUY";
/// Normalized type string for a sell event.
pub const SELL: &str = "SELL";
/// Label used in the signal index for events that carry no type at all.
pub const UNKNOWN: &str = "UNKNOWN";

/// One buy or sell occurrence as reported by the scanning service.
///
/// The upstream payload is loosely shaped: the side of the trade may be
/// reported under `type`, `signal_type` or `kind`, and the date is a
/// plain string. Nothing here is validated on arrival: mistyped fields
/// fall back to empty, and dates parse lazily through
/// [`RawSignalEvent::timestamp`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSignalEvent {
    /// Calendar date string, usually `YYYY-MM-DD`
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub date: String,

    /// Price at which the event fired
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub price: Option<f64>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "de_lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub signal_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

impl RawSignalEvent {
    /// Create a bare event with a date and price and no declared type.
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price: Some(price),
            ..Self::default()
        }
    }

    /// Create an event with an explicit `type` field.
    pub fn typed(date: impl Into<String>, price: f64, event_type: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            ..Self::new(date, price)
        }
    }

    /// Parsed event date. `None` when the date string is empty or unparsable.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_event_date(&self.date)
    }

    /// Uppercased trade side, preferring `type` over `signal_type`.
    /// Empty strings count as absent.
    #[must_use]
    pub fn declared_type(&self) -> Option<String> {
        first_non_empty(&[&self.event_type, &self.signal_type]).map(str::to_uppercase)
    }

    /// Uppercased label for the signal index: `type`, then `signal_type`,
    /// then `kind`.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        first_non_empty(&[&self.event_type, &self.signal_type, &self.kind]).map(str::to_uppercase)
    }

    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.declared_type().as_deref() == Some(SELL)
    }
}

fn first_non_empty<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
}

/// Lenient date parsing for upstream event dates.
///
/// Accepts `YYYY-MM-DD` (read as midnight UTC), RFC 3339, and a naive
/// `YYYY-MM-DDTHH:MM:SS` (read as UTC).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// One point of the per-symbol price history.
///
/// Only `date` is interpreted; every other upstream field (open, close,
/// channel levels, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub date: String,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl HistoryPoint {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            fields: BTreeMap::new(),
        }
    }
}
