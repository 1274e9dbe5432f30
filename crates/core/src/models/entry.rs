use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::de::{
    de_lenient_f64, de_lenient_list, de_lenient_object, de_lenient_opt_string,
};
use super::signal::{HistoryPoint, RawSignalEvent};

/// Message used when a requested symbol has no entry at all.
pub const NO_DATA: &str = "no data";

/// Mapping from ticker symbol to its resolved scan entry.
/// Iteration order carries no meaning; the ranker imposes its own.
pub type ScanData = HashMap<String, ScanEntry>;

/// Whether a tracked trade is currently open for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    /// `last_state.position == 1`
    Open,
    /// Anything else, including a missing `last_state`
    #[default]
    Flat,
}

impl Position {
    /// Only an exact upstream value of `1` means an open position.
    pub fn from_raw(raw: Option<f64>) -> Self {
        match raw {
            Some(v) if v == 1.0 => Position::Open,
            _ => Position::Flat,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Position::Open)
    }
}

/// `last_state` exactly as upstream reports it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLastState {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub position: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub atr: Option<f64>,
}

/// Loosely shaped per-symbol payload from the scanning service.
///
/// Every field is optional, and a field of the wrong JSON type reads as
/// absent. Use [`ScanEntry::from_raw`] to resolve it into the tagged
/// union the rest of the crate works with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawScanEntry {
    #[serde(default, deserialize_with = "de_lenient_opt_string")]
    pub symbol: Option<String>,
    /// Any JSON value; counts as an error when truthy
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, deserialize_with = "de_lenient_object")]
    pub last_state: Option<RawLastState>,
    #[serde(default, deserialize_with = "de_lenient_list")]
    pub recent_buys: Option<Vec<RawSignalEvent>>,
    #[serde(default, deserialize_with = "de_lenient_list")]
    pub recent_sells: Option<Vec<RawSignalEvent>>,
    #[serde(default, deserialize_with = "de_lenient_list")]
    pub signals: Option<Vec<RawSignalEvent>>,
    #[serde(default, deserialize_with = "de_lenient_list")]
    pub history: Option<Vec<HistoryPoint>>,
}

/// Latest strategy state for a well-formed entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LastState {
    pub position: Position,
    pub current_price: Option<f64>,
    pub atr: Option<f64>,
}

impl From<RawLastState> for LastState {
    fn from(raw: RawLastState) -> Self {
        Self {
            position: Position::from_raw(raw.position),
            current_price: raw.current_price,
            atr: raw.atr,
        }
    }
}

/// A scan entry that carried no error.
///
/// `recent_sells` stays optional: an explicit (even empty) list takes
/// precedence over sells derived from `signals`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub symbol: String,
    pub last_state: LastState,
    pub recent_buys: Vec<RawSignalEvent>,
    pub recent_sells: Option<Vec<RawSignalEvent>>,
    pub signals: Vec<RawSignalEvent>,
    pub history: Vec<HistoryPoint>,
}

impl NormalizedEntry {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_state.position.is_open()
    }
}

/// Scan result for one symbol, resolved once at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanEntry {
    Ok(NormalizedEntry),
    Failed(String),
}

impl ScanEntry {
    /// Resolve a raw payload. A truthy `error` wins over everything else.
    pub fn from_raw(symbol: &str, raw: RawScanEntry) -> Self {
        if let Some(message) = raw.error.as_ref().and_then(error_message) {
            return ScanEntry::Failed(message);
        }

        ScanEntry::Ok(NormalizedEntry {
            symbol: raw.symbol.unwrap_or_else(|| symbol.to_string()),
            last_state: raw.last_state.map(LastState::from).unwrap_or_default(),
            recent_buys: raw.recent_buys.unwrap_or_default(),
            recent_sells: raw.recent_sells,
            signals: raw.signals.unwrap_or_default(),
            history: raw.history.unwrap_or_default(),
        })
    }

    /// Resolve an arbitrary JSON value. Mistyped fields fall back to
    /// their defaults; only a payload that is not an object is `Failed`.
    pub fn from_value(symbol: &str, value: Value) -> Self {
        if !value.is_object() {
            return ScanEntry::Failed(format!(
                "malformed entry: expected an object, got {value}"
            ));
        }
        match serde_json::from_value::<RawScanEntry>(value) {
            Ok(raw) => Self::from_raw(symbol, raw),
            Err(e) => ScanEntry::Failed(format!("malformed entry: {e}")),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ScanEntry::Failed(_))
    }

    #[must_use]
    pub fn as_ok(&self) -> Option<&NormalizedEntry> {
        match self {
            ScanEntry::Ok(entry) => Some(entry),
            ScanEntry::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ScanEntry::Ok(_) => None,
            ScanEntry::Failed(message) => Some(message),
        }
    }
}

impl From<NormalizedEntry> for ScanEntry {
    fn from(entry: NormalizedEntry) -> Self {
        ScanEntry::Ok(entry)
    }
}

/// Message for a truthy error value, `None` for falsy ones.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
