use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::entry::{ScanData, ScanEntry};

/// Writes the raw scan map as a flat CSV summary.
///
/// Columns: symbol, status, current_price, atr. Status only reflects the
/// position flag (`BUY_SIGNAL` when open), not the badge classification.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render `data` as CSV, one row per symbol in ascending symbol order.
    pub fn to_csv(&self, data: &ScanData) -> Result<String, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["symbol", "status", "current_price", "atr"])?;

        let mut symbols: Vec<&String> = data.keys().collect();
        symbols.sort();

        for symbol in symbols {
            let row = match &data[symbol] {
                ScanEntry::Failed(_) => [
                    symbol.clone(),
                    "ERROR".into(),
                    String::new(),
                    String::new(),
                ],
                ScanEntry::Ok(entry) => {
                    let status = if entry.is_active() { "BUY_SIGNAL" } else { "NO_SIGNAL" };
                    [
                        symbol.clone(),
                        status.into(),
                        format_number(entry.last_state.current_price),
                        format_number(entry.last_state.atr),
                    ]
                }
            };
            writer.write_record(&row)?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
    }

    /// Download name for an export taken on `date`.
    #[must_use]
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("turtle_signals_{}.csv", date.format("%Y-%m-%d"))
    }
}

/// Missing and zero values are written as empty cells.
fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}
