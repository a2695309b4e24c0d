//! CSV loading and cleaning.
//!
//! Upstream cleaning collaborator for the forecast runner: parses
//! day/month/year dates, drops rows whose date fails to parse, fills missing
//! or malformed journey counts with zero, and sorts ascending by date.

use crate::data::table::{DayRecord, RidershipTable, ServiceType};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info};

/// Header of the date column.
pub const DATE_COLUMN: &str = "Date";

/// Date format used by the source dataset.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Load the daily ridership table from a CSV file.
///
/// A missing or unreadable file is fatal; individual malformed rows are not.
pub fn load_table(path: &Path) -> Result<RidershipTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let column_index = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ForecastError::InvalidParameter(format!("missing column '{name}'")))
    };

    let date_idx = column_index(DATE_COLUMN)?;
    let mut count_idx = [0usize; 6];
    for (slot, service) in count_idx.iter_mut().zip(ServiceType::ALL) {
        *slot = column_index(service.column_name())?;
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row?;

        // Unparseable dates coerce to missing and the row is dropped
        let date = row
            .get(date_idx)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());
        let Some(date) = date else {
            dropped += 1;
            debug!(row = ?row.get(date_idx), "dropping row with unparseable date");
            continue;
        };

        // Missing counts are filled with zero
        let mut counts = [0.0f64; 6];
        for (value, &idx) in counts.iter_mut().zip(count_idx.iter()) {
            *value = row
                .get(idx)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
        }

        records.push(DayRecord { date, counts });
    }

    info!(
        rows = records.len(),
        dropped,
        path = %path.display(),
        "loaded ridership table"
    );
    Ok(RidershipTable::new(records))
}
