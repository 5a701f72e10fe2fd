//! Authoritative trip loading adapter
//!
//! Loads the operator-side trip records from a JSON export and applies the
//! requested date range and optional customer filter. The comparison
//! engine itself never queries or filters; it receives the records this
//! adapter hands it.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::app::models::{AuthoritativeRecord, DateRange};
use crate::{Error, Result};

/// Load authoritative records within a date range
///
/// The customer filter, when given, is matched case-insensitively against
/// the record's customer field.
pub fn load_records(
    path: &Path,
    date_range: &DateRange,
    customer: Option<&str>,
) -> Result<Vec<AuthoritativeRecord>> {
    let content = fs::read_to_string(path)
        .map_err(|error| Error::io(format!("failed to read trips {}", path.display()), error))?;

    let all: Vec<AuthoritativeRecord> = serde_json::from_str(&content).map_err(|error| {
        Error::json(
            path.display().to_string(),
            "trip export is not a valid record array",
            Some(error),
        )
    })?;

    let total = all.len();
    let records: Vec<AuthoritativeRecord> = all
        .into_iter()
        .filter(|record| date_range.contains(record.date))
        .filter(|record| {
            customer.is_none_or(|name| record.customer.eq_ignore_ascii_case(name.trim()))
        })
        .collect();

    info!(
        "Loaded {} of {} trips between {} and {}",
        records.len(),
        total,
        date_range.from,
        date_range.to
    );

    Ok(records)
}
