//! Cell access and date normalization helpers
//!
//! This module provides the shared helpers parsers use to read cells
//! against a column mapping and to bring partner-reported dates into the
//! canonical form used by join keys.

use super::column_mapping::ColumnMapping;
use crate::constants::{CANONICAL_DATE_FORMAT, PARTNER_DATE_FORMAT};
use chrono::NaiveDate;

/// Get a trimmed, non-empty cell value from a row
///
/// Returns `None` when the column is absent, the row is too short, or the
/// cell is blank.
pub fn get_cell<'a>(
    cells: &'a [String],
    mapping: &ColumnMapping,
    column_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(column_name)
        .and_then(|index| cells.get(index))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Normalize a partner-reported date to canonical `YYYY-MM-DD` form
///
/// Accepts day-first `DD/MM/YYYY` or an already-canonical value. Returns
/// `None` for anything else; callers substitute an empty key component so
/// the row still participates in matching instead of aborting the batch.
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = NaiveDate::parse_from_str(trimmed, CANONICAL_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, PARTNER_DATE_FORMAT))
        .ok()?;

    Some(parsed.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Split a packed multi-tag cell into individual tags
///
/// Shift sheets pack every tag of a shift into one newline-delimited cell.
/// Blank fragments are dropped.
pub fn split_tags(cell: &str) -> Vec<String> {
    cell.lines()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
