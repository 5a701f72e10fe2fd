//! Test utilities shared across template parser test modules

use crate::app::models::TabularData;

mod key_tests;

/// Build tabular data from string slices
pub fn table(headers: &[&str], rows: &[&[&str]]) -> TabularData {
    TabularData::new(
        headers.iter().map(|header| header.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

/// Headers for a minimal valid Route sheet
pub fn route_headers() -> Vec<&'static str> {
    vec!["Date", "Route Name", "Departure Tag", "Return Tag", "License Plate"]
}
