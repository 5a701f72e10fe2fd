//! Test utilities shared across comparison engine test modules

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::app::models::{AuthoritativeRecord, DateRange, NormalizedRow, TemplateType};

mod engine_tests;
mod key_index_tests;

/// Build a normalized partner row with the given key
pub fn row(template_type: TemplateType, date: &str, unique_key: &str) -> NormalizedRow {
    NormalizedRow {
        date: date.to_string(),
        license_plate: None,
        route_name: None,
        unique_key: unique_key.to_string(),
        raw_fields: BTreeMap::new(),
        template_type,
        source_row_number: 2,
    }
}

/// Build an authoritative record with an optional raw leg payload
pub fn record(order_id: &str, date: &str, leg_details: Option<&str>) -> AuthoritativeRecord {
    AuthoritativeRecord {
        order_id: order_id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        customer: "Acme Logistics".to_string(),
        route_name: "North loop".to_string(),
        driver_name: None,
        provider: None,
        status: "completed".to_string(),
        cost: 180.0,
        revenue: 240.0,
        trip_type: None,
        route_type: None,
        total_distance: None,
        leg_details: leg_details.map(|payload| payload.to_string()),
        note: None,
    }
}

/// JSON leg payload with the given tags
pub fn legs_payload(tags: &[&str]) -> String {
    let legs: Vec<String> = tags
        .iter()
        .map(|tag| format!(r#"{{"tag": "{tag}"}}"#))
        .collect();
    format!("[{}]", legs.join(", "))
}

/// Reporting period used across engine tests
pub fn january() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
    )
}
