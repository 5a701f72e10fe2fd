//! Field-level difference detection
//!
//! Each comparator inspects one field of a key-matched pair and reports a
//! difference with a severity, or nothing. New comparators slot into
//! [`comparators`] without touching the matching algorithm.

use crate::app::models::{
    AuthoritativeRecord, FieldDifference, NormalizedRow, Severity, TripLeg,
};
use crate::app::services::template_parser::key_derivation::normalize_component;

/// Field name reported for date disagreements
pub const FIELD_DATE: &str = "date";

/// Field name reported for license plate disagreements
pub const FIELD_LICENSE_PLATE: &str = "license_plate";

/// A field comparator over one key-matched pair
pub type FieldComparator =
    fn(&NormalizedRow, &AuthoritativeRecord, &[TripLeg]) -> Option<FieldDifference>;

/// The active comparators, in report order
pub fn comparators() -> &'static [FieldComparator] {
    const COMPARATORS: &[FieldComparator] = &[compare_date, compare_license_plate];
    COMPARATORS
}

/// Run every comparator over a key-matched pair
pub fn detect_differences(
    row: &NormalizedRow,
    record: &AuthoritativeRecord,
    legs: &[TripLeg],
) -> Vec<FieldDifference> {
    comparators()
        .iter()
        .filter_map(|comparator| comparator(row, record, legs))
        .collect()
}

/// Highest severity among a set of differences
pub fn aggregate_severity(differences: &[FieldDifference]) -> Severity {
    differences
        .iter()
        .map(|difference| difference.severity)
        .max()
        .unwrap_or(Severity::Info)
}

/// Compare trip dates by exact equality of their canonical forms
///
/// An unparseable partner date normalized to the empty string compares
/// unequal to any real date, so such rows surface here when key matching
/// somehow still succeeded.
fn compare_date(
    row: &NormalizedRow,
    record: &AuthoritativeRecord,
    _legs: &[TripLeg],
) -> Option<FieldDifference> {
    let authoritative = record.canonical_date();
    if row.date == authoritative {
        return None;
    }

    Some(FieldDifference {
        field: FIELD_DATE.to_string(),
        authoritative_value: Some(authoritative),
        partner_value: Some(row.date.clone()),
        severity: Severity::Critical,
        message: Some("date does not match".to_string()),
    })
}

/// Compare the partner-reported plate against every leg plate
///
/// Only runs when the partner supplied a plate. A record with no plates
/// recorded at all is treated as "unknown", not "wrong", and produces no
/// difference.
fn compare_license_plate(
    row: &NormalizedRow,
    _record: &AuthoritativeRecord,
    legs: &[TripLeg],
) -> Option<FieldDifference> {
    let partner_plate = row.license_plate.as_deref()?.trim();
    if partner_plate.is_empty() {
        return None;
    }

    let recorded: Vec<&str> = legs
        .iter()
        .filter_map(|leg| leg.license_plate.as_deref())
        .map(str::trim)
        .filter(|plate| !plate.is_empty())
        .collect();

    if recorded.is_empty() {
        return None;
    }

    let normalized_partner = normalize_component(partner_plate);
    if recorded
        .iter()
        .any(|plate| normalize_component(plate) == normalized_partner)
    {
        return None;
    }

    Some(FieldDifference {
        field: FIELD_LICENSE_PLATE.to_string(),
        authoritative_value: Some(recorded.join(", ")),
        partner_value: Some(partner_plate.to_string()),
        severity: Severity::Warning,
        message: Some("license plate not recorded on any leg of the matched trip".to_string()),
    })
}
