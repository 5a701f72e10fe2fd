//! Tests for the two-pass comparison engine

use super::{january, legs_payload, record, row};
use crate::app::models::{Severity, TemplateType};
use crate::app::services::comparison_engine::ComparisonEngine;
use crate::constants::{EXACT_MATCH_CONFIDENCE, REASON_NOT_IN_SYSTEM};
use crate::Error;

#[test]
fn test_compare_empty_rows_fails() {
    let engine = ComparisonEngine::new();
    let records = vec![record("ORD-1", "2026-01-01", None)];

    let error = engine.compare(&[], &records, &january()).unwrap_err();
    assert!(matches!(error, Error::EmptyInput { .. }));
}

#[test]
fn test_exact_match_has_full_confidence() {
    let engine = ComparisonEngine::new();
    let rows = vec![row(TemplateType::Route, "2026-01-01", "2026-01-01|a1|b2")];
    let records = vec![record(
        "ORD-1",
        "2026-01-01",
        Some(&legs_payload(&["A1", "X9", "B2"])),
    )];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].order_id, "ORD-1");
    assert_eq!(result.matched[0].confidence, EXACT_MATCH_CONFIDENCE);
    assert!(result.mismatched.is_empty());
    assert!(result.missing_in_system.is_empty());
    assert!(result.missing_in_partner.is_empty());
    assert_eq!(result.summary.match_rate, 100.0);
    assert!(result.is_clean());
}

#[test]
fn test_date_difference_classifies_as_mismatched() {
    let engine = ComparisonEngine::new();
    // Key carries the partner date; the record date disagrees
    let rows = vec![row(TemplateType::PerLeg, "2026-01-01", "l1")];
    let records = vec![record("ORD-1", "2026-01-02", Some(&legs_payload(&["L1"])))];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    assert!(result.matched.is_empty());
    assert_eq!(result.mismatched.len(), 1);
    let entry = &result.mismatched[0];
    assert_eq!(entry.order_id, "ORD-1");
    assert_eq!(entry.severity, Severity::Critical);
    assert_eq!(entry.differences.len(), 1);
    assert_eq!(entry.differences[0].field, "date");
}

#[test]
fn test_unmatched_partner_row_records_searched_key() {
    let engine = ComparisonEngine::new();
    let rows = vec![row(TemplateType::Route, "2026-03-01", "2026-03-01|c3|d4")];

    let result = engine.compare(&rows, &[], &january()).unwrap();

    assert_eq!(result.missing_in_system.len(), 1);
    let entry = &result.missing_in_system[0];
    assert_eq!(entry.searched_key, "2026-03-01|c3|d4");
    assert_eq!(entry.reason, REASON_NOT_IN_SYSTEM);
    // No partner rows matched anything
    assert_eq!(result.summary.match_rate, 0.0);
}

#[test]
fn test_unclaimed_record_reports_expected_key() {
    let engine = ComparisonEngine::new();
    let rows = vec![row(TemplateType::Route, "2026-01-01", "2026-01-01|a1|b2")];
    let records = vec![
        record("ORD-1", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
        record("ORD-2", "2026-03-01", Some(&legs_payload(&["E5", "F6"]))),
    ];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    assert_eq!(result.missing_in_partner.len(), 1);
    let entry = &result.missing_in_partner[0];
    assert_eq!(entry.order_id, "ORD-2");
    assert_eq!(entry.expected_key, "2026-03-01|e5|f6");
}

#[test]
fn test_per_leg_many_rows_one_order() {
    let engine = ComparisonEngine::new();
    let rows = vec![
        row(TemplateType::PerLeg, "2026-01-01", "l1"),
        row(TemplateType::PerLeg, "2026-01-01", "l2"),
        row(TemplateType::PerLeg, "2026-01-01", "l3"),
    ];
    let records = vec![record(
        "ORD-1",
        "2026-01-01",
        Some(&legs_payload(&["L1", "L2", "L3"])),
    )];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    // Many-to-one is expected and correct for this template
    assert_eq!(result.matched.len(), 3);
    assert!(result.matched.iter().all(|entry| entry.order_id == "ORD-1"));
    assert!(result.missing_in_partner.is_empty());
    assert_eq!(result.summary.match_rate, 100.0);
}

#[test]
fn test_partition_and_coverage_properties() {
    let engine = ComparisonEngine::new();
    let rows = vec![
        // Agrees with ORD-1 on every field
        row(TemplateType::Route, "2026-01-01", "2026-01-01|a1|b2"),
        // Claims ORD-2 by key but reports a different trip date
        row(TemplateType::Route, "2026-01-02", "2026-01-05|c3|d4"),
        // Matches nothing
        row(TemplateType::Route, "2026-01-03", "2026-01-03|zz|zz"),
    ];
    let records = vec![
        record("ORD-1", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
        record("ORD-2", "2026-01-05", Some(&legs_payload(&["C3", "D4"]))),
        record("ORD-3", "2026-01-09", Some(&legs_payload(&["Q7", "Q8"]))),
    ];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    // Partition: every partner row lands in exactly one category
    assert_eq!(
        result.matched.len() + result.mismatched.len() + result.missing_in_system.len(),
        rows.len()
    );

    // Coverage: unclaimed records are exactly those never referenced
    let referenced: std::collections::HashSet<&str> = result
        .matched
        .iter()
        .map(|entry| entry.order_id.as_str())
        .chain(result.mismatched.iter().map(|entry| entry.order_id.as_str()))
        .collect();
    assert_eq!(
        result.missing_in_partner.len(),
        records.len() - referenced.len()
    );

    assert_eq!(result.summary.total_partner_rows, 3);
    assert_eq!(result.summary.matched_count, 1);
    assert_eq!(result.summary.mismatched_count, 1);
    assert_eq!(result.summary.missing_in_system_count, 1);
    assert_eq!(result.summary.missing_in_partner_count, 1);
}

#[test]
fn test_match_rate_rounds_to_two_decimals() {
    let engine = ComparisonEngine::new();
    let rows = vec![
        row(TemplateType::PerLeg, "2026-01-01", "l1"),
        row(TemplateType::PerLeg, "2026-01-01", "gone-1"),
        row(TemplateType::PerLeg, "2026-01-01", "gone-2"),
    ];
    let records = vec![record("ORD-1", "2026-01-01", Some(&legs_payload(&["L1"])))];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    // 1/3 = 33.333... rounds to 33.33
    assert_eq!(result.summary.match_rate, 33.33);
    assert!(result.summary.match_rate >= 0.0 && result.summary.match_rate <= 100.0);
}

#[test]
fn test_malformed_record_degrades_without_aborting() {
    let engine = ComparisonEngine::new();
    let rows = vec![row(TemplateType::Route, "2026-01-01", "2026-01-01|a1|b2")];
    let records = vec![
        record("ORD-BAD", "2026-01-01", Some("not json at all")),
        record("ORD-1", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
    ];

    let result = engine.compare(&rows, &records, &january()).unwrap();

    // The healthy record still matches
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].order_id, "ORD-1");

    // The unreadable record surfaces both as system-only and as a warning
    assert_eq!(result.missing_in_partner.len(), 1);
    assert_eq!(result.missing_in_partner[0].order_id, "ORD-BAD");
    assert_eq!(result.integrity_warnings.len(), 1);
    assert_eq!(result.integrity_warnings[0].order_id, "ORD-BAD");
}

#[test]
fn test_metadata_echoes_request() {
    let engine = ComparisonEngine::new();
    let rows = vec![row(TemplateType::Shift, "2026-01-01", "2026-01-01|a1")];
    let range = january();

    let result = engine.compare(&rows, &[], &range).unwrap();

    assert_eq!(result.metadata.template_type, TemplateType::Shift);
    assert_eq!(result.metadata.date_range, range);
}
