//! Tests for candidate-key index construction

use super::{legs_payload, record};
use crate::app::models::TemplateType;
use crate::app::services::comparison_engine::key_index::{parse_legs, KeyIndex};

#[test]
fn test_build_route_index_uses_first_and_last_leg() {
    let records = vec![record(
        "ORD-1",
        "2026-01-01",
        Some(&legs_payload(&["A1", "X9", "B2"])),
    )];

    let index = KeyIndex::build(TemplateType::Route, &records);
    assert_eq!(index.key_count(), 1);
    assert_eq!(index.order_for_key("2026-01-01|a1|b2"), Some("ORD-1"));
    assert_eq!(index.representative_key("ORD-1"), "2026-01-01|a1|b2");
}

#[test]
fn test_build_per_leg_index_one_key_per_leg() {
    let records = vec![record(
        "ORD-1",
        "2026-01-01",
        Some(&legs_payload(&["L1", "L2", "L3"])),
    )];

    let index = KeyIndex::build(TemplateType::PerLeg, &records);
    assert_eq!(index.key_count(), 3);
    assert_eq!(index.order_for_key("l2"), Some("ORD-1"));
}

#[test]
fn test_collision_later_record_wins() {
    let records = vec![
        record("ORD-1", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
        record("ORD-2", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
    ];

    let index = KeyIndex::build(TemplateType::Route, &records);
    // Last-registered order claims the key; a warning is logged, the
    // earlier order can only surface as missing on the partner side.
    assert_eq!(index.order_for_key("2026-01-01|a1|b2"), Some("ORD-2"));
}

#[test]
fn test_record_without_legs_produces_no_keys() {
    let records = vec![record("ORD-1", "2026-01-01", None)];

    let index = KeyIndex::build(TemplateType::Route, &records);
    assert_eq!(index.key_count(), 0);
    assert_eq!(index.representative_key("ORD-1"), "");
    assert!(index.integrity_warnings().is_empty());
}

#[test]
fn test_malformed_leg_payload_degrades_with_warning() {
    let records = vec![
        record("ORD-1", "2026-01-01", Some("{broken")),
        record("ORD-2", "2026-01-01", Some(&legs_payload(&["A1", "B2"]))),
    ];

    let index = KeyIndex::build(TemplateType::Route, &records);

    // The bad record contributes nothing but the batch is unaffected
    assert_eq!(index.key_count(), 1);
    assert!(index.legs("ORD-1").is_empty());
    assert_eq!(index.integrity_warnings().len(), 1);
    assert_eq!(index.integrity_warnings()[0].order_id, "ORD-1");
}

#[test]
fn test_parse_legs_empty_payload_is_not_a_warning() {
    let (legs, warning) = parse_legs(&record("ORD-1", "2026-01-01", Some("  ")));
    assert!(legs.is_empty());
    assert!(warning.is_none());
}

#[test]
fn test_parse_legs_reads_tags_and_plates() {
    let payload = r#"[{"tag": "A1", "license_plate": "12-345-67"}, {"tag": "B2"}]"#;
    let (legs, warning) = parse_legs(&record("ORD-1", "2026-01-01", Some(payload)));

    assert!(warning.is_none());
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0].tag.as_deref(), Some("A1"));
    assert_eq!(legs[0].license_plate.as_deref(), Some("12-345-67"));
    assert_eq!(legs[1].license_plate, None);
}
