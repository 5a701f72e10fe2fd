//! Tests for join-key derivation on both sides of the match

use crate::app::models::{TemplateType, TripLeg};
use crate::app::services::template_parser::key_derivation::{
    candidate_keys, normalize_component, per_leg_key, route_key, shift_key,
};

fn leg(tag: Option<&str>) -> TripLeg {
    TripLeg {
        tag: tag.map(|value| value.to_string()),
        license_plate: None,
        origin: None,
        destination: None,
    }
}

#[test]
fn test_normalize_component_case_and_whitespace() {
    assert_eq!(normalize_component("  A1 "), "a1");
    assert_eq!(normalize_component("a1"), "a1");
    assert_eq!(normalize_component(""), "");
}

#[test]
fn test_route_key_composition() {
    assert_eq!(route_key("2026-01-01", "A1", "B2"), "2026-01-01|a1|b2");
}

#[test]
fn test_route_key_is_deterministic() {
    let first = route_key("2026-01-01", "  A1 ", "B2");
    let second = route_key("2026-01-01", "a1", " b2");
    assert_eq!(first, second);
}

#[test]
fn test_route_key_empty_date_component() {
    // Unparseable dates contribute an empty component instead of aborting
    assert_eq!(route_key("", "A1", "B2"), "|a1|b2");
}

#[test]
fn test_shift_key_sorts_and_dedupes_tags() {
    let tags = vec!["B2".to_string(), "a1".to_string(), "A1".to_string()];
    assert_eq!(shift_key("2026-01-01", &tags), "2026-01-01|a1|b2");
}

#[test]
fn test_shift_key_drops_blank_tags() {
    let tags = vec!["A1".to_string(), "  ".to_string()];
    assert_eq!(shift_key("2026-01-01", &tags), "2026-01-01|a1");
}

#[test]
fn test_per_leg_key_has_no_date_component() {
    assert_eq!(per_leg_key(" L7 "), "l7");
}

#[test]
fn test_candidate_keys_route_uses_first_and_last_leg() {
    let legs = vec![leg(Some("A1")), leg(Some("X9")), leg(Some("B2"))];
    assert_eq!(
        candidate_keys(TemplateType::Route, "2026-01-01", &legs),
        vec!["2026-01-01|a1|b2"]
    );
}

#[test]
fn test_candidate_keys_route_single_leg() {
    let legs = vec![leg(Some("A1"))];
    assert_eq!(
        candidate_keys(TemplateType::Route, "2026-01-01", &legs),
        vec!["2026-01-01|a1|a1"]
    );
}

#[test]
fn test_candidate_keys_route_no_legs() {
    assert!(candidate_keys(TemplateType::Route, "2026-01-01", &[]).is_empty());
}

#[test]
fn test_candidate_keys_route_untagged_legs() {
    let legs = vec![leg(None), leg(None)];
    assert!(candidate_keys(TemplateType::Route, "2026-01-01", &legs).is_empty());
}

#[test]
fn test_candidate_keys_shift_matches_partner_side() {
    let legs = vec![leg(Some("B2")), leg(Some("A1")), leg(Some("a1"))];
    let candidates = candidate_keys(TemplateType::Shift, "2026-01-01", &legs);

    let partner = shift_key("2026-01-01", &["A1".to_string(), "B2".to_string()]);
    assert_eq!(candidates, vec![partner]);
}

#[test]
fn test_candidate_keys_per_leg_one_per_tagged_leg() {
    let legs = vec![leg(Some("L1")), leg(None), leg(Some("L2"))];
    assert_eq!(
        candidate_keys(TemplateType::PerLeg, "2026-01-01", &legs),
        vec!["l1", "l2"]
    );
}
