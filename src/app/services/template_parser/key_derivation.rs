//! Join-key derivation for partner rows and authoritative trips
//!
//! Partner rows and authoritative records share no primary key; each
//! template defines how a trip is identified. This module owns both sides
//! of that rule: the key a parser derives from a partner row, and the
//! candidate keys the engine derives from an authoritative record's legs.
//! Every function here is pure so the join semantics stay independently
//! testable.
//!
//! All key components are lower-cased and trimmed before composition, so
//! `"  A1 "` and `"a1"` always produce the same key.

use crate::app::models::{TemplateType, TripLeg};
use crate::constants::KEY_SEPARATOR;

/// Normalize one key component: trim surrounding whitespace and lower-case
pub fn normalize_component(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Key for the "Route" template: `date|departure_tag|return_tag`
pub fn route_key(date: &str, departure_tag: &str, return_tag: &str) -> String {
    [date, departure_tag, return_tag]
        .iter()
        .map(|component| normalize_component(component))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Key for the "Shift" template: `date` followed by the sorted unique tags
pub fn shift_key(date: &str, tags: &[String]) -> String {
    let mut normalized: Vec<String> = tags
        .iter()
        .map(|tag| normalize_component(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();

    let mut components = vec![normalize_component(date)];
    components.extend(normalized);
    components.join(KEY_SEPARATOR)
}

/// Key for the "Row-per-leg" template: the leg tag alone, no date component
pub fn per_leg_key(tag: &str) -> String {
    normalize_component(tag)
}

/// Candidate keys an authoritative record can be claimed under
///
/// Applies the same per-template rule used on the partner side to the
/// record's legs. A record with no usable tags produces no candidates and
/// can only surface as missing on the partner side.
pub fn candidate_keys(
    template_type: TemplateType,
    canonical_date: &str,
    legs: &[TripLeg],
) -> Vec<String> {
    match template_type {
        TemplateType::Route => {
            let first = legs.first().and_then(|leg| leg.tag.as_deref());
            let last = legs.last().and_then(|leg| leg.tag.as_deref());
            match (first, last) {
                (None, None) => Vec::new(),
                (first, last) => vec![route_key(
                    canonical_date,
                    first.unwrap_or_default(),
                    last.unwrap_or_default(),
                )],
            }
        }
        TemplateType::Shift => {
            let tags: Vec<String> = legs
                .iter()
                .filter_map(|leg| leg.tag.as_deref())
                .map(|tag| tag.to_string())
                .collect();
            if tags.is_empty() {
                Vec::new()
            } else {
                vec![shift_key(canonical_date, &tags)]
            }
        }
        TemplateType::PerLeg => legs
            .iter()
            .filter_map(|leg| leg.tag.as_deref())
            .map(|tag| per_leg_key(tag))
            .filter(|key| !key.is_empty())
            .collect(),
    }
}
