//! Candidate-key index over authoritative records
//!
//! For every authoritative record the index derives the candidate keys a
//! partner row could claim it under, applying the same per-template rule
//! used on the partner side to the record's legs. Lookups during the match
//! passes are then O(1) hash probes.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::app::models::{AuthoritativeRecord, DataIntegrityWarning, TemplateType, TripLeg};
use crate::app::services::template_parser::key_derivation::candidate_keys;

/// Lookup structures built once per comparison call
#[derive(Debug)]
pub struct KeyIndex<'a> {
    /// Candidate key to claiming order id
    key_to_order: HashMap<String, String>,

    /// Order id to full record
    records_by_order: HashMap<String, &'a AuthoritativeRecord>,

    /// Order id to parsed legs (empty when absent or unreadable)
    legs_by_order: HashMap<String, Vec<TripLeg>>,

    /// Order id to one representative candidate key, for diagnostics
    representative_keys: HashMap<String, String>,

    /// Records whose leg payload could not be read
    integrity_warnings: Vec<DataIntegrityWarning>,
}

impl<'a> KeyIndex<'a> {
    /// Build the index for one template over a set of authoritative records
    ///
    /// When two records produce the same candidate key, the later-indexed
    /// record claims it; a warning names both orders. This is a known
    /// limitation of exact-key matching, not corrected automatically.
    pub fn build(template_type: TemplateType, records: &'a [AuthoritativeRecord]) -> Self {
        let mut key_to_order = HashMap::new();
        let mut records_by_order = HashMap::new();
        let mut legs_by_order = HashMap::new();
        let mut representative_keys = HashMap::new();
        let mut integrity_warnings = Vec::new();

        for record in records {
            let (legs, warning) = parse_legs(record);
            if let Some(warning) = warning {
                integrity_warnings.push(warning);
            }

            let keys = candidate_keys(template_type, &record.canonical_date(), &legs);
            if let Some(first) = keys.first() {
                representative_keys.insert(record.order_id.clone(), first.clone());
            }

            for key in keys {
                if let Some(previous) = key_to_order.get(&key) {
                    if previous != &record.order_id {
                        warn!(
                            "Candidate key '{}' claimed by order {} overwrites order {}",
                            key, record.order_id, previous
                        );
                    }
                }
                key_to_order.insert(key, record.order_id.clone());
            }

            records_by_order.insert(record.order_id.clone(), record);
            legs_by_order.insert(record.order_id.clone(), legs);
        }

        debug!(
            "Key index built: {} candidate keys over {} records",
            key_to_order.len(),
            records_by_order.len()
        );

        Self {
            key_to_order,
            records_by_order,
            legs_by_order,
            representative_keys,
            integrity_warnings,
        }
    }

    /// Order id claiming a candidate key, if any
    pub fn order_for_key(&self, key: &str) -> Option<&str> {
        self.key_to_order.get(key).map(String::as_str)
    }

    /// Full record for an order id
    pub fn record(&self, order_id: &str) -> Option<&'a AuthoritativeRecord> {
        self.records_by_order.get(order_id).copied()
    }

    /// Parsed legs for an order id; empty when absent or unreadable
    pub fn legs(&self, order_id: &str) -> &[TripLeg] {
        self.legs_by_order
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Representative candidate key for an order id, for diagnostic display
    pub fn representative_key(&self, order_id: &str) -> &str {
        self.representative_keys
            .get(order_id)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Records whose leg payload could not be read
    pub fn integrity_warnings(&self) -> &[DataIntegrityWarning] {
        &self.integrity_warnings
    }

    /// Number of candidate keys in the index
    pub fn key_count(&self) -> usize {
        self.key_to_order.len()
    }
}

/// Parse a record's leg-details payload, degrading instead of failing
///
/// A missing or empty payload is simply a record without legs. An
/// unreadable payload is treated as zero legs so one bad record never
/// aborts the batch, and is reported as a [`DataIntegrityWarning`] so
/// consumers can tell "no legs" from "legs unreadable".
pub fn parse_legs(record: &AuthoritativeRecord) -> (Vec<TripLeg>, Option<DataIntegrityWarning>) {
    let payload = match record.leg_details.as_deref() {
        None => return (Vec::new(), None),
        Some(payload) if payload.trim().is_empty() => return (Vec::new(), None),
        Some(payload) => payload,
    };

    match serde_json::from_str::<Vec<TripLeg>>(payload) {
        Ok(legs) => (legs, None),
        Err(error) => {
            warn!(
                "Order {}: unreadable leg details ({}); treating as zero legs",
                record.order_id, error
            );
            let warning = DataIntegrityWarning {
                order_id: record.order_id.clone(),
                message: format!("leg details could not be parsed: {error}"),
            };
            (Vec::new(), Some(warning))
        }
    }
}
