//! Comparison engine orchestration
//!
//! Runs the two-pass match between normalized partner rows and
//! authoritative records and assembles the final result with summary
//! statistics and timing metadata. Both passes are O(rows + records)
//! amortized via the candidate-key index.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use super::field_diff::{aggregate_severity, detect_differences};
use super::key_index::KeyIndex;
use crate::app::models::{
    AuthoritativeRecord, ComparisonMetadata, ComparisonResult, ComparisonSummary, DateRange,
    MatchedTrip, MismatchedTrip, NormalizedRow, PartnerOnlyTrip, SystemOnlyTrip,
};
use crate::constants::REASON_NOT_IN_SYSTEM;
use crate::{Error, Result};

/// Engine matching partner rows against authoritative trips
///
/// Each [`compare`](ComparisonEngine::compare) call allocates its own
/// lookup structures, so one engine value may serve concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Create a new comparison engine
    pub fn new() -> Self {
        Self
    }

    /// Compare normalized partner rows against authoritative records
    ///
    /// All rows are assumed to share one template type, taken from the
    /// first row. Fails with [`Error::EmptyInput`] when there are no rows
    /// to reconcile. The date range is echoed into the result metadata;
    /// filtering already happened when the records were fetched.
    pub fn compare(
        &self,
        rows: &[NormalizedRow],
        records: &[AuthoritativeRecord],
        date_range: &DateRange,
    ) -> Result<ComparisonResult> {
        let started = Instant::now();

        if rows.is_empty() {
            return Err(Error::empty_input(
                "comparison requires at least one partner row",
            ));
        }

        let template_type = rows[0].template_type;
        info!(
            "Comparing {} partner rows against {} authoritative records ({})",
            rows.len(),
            records.len(),
            template_type.display_name()
        );

        let index = KeyIndex::build(template_type, records);

        let mut matched = Vec::new();
        let mut mismatched = Vec::new();
        let mut missing_in_system = Vec::new();
        let mut referenced_orders: HashSet<&str> = HashSet::new();

        // Pass 1: partner -> authoritative
        for row in rows {
            let record = index
                .order_for_key(&row.unique_key)
                .and_then(|order_id| index.record(order_id));

            let Some(record) = record else {
                debug!(
                    "Row {} key '{}' not found in system",
                    row.source_row_number, row.unique_key
                );
                missing_in_system.push(PartnerOnlyTrip {
                    row: row.clone(),
                    searched_key: row.unique_key.clone(),
                    reason: REASON_NOT_IN_SYSTEM.to_string(),
                });
                continue;
            };

            referenced_orders.insert(record.order_id.as_str());

            let differences = detect_differences(row, record, index.legs(&record.order_id));
            if differences.is_empty() {
                matched.push(MatchedTrip::exact(row.clone(), record.order_id.clone()));
            } else {
                let severity = aggregate_severity(&differences);
                mismatched.push(MismatchedTrip {
                    row: row.clone(),
                    order_id: record.order_id.clone(),
                    differences,
                    severity,
                });
            }
        }

        // Pass 2: authoritative -> partner
        let mut missing_in_partner = Vec::new();
        for record in records {
            if !referenced_orders.contains(record.order_id.as_str()) {
                missing_in_partner.push(SystemOnlyTrip {
                    order_id: record.order_id.clone(),
                    expected_key: index.representative_key(&record.order_id).to_string(),
                    date: record.date,
                    route_name: record.route_name.clone(),
                    customer: record.customer.clone(),
                });
            }
        }

        let summary = ComparisonSummary::compute(
            matched.len(),
            mismatched.len(),
            missing_in_system.len(),
            missing_in_partner.len(),
            records.len(),
        );

        info!(
            "Comparison complete: {} matched, {} mismatched, {} partner-only, {} system-only ({}% match rate)",
            summary.matched_count,
            summary.mismatched_count,
            summary.missing_in_system_count,
            summary.missing_in_partner_count,
            summary.match_rate
        );

        Ok(ComparisonResult {
            summary,
            matched,
            mismatched,
            missing_in_system,
            missing_in_partner,
            integrity_warnings: index.integrity_warnings().to_vec(),
            metadata: ComparisonMetadata {
                template_type,
                date_range: *date_range,
                generated_at: Utc::now(),
                processing_ms: started.elapsed().as_millis() as u64,
            },
        })
    }
}
