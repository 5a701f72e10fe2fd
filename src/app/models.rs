//! Data models for trip reconciliation
//!
//! This module contains the core data structures for representing partner
//! spreadsheet rows, authoritative trip records, and the comparison result
//! shapes handed to the reporting layer.

use crate::constants::{CANONICAL_DATE_FORMAT, EXACT_MATCH_CONFIDENCE};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Tabular Input
// =============================================================================

/// In-memory tabular input decoded from a partner spreadsheet
///
/// Produced by the upload/adapter layer; the reconciliation core never
/// touches file bytes directly. The header row is separated from the data
/// rows, and data rows may be ragged (missing trailing cells read as empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    /// Column headers, in sheet order, trimmed
    pub headers: Vec<String>,

    /// Data rows, each a list of cell values aligned with `headers`
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    /// Create tabular data from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (excluding the header)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the input carries no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Template Tag
// =============================================================================

/// Tag identifying which partner template a row was parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// One partner row per trip, keyed by departure and return tags
    Route,
    /// One partner row per trip, all tags packed into one cell
    Shift,
    /// One partner row per trip leg, keyed by the leg tag alone
    PerLeg,
}

impl TemplateType {
    /// Stable lowercase identifier used in CLI arguments and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Route => "route",
            TemplateType::Shift => "shift",
            TemplateType::PerLeg => "per_leg",
        }
    }

    /// Human-readable template name for reports and error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateType::Route => "Route",
            TemplateType::Shift => "Shift",
            TemplateType::PerLeg => "Row-per-leg",
        }
    }

    /// All known template types, in registration order
    pub fn all() -> [TemplateType; 3] {
        [TemplateType::Route, TemplateType::Shift, TemplateType::PerLeg]
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "route" => Ok(TemplateType::Route),
            "shift" => Ok(TemplateType::Shift),
            "per_leg" | "per-leg" | "leg" => Ok(TemplateType::PerLeg),
            other => Err(crate::Error::template_not_found(other)),
        }
    }
}

// =============================================================================
// Normalized Partner Row
// =============================================================================

/// One partner-reported trip line in normalized form
///
/// Created once by a template parser from one input row and immutable
/// thereafter. Owned by the caller for the duration of one comparison
/// request; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Trip date in canonical `YYYY-MM-DD` form; empty when the source cell
    /// could not be parsed (the row still participates in matching)
    pub date: String,

    /// Vehicle identifier as reported by the partner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,

    /// Route description as reported by the partner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,

    /// Join key derived by the owning parser; lower-cased and trimmed,
    /// used only for matching and never displayed
    pub unique_key: String,

    /// Original column-name to cell-value mapping, retained for diff
    /// display and audit
    pub raw_fields: BTreeMap<String, String>,

    /// Template the row was parsed with
    pub template_type: TemplateType,

    /// 1-based row number in the source sheet, counting the header as row 1
    pub source_row_number: usize,
}

// =============================================================================
// Authoritative Trip Record
// =============================================================================

/// One leg of an authoritative trip
///
/// Legs carry the stamp/tag codes partners key their reports on, plus the
/// vehicle plate observed on that leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    /// Stamp/tag code recorded for the leg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Vehicle plate observed on the leg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// One operator-side trip from the authoritative database
///
/// Supplied by the external query layer; the reconciliation core reads it
/// but never mutates or persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeRecord {
    /// Unique order identifier
    pub order_id: String,

    /// Trip date
    pub date: NaiveDate,

    /// Customer the trip was performed for
    pub customer: String,

    /// Route description
    pub route_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Trip status (e.g. "completed", "cancelled")
    pub status: String,

    /// Cost owed to the provider
    pub cost: f64,

    /// Revenue invoiced to the customer
    pub revenue: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,

    /// Total distance in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,

    /// Raw JSON array of leg sub-records as synchronized from the trips
    /// sheet; parsed defensively by the comparison engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuthoritativeRecord {
    /// Trip date in the canonical form used by join keys and date diffs
    pub fn canonical_date(&self) -> String {
        self.date.format(CANONICAL_DATE_FORMAT).to_string()
    }
}

// =============================================================================
// Field Differences
// =============================================================================

/// Severity of a field-level difference
///
/// Ordered so the aggregate severity of a mismatched trip is simply the
/// maximum over its differences.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// One field-level disagreement between a partner row and its matched
/// authoritative record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDifference {
    /// Name of the compared field
    pub field: String,

    /// Value on the authoritative side, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authoritative_value: Option<String>,

    /// Value on the partner side, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_value: Option<String>,

    pub severity: Severity,

    /// Human-readable explanation for the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Comparison Categories
// =============================================================================

/// A partner row that agreed with its authoritative record on every
/// compared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTrip {
    pub row: NormalizedRow,

    /// Order id of the matched authoritative record
    pub order_id: String,

    /// Match confidence; always [`EXACT_MATCH_CONFIDENCE`] for key matches
    pub confidence: u8,
}

impl MatchedTrip {
    /// Create an exact-key match entry
    pub fn exact(row: NormalizedRow, order_id: impl Into<String>) -> Self {
        Self {
            row,
            order_id: order_id.into(),
            confidence: EXACT_MATCH_CONFIDENCE,
        }
    }
}

/// A partner row matched by key but disagreeing on one or more fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchedTrip {
    pub row: NormalizedRow,

    pub order_id: String,

    /// Every detected disagreement, in comparator order
    pub differences: Vec<FieldDifference>,

    /// Highest severity among `differences`
    pub severity: Severity,
}

/// A partner row with no authoritative counterpart
/// ("missing on authoritative side")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerOnlyTrip {
    pub row: NormalizedRow,

    /// Key the engine looked up without success
    pub searched_key: String,

    /// Fixed diagnostic reason string
    pub reason: String,
}

/// An authoritative record never claimed by any partner row
/// ("missing on partner side")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemOnlyTrip {
    pub order_id: String,

    /// Representative candidate key the partner file was expected to carry
    pub expected_key: String,

    pub date: NaiveDate,

    pub route_name: String,

    pub customer: String,
}

/// A non-fatal data problem found on an authoritative record during
/// comparison, surfaced so consumers can distinguish "no legs" from
/// "legs unreadable"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIntegrityWarning {
    pub order_id: String,
    pub message: String,
}

// =============================================================================
// Comparison Result
// =============================================================================

/// Requested reporting period, echoed back in result metadata
///
/// Filtering happens when authoritative records are fetched; the engine
/// itself does not filter by date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Inclusive containment check used by the record-fetch adapter
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Counts and match rate for one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_partner_rows: usize,
    pub total_authoritative_records: usize,
    pub matched_count: usize,
    pub mismatched_count: usize,
    /// Partner rows absent from the system
    pub missing_in_system_count: usize,
    /// System records absent from the partner file
    pub missing_in_partner_count: usize,
    /// Percentage of partner rows fully matched, rounded to two decimals
    pub match_rate: f64,
}

impl ComparisonSummary {
    /// Assemble summary counts and compute the match rate
    pub fn compute(
        matched: usize,
        mismatched: usize,
        missing_in_system: usize,
        missing_in_partner: usize,
        total_authoritative_records: usize,
    ) -> Self {
        let total_partner_rows = matched + mismatched + missing_in_system;
        Self {
            total_partner_rows,
            total_authoritative_records,
            matched_count: matched,
            mismatched_count: mismatched,
            missing_in_system_count: missing_in_system,
            missing_in_partner_count: missing_in_partner,
            match_rate: Self::match_rate_percent(matched, total_partner_rows),
        }
    }

    /// Match rate as a percentage rounded to two decimals; zero when there
    /// are no partner rows
    pub fn match_rate_percent(matched: usize, total_partner_rows: usize) -> f64 {
        if total_partner_rows == 0 {
            return 0.0;
        }
        let rate = matched as f64 / total_partner_rows as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Metadata describing one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    pub template_type: TemplateType,
    pub date_range: DateRange,
    pub generated_at: DateTime<Utc>,
    /// Wall-clock processing duration in milliseconds
    pub processing_ms: u64,
}

/// The sole output of the comparison engine
///
/// Every partner row appears in exactly one of `matched`, `mismatched`, or
/// `missing_in_system`; every authoritative record is either referenced by
/// a matched/mismatched entry or listed once in `missing_in_partner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub summary: ComparisonSummary,
    pub matched: Vec<MatchedTrip>,
    pub mismatched: Vec<MismatchedTrip>,
    pub missing_in_system: Vec<PartnerOnlyTrip>,
    pub missing_in_partner: Vec<SystemOnlyTrip>,
    pub integrity_warnings: Vec<DataIntegrityWarning>,
    pub metadata: ComparisonMetadata,
}

impl ComparisonResult {
    /// Check whether every record on both sides reconciled cleanly
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
            && self.missing_in_system.is_empty()
            && self.missing_in_partner.is_empty()
    }

    /// Total number of entries needing human review
    pub fn discrepancy_count(&self) -> usize {
        self.mismatched.len() + self.missing_in_system.len() + self.missing_in_partner.len()
    }
}
