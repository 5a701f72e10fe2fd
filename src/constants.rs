//! Shared constants for trip reconciliation.
//!
//! Centralizes the partner template column headers, date formats, and the
//! fixed strings used by the comparison engine so that parsers, the
//! registry, and tests all agree on one definition.

/// Canonical date format used in join keys and date comparison.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first date format commonly used in partner spreadsheets.
pub const PARTNER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Separator between join-key components.
pub const KEY_SEPARATOR: &str = "|";

/// Reason recorded for partner rows with no authoritative counterpart.
pub const REASON_NOT_IN_SYSTEM: &str = "not found in system";

/// Confidence assigned to exact key matches.
///
/// Matching is exact-key only today; the field exists so graded confidence
/// can be introduced without changing the result schema.
pub const EXACT_MATCH_CONFIDENCE: u8 = 100;

/// Score a template must reach during auto-detection to be selected.
pub const DETECTION_REQUIRED_SCORE: f64 = 100.0;

/// Expected column headers per partner template.
///
/// Partner layouts are visually similar; two sheets belong to the same
/// template only when every header here is present verbatim.
pub mod columns {
    /// Trip date column, shared by every template.
    pub const DATE: &str = "Date";

    /// "Route" template: one partner row per authoritative trip, identified
    /// by the tags stamped at departure and return.
    pub mod route {
        pub const ROUTE_NAME: &str = "Route Name";
        pub const DEPARTURE_TAG: &str = "Departure Tag";
        pub const RETURN_TAG: &str = "Return Tag";
        pub const LICENSE_PLATE: &str = "License Plate";
    }

    /// "Shift" template: one partner row per authoritative trip, with every
    /// tag of the shift packed newline-delimited into a single cell.
    pub mod shift {
        pub const SHIFT_NAME: &str = "Shift Name";
        pub const TRIP_TAGS: &str = "Trip Tags";
        pub const VEHICLE: &str = "Vehicle";
    }

    /// "Row-per-leg" template: N partner rows per authoritative trip, one
    /// per leg, identified by the leg tag alone.
    pub mod per_leg {
        pub const LEG_TAG: &str = "Leg Tag";
        pub const DIRECTION: &str = "Direction";
        pub const VEHICLE: &str = "Vehicle";
    }
}
