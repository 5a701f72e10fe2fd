//! Parsing statistics and result structures for partner sheets
//!
//! This module provides types for tracking parsing success rates and
//! organizing parsed rows for the comparison engine.

use crate::app::models::NormalizedRow;

/// Parsing result with normalized rows and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully normalized partner rows
    pub rows: Vec<NormalizedRow>,

    /// Parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Number of normalized rows produced
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of rows successfully normalized
    pub rows_parsed: usize,

    /// Separator rows skipped because their identifying cells were blank
    pub rows_skipped_blank: usize,

    /// Malformed rows skipped with an error recorded
    pub rows_skipped_invalid: usize,

    /// Row-level errors, for debugging
    pub errors: Vec<String>,

    /// Non-fatal row anomalies (e.g. unparseable dates) that did not
    /// prevent the row from participating in matching
    pub warnings: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            rows_parsed: 0,
            rows_skipped_blank: 0,
            rows_skipped_invalid: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Calculate success rate as a percentage of non-separator rows
    pub fn success_rate(&self) -> f64 {
        let considered = self.total_rows.saturating_sub(self.rows_skipped_blank);
        if considered == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / considered as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
