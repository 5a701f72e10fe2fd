//! Core template parser implementation
//!
//! This module provides the shared parsing orchestration: column signature
//! validation, row iteration with blank-row skipping and row-level error
//! recovery, and normalized row construction. Template-specific behavior
//! lives entirely in the signature and the key-derivation rules.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::field_parsers::{get_cell, normalize_date, split_tags};
use super::key_derivation::{per_leg_key, route_key, shift_key};
use super::stats::{ParseResult, ParseStats};
use super::template::{self, TemplateSignature};
use crate::app::models::{NormalizedRow, TabularData, TemplateType};
use crate::constants::columns;
use crate::{Error, Result};

/// Parser for one partner spreadsheet template
///
/// Validates that a tabular input carries the template's column signature,
/// converts each raw row into a [`NormalizedRow`], and derives the row's
/// join key using the template-specific rule.
#[derive(Debug, Clone, Copy)]
pub struct TemplateParser {
    signature: &'static TemplateSignature,
}

impl TemplateParser {
    /// Create a parser for the given template type
    pub fn new(template_type: TemplateType) -> Self {
        Self {
            signature: template::signature(template_type),
        }
    }

    /// Template this parser handles
    pub fn template_type(&self) -> TemplateType {
        self.signature.template_type
    }

    /// Column signature this parser validates against
    pub fn signature(&self) -> &'static TemplateSignature {
        self.signature
    }

    /// Columns that must be present for the sheet to parse
    pub fn expected_columns(&self) -> &'static [&'static str] {
        self.signature.required_columns
    }

    /// Validate the input's column signature
    ///
    /// Fails with a [`Error::TemplateFormat`] listing every missing
    /// required column, so the caller sees the full gap at once.
    pub fn validate_columns(&self, table: &TabularData) -> Result<ColumnMapping> {
        let mapping = ColumnMapping::analyze(&table.headers);
        let missing = mapping.missing_columns(self.signature.required_columns);

        if missing.is_empty() {
            Ok(mapping)
        } else {
            Err(Error::template_format(
                self.template_type().display_name(),
                missing,
            ))
        }
    }

    /// Parse a tabular input into normalized rows with statistics
    ///
    /// Separator rows (identifying cells entirely blank) are skipped
    /// silently; malformed rows are logged, recorded in the statistics,
    /// and skipped without aborting the sheet.
    pub fn parse(&self, table: &TabularData) -> Result<ParseResult> {
        let mapping = self.validate_columns(table)?;

        let mut stats = ParseStats::new();
        let mut rows = Vec::new();

        for (index, cells) in table.rows.iter().enumerate() {
            // Header occupies sheet row 1
            let source_row_number = index + 2;
            stats.total_rows += 1;

            if cells.len() > table.headers.len() {
                stats.rows_skipped_invalid += 1;
                stats.errors.push(format!(
                    "row {}: {} cells exceed the {} declared columns",
                    source_row_number,
                    cells.len(),
                    table.headers.len()
                ));
                debug!("Skipped malformed row {}", source_row_number);
                continue;
            }

            if self.is_blank_row(cells, &mapping) {
                stats.rows_skipped_blank += 1;
                debug!(
                    "Skipped row {}: identifying cells are blank",
                    source_row_number
                );
                continue;
            }

            let raw_fields = collect_raw_fields(&table.headers, cells);

            let date = match get_cell(cells, &mapping, columns::DATE) {
                Some(raw_date) => match normalize_date(raw_date) {
                    Some(canonical) => canonical,
                    None => {
                        // Row still participates; an empty date component
                        // routes it to the missing categories instead of
                        // aborting the batch.
                        stats.warnings.push(format!(
                            "row {}: unparseable date '{}'",
                            source_row_number, raw_date
                        ));
                        String::new()
                    }
                },
                None => String::new(),
            };

            let unique_key = self.generate_unique_key(&raw_fields);

            rows.push(NormalizedRow {
                date,
                license_plate: self
                    .signature
                    .plate_column
                    .and_then(|column| get_cell(cells, &mapping, column))
                    .map(|value| value.to_string()),
                route_name: self
                    .signature
                    .route_column
                    .and_then(|column| get_cell(cells, &mapping, column))
                    .map(|value| value.to_string()),
                unique_key,
                raw_fields,
                template_type: self.template_type(),
                source_row_number,
            });
            stats.rows_parsed += 1;
        }

        info!(
            "Parsed {} of {} rows as {} ({} blank, {} invalid)",
            stats.rows_parsed,
            stats.total_rows,
            self.template_type().display_name(),
            stats.rows_skipped_blank,
            stats.rows_skipped_invalid
        );

        Ok(ParseResult { rows, stats })
    }

    /// Derive the join key for one raw row
    ///
    /// Pure function over the row's column-name to value mapping; assumes
    /// the sheet's columns were already validated. Components are
    /// lower-cased and trimmed; an unparseable date contributes an empty
    /// component.
    pub fn generate_unique_key(&self, raw_fields: &BTreeMap<String, String>) -> String {
        let raw_date = field(raw_fields, columns::DATE);
        let date = normalize_date(raw_date).unwrap_or_default();

        match self.template_type() {
            TemplateType::Route => route_key(
                &date,
                field(raw_fields, columns::route::DEPARTURE_TAG),
                field(raw_fields, columns::route::RETURN_TAG),
            ),
            TemplateType::Shift => {
                let tags = split_tags(field(raw_fields, columns::shift::TRIP_TAGS));
                shift_key(&date, &tags)
            }
            TemplateType::PerLeg => per_leg_key(field(raw_fields, columns::per_leg::LEG_TAG)),
        }
    }

    /// Check whether every identifying cell of a row is blank
    ///
    /// Distinguishes "blank separator row" from "genuine trip with missing
    /// data"; the latter keeps its row and surfaces as unmatched instead.
    fn is_blank_row(&self, cells: &[String], mapping: &ColumnMapping) -> bool {
        self.signature
            .identifying_columns
            .iter()
            .all(|column| get_cell(cells, mapping, column).is_none())
    }
}

/// Build the original column-name to cell-value mapping for audit display
fn collect_raw_fields(headers: &[String], cells: &[String]) -> BTreeMap<String, String> {
    let mut raw_fields = BTreeMap::new();
    for (index, header) in headers.iter().enumerate() {
        let value = cells.get(index).cloned().unwrap_or_default();
        raw_fields.entry(header.trim().to_string()).or_insert(value);
    }
    raw_fields
}

fn field<'a>(raw_fields: &'a BTreeMap<String, String>, column: &str) -> &'a str {
    raw_fields.get(column).map(String::as_str).unwrap_or_default()
}
