//! Run configuration for the reconcile command
//!
//! Bridges raw CLI arguments into a validated configuration the command
//! logic can trust: parsed dates, a checked date range, and normalized
//! optional filters.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::app::models::{DateRange, TemplateType};
use crate::cli::args::{OutputFormat, ReconcileArgs};
use crate::constants::CANONICAL_DATE_FORMAT;
use crate::{Error, Result};

/// Validated configuration for one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Partner spreadsheet to reconcile
    pub sheet_path: PathBuf,

    /// Authoritative trip export to reconcile against
    pub records_path: PathBuf,

    /// Explicit template selection; `None` means auto-detect
    pub template: Option<TemplateType>,

    /// Reporting period, echoed into result metadata
    pub date_range: DateRange,

    /// Optional customer filter applied when loading records
    pub customer: Option<String>,

    /// Optional path for a JSON dump of the comparison result
    pub output_path: Option<PathBuf>,

    /// Console output format
    pub format: OutputFormat,
}

impl ReconcileConfig {
    /// Build and validate a configuration from CLI arguments
    pub fn from_args(args: &ReconcileArgs) -> Result<Self> {
        let from = parse_date(&args.from, "--from")?;
        let to = parse_date(&args.to, "--to")?;

        let template = args
            .template
            .as_deref()
            .map(str::parse::<TemplateType>)
            .transpose()?;

        let customer = args
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let config = Self {
            sheet_path: args.sheet_path.clone(),
            records_path: args.records_path.clone(),
            template,
            date_range: DateRange::new(from, to),
            customer,
            output_path: args.output_path.clone(),
            format: args.format,
        };
        config.validate()?;

        if !config.sheet_path.exists() {
            return Err(Error::configuration(format!(
                "partner sheet not found: {}",
                config.sheet_path.display()
            )));
        }
        if !config.records_path.exists() {
            return Err(Error::configuration(format!(
                "trip export not found: {}",
                config.records_path.display()
            )));
        }

        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.date_range.from > self.date_range.to {
            return Err(Error::configuration(format!(
                "date range start {} is after end {}",
                self.date_range.from, self.date_range.to
            )));
        }
        Ok(())
    }
}

fn parse_date(raw: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), CANONICAL_DATE_FORMAT).map_err(|error| {
        Error::datetime_parsing(format!("{flag} expects YYYY-MM-DD, got '{raw}'"), error)
    })
}
