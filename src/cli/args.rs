//! Command-line argument definitions for the trip reconciler
//!
//! This module defines the complete CLI interface using the clap derive
//! API.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the trip reconciler
///
/// Reconciles trip records reported by a transport partner's spreadsheet
/// against the operator's authoritative trip database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trip-reconciler",
    version,
    about = "Reconcile partner trip spreadsheets against the operator trip database",
    long_about = "Reconciles trip records that a transport partner reports in its own \
                  spreadsheet format against the operator's authoritative trip database, \
                  classifying every record as matched, matched-with-differences, or missing \
                  on one side. Discrepancies are scored by severity so they can be caught \
                  before invoice settlement."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the trip reconciler
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Reconcile a partner sheet against the trip database (main command)
    Reconcile(ReconcileArgs),
    /// List the known partner templates and their column signatures
    Templates(TemplatesArgs),
}

/// Arguments for the reconcile command
#[derive(Debug, Clone, Parser)]
pub struct ReconcileArgs {
    /// Partner spreadsheet to reconcile (CSV export)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "Partner spreadsheet to reconcile (CSV export)"
    )]
    pub sheet_path: PathBuf,

    /// Authoritative trip export to reconcile against (JSON)
    #[arg(
        short = 'r',
        long = "records",
        value_name = "PATH",
        help = "Authoritative trip export to reconcile against (JSON)"
    )]
    pub records_path: PathBuf,

    /// Partner template name (route, shift, per_leg)
    ///
    /// When omitted, the template is auto-detected from the sheet's column
    /// signature; detection requires an exact signature match.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Partner template name (route, shift, per_leg); auto-detected when omitted"
    )]
    pub template: Option<String>,

    /// Start of the reporting period (YYYY-MM-DD, inclusive)
    #[arg(long = "from", value_name = "DATE", help = "Start of the reporting period (YYYY-MM-DD)")]
    pub from: String,

    /// End of the reporting period (YYYY-MM-DD, inclusive)
    #[arg(long = "to", value_name = "DATE", help = "End of the reporting period (YYYY-MM-DD)")]
    pub to: String,

    /// Only reconcile trips for this customer
    #[arg(
        short = 'c',
        long = "customer",
        value_name = "NAME",
        help = "Only reconcile trips for this customer"
    )]
    pub customer: Option<String>,

    /// Write the full comparison result as JSON to this path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Write the full comparison result as JSON to this path"
    )]
    pub output_path: Option<PathBuf>,

    /// Console output format
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Console output format"
    )]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the templates command
#[derive(Debug, Clone, Parser)]
pub struct TemplatesArgs {
    /// Show identifying and plate columns in addition to the signature
    #[arg(long = "detailed", help = "Show identifying and plate columns too")]
    pub detailed: bool,
}

/// Console output format for the reconcile command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with colored sections
    Text,
    /// The full comparison result as pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        f.write_str(label)
    }
}
