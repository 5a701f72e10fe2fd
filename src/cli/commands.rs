//! Command implementations for the trip reconciler CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and console rendering for the CLI interface.

use std::fs;
use std::time::Instant;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::app::adapters::{spreadsheet, trip_store};
use crate::app::models::{ComparisonResult, Severity};
use crate::app::services::comparison_engine::ComparisonEngine;
use crate::app::services::template_parser::ParseStats;
use crate::app::services::template_registry::TemplateRegistry;
use crate::cli::args::{Args, Commands, OutputFormat, ReconcileArgs, TemplatesArgs};
use crate::config::ReconcileConfig;
use crate::{Error, Result};

/// Main command runner for the trip reconciler
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Reconcile(reconcile_args)) => run_reconcile(&reconcile_args),
        Some(Commands::Templates(templates_args)) => run_templates(&templates_args),
        // main() shows help before dispatching when no subcommand was given
        None => Ok(()),
    }
}

/// Execute the reconcile command end to end
fn run_reconcile(args: &ReconcileArgs) -> Result<()> {
    init_logging(args.verbose);
    let config = ReconcileConfig::from_args(args)?;
    let started = Instant::now();

    let spinner = create_spinner("Loading partner sheet");
    let table = spreadsheet::load_tabular(&config.sheet_path)?;
    spinner.finish_with_message(format!("Loaded {} data rows", table.row_count()));

    let registry = TemplateRegistry::with_defaults();
    let parser = match config.template {
        Some(template_type) => registry.get(template_type.as_str())?,
        None => {
            let parser = registry.auto_detect(&table)?;
            info!(
                "Auto-detected template '{}'",
                parser.template_type().display_name()
            );
            parser
        }
    };

    let parse_result = parser.parse(&table)?;
    report_parse_anomalies(&parse_result.stats);

    let records = trip_store::load_records(
        &config.records_path,
        &config.date_range,
        config.customer.as_deref(),
    )?;

    let spinner = create_spinner("Comparing");
    let engine = ComparisonEngine::new();
    let result = engine.compare(&parse_result.rows, &records, &config.date_range)?;
    spinner.finish_with_message(format!(
        "Compared {} rows against {} trips",
        result.summary.total_partner_rows, result.summary.total_authoritative_records
    ));

    if let Some(output_path) = &config.output_path {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(output_path, json).map_err(|error| {
            Error::io(format!("failed to write {}", output_path.display()), error)
        })?;
        info!("Wrote comparison result to {}", output_path.display());
    }

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => render_text_report(&result),
    }

    info!("Done in {}", HumanDuration(started.elapsed()));
    Ok(())
}

/// Execute the templates command
fn run_templates(args: &TemplatesArgs) -> Result<()> {
    let registry = TemplateRegistry::with_defaults();

    println!("{}", "Known partner templates".bold());
    for parser in registry.parsers() {
        let signature = parser.signature();
        println!();
        println!(
            "  {} ({})",
            signature.template_type.display_name().bold(),
            signature.template_type
        );
        println!("    columns: {}", signature.required_columns.join(", "));
        if args.detailed {
            println!(
                "    identifying: {}",
                signature.identifying_columns.join(", ")
            );
            if let Some(plate_column) = signature.plate_column {
                println!("    plate: {plate_column}");
            }
        }
    }

    Ok(())
}

/// Install the global tracing subscriber based on verbosity
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    // try_init so tests invoking commands repeatedly don't panic
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Create a spinner for a processing step
fn create_spinner(operation: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("spinner template is valid"),
    );
    spinner.set_message(operation.to_string());
    spinner
}

/// Surface row-level parse anomalies without failing the run
fn report_parse_anomalies(stats: &ParseStats) {
    for warning in &stats.warnings {
        warn!("{}", warning);
    }
    for error in &stats.errors {
        warn!("{}", error);
    }
    if stats.rows_skipped_invalid > 0 {
        eprintln!(
            "{}",
            format!(
                "{} malformed rows were skipped; totals may be lower than the sheet suggests",
                stats.rows_skipped_invalid
            )
            .yellow()
        );
    }
}

/// Render the human-readable comparison report
fn render_text_report(result: &ComparisonResult) {
    let summary = &result.summary;
    let metadata = &result.metadata;

    println!();
    println!("{}", "Reconciliation Summary".bold());
    println!(
        "  Template:       {}",
        metadata.template_type.display_name()
    );
    println!(
        "  Period:         {} to {}",
        metadata.date_range.from, metadata.date_range.to
    );
    println!("  Partner rows:   {}", summary.total_partner_rows);
    println!(
        "  System trips:   {}",
        summary.total_authoritative_records
    );
    println!(
        "  Matched:        {}",
        summary.matched_count.to_string().green()
    );
    println!(
        "  Mismatched:     {}",
        summary.mismatched_count.to_string().yellow()
    );
    println!(
        "  Partner only:   {}",
        summary.missing_in_system_count.to_string().red()
    );
    println!(
        "  System only:    {}",
        summary.missing_in_partner_count.to_string().red()
    );
    println!("  Match rate:     {:.2}%", summary.match_rate);

    if !result.mismatched.is_empty() {
        println!();
        println!("{}", "Mismatched trips".bold());
        for entry in &result.mismatched {
            println!(
                "  row {} -> {} [{}]",
                entry.row.source_row_number,
                entry.order_id,
                severity_label(entry.severity)
            );
            for difference in &entry.differences {
                println!(
                    "    {}: partner '{}' vs system '{}'{}",
                    difference.field,
                    difference.partner_value.as_deref().unwrap_or("-"),
                    difference.authoritative_value.as_deref().unwrap_or("-"),
                    difference
                        .message
                        .as_deref()
                        .map(|message| format!(" ({message})"))
                        .unwrap_or_default()
                );
            }
        }
    }

    if !result.missing_in_system.is_empty() {
        println!();
        println!("{}", "In partner file but not in system".bold());
        for entry in &result.missing_in_system {
            println!(
                "  row {}: searched key '{}' ({})",
                entry.row.source_row_number, entry.searched_key, entry.reason
            );
        }
    }

    if !result.missing_in_partner.is_empty() {
        println!();
        println!("{}", "In system but not in partner file".bold());
        for entry in &result.missing_in_partner {
            println!(
                "  {} on {} ({}): expected key '{}'",
                entry.order_id, entry.date, entry.route_name, entry.expected_key
            );
        }
    }

    if !result.integrity_warnings.is_empty() {
        println!();
        println!("{}", "Data integrity warnings".bold().yellow());
        for warning in &result.integrity_warnings {
            println!("  {}: {}", warning.order_id, warning.message);
        }
    }
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => "critical".red().to_string(),
        Severity::Warning => "warning".yellow().to_string(),
        Severity::Info => "info".normal().to_string(),
    }
}
