use clap::Parser;
use std::process;
use trip_reconciler::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Trip Reconciler - Partner Settlement Checker");
    println!("============================================");
    println!();
    println!("Reconcile trip records reported by a transport partner's spreadsheet");
    println!("against the operator's authoritative trip database before settlement.");
    println!();
    println!("USAGE:");
    println!("    trip-reconciler <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    reconcile   Reconcile a partner sheet against the trip database (main command)");
    println!("    templates   List the known partner templates and their column signatures");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Reconcile a partner sheet with template auto-detection:");
    println!("    trip-reconciler reconcile --file partner.csv --records trips.json \\");
    println!("                              --from 2026-01-01 --to 2026-01-31");
    println!();
    println!("    # Force a template and write the full result as JSON:");
    println!("    trip-reconciler reconcile --file partner.csv --records trips.json \\");
    println!("                              --from 2026-01-01 --to 2026-01-31 \\");
    println!("                              --template shift --output result.json");
    println!();
    println!("    # List the known templates:");
    println!("    trip-reconciler templates --detailed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    trip-reconciler <COMMAND> --help");
}
