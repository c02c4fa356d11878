mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortize::AmortizeArgs;
use commands::analyze::AnalyzeArgs;
use commands::noi::NoiArgs;
use commands::project::ProjectArgs;

/// Rental property deal analysis
#[derive(Parser)]
#[command(
    name = "rpa",
    version,
    about = "Rental property return analysis",
    long_about = "A CLI for evaluating rental property deals with decimal precision. \
                  Computes loan amortization, net operating income, cash flow, cap rate, \
                  cash-on-cash return, debt coverage, and multi-year rent projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a full deal from a JSON input record
    Analyze(AnalyzeArgs),
    /// Amortize a fixed-rate loan (year-1 split, optional schedule)
    Amortize(AmortizeArgs),
    /// Compute the annual income statement and NOI
    Noi(NoiArgs),
    /// Project rent growth over a multi-year horizon
    Project(ProjectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Amortize(args) => commands::amortize::run_amortize(args),
        Commands::Noi(args) => commands::noi::run_noi(args),
        Commands::Project(args) => commands::project::run_project(args),
        Commands::Version => {
            println!("rpa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
