use clap::Args;
use serde_json::Value;

use rental_core::deal::{self, DealInput};

use crate::input;

/// Arguments for full deal analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file with property, financing, operating, and
    /// exit sections
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input: DealInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for deal analysis".into());
    };
    let result = deal::analyze_deal(&deal_input)?;
    Ok(serde_json::to_value(result)?)
}
