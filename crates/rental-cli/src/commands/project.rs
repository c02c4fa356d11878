use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rental_core::projection::{self, ProjectionRow};

/// Arguments for rent projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Base monthly rent (year 1)
    #[arg(long)]
    pub monthly_rent: Decimal,

    /// Annual rent growth rate (e.g. 0.03 for 3%)
    #[arg(long, default_value = "0.03", allow_hyphen_values = true)]
    pub growth_rate: Decimal,

    /// Forecast horizon in years
    #[arg(long, default_value = "5")]
    pub years: u32,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<ProjectionRow> =
        projection::project(args.monthly_rent, args.growth_rate, args.years)?.collect();
    Ok(serde_json::to_value(rows)?)
}
