use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rental_core::amortization;

/// Arguments for loan amortization
#[derive(Args)]
pub struct AmortizeArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate (e.g. 0.065 for 6.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term_years: u32,

    /// Include the payment schedule, truncated to this many periods
    #[arg(long, conflicts_with = "full_schedule")]
    pub schedule_periods: Option<usize>,

    /// Include the full payment schedule
    #[arg(long)]
    pub full_schedule: bool,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary = amortization::amortize(args.principal, args.rate, args.term_years)?;
    let mut value = json!({ "result": summary });

    if args.full_schedule || args.schedule_periods.is_some() {
        let schedule =
            amortization::schedule(args.principal, args.rate, args.term_years, args.schedule_periods)?;
        value["schedule"] = serde_json::to_value(schedule)?;
    }

    Ok(value)
}
