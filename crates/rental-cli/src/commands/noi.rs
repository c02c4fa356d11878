use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rental_core::income::{self, OperatingInputs};

/// Arguments for the annual income statement
#[derive(Args)]
pub struct NoiArgs {
    /// Monthly rent per unit; repeat the flag for multiple units
    #[arg(long = "rent", required = true)]
    pub rents: Vec<Decimal>,

    /// Annual property taxes
    #[arg(long, default_value = "0")]
    pub taxes: Decimal,

    /// Annual insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual repairs allowance
    #[arg(long, default_value = "0")]
    pub repairs: Decimal,

    /// Annual utilities paid by the owner
    #[arg(long, default_value = "0")]
    pub utilities: Decimal,

    /// Annual capital reserves
    #[arg(long, default_value = "0")]
    pub reserves: Decimal,

    /// Vacancy loss as a fraction of gross rent (e.g. 0.05)
    #[arg(long, default_value = "0")]
    pub vacancy: Decimal,

    /// Management fee as a fraction of gross rent (e.g. 0.08)
    #[arg(long, default_value = "0")]
    pub management: Decimal,
}

pub fn run_noi(args: NoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let operating = OperatingInputs {
        annual_taxes: args.taxes,
        annual_insurance: args.insurance,
        annual_repairs: args.repairs,
        annual_utilities: args.utilities,
        annual_reserves: args.reserves,
        vacancy_fraction: args.vacancy,
        management_fraction: args.management,
    };

    let result = income::compute(&args.rents, &operating)?;
    Ok(json!({ "result": result }))
}
