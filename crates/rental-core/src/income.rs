use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalCoreError;
use crate::types::{Money, Rate};
use crate::RentalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Annual operating costs and rent-proportional allowances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingInputs {
    pub annual_taxes: Money,
    pub annual_insurance: Money,
    pub annual_repairs: Money,
    pub annual_utilities: Money,
    pub annual_reserves: Money,
    /// Expected vacancy and collection loss as a fraction of gross rent
    pub vacancy_fraction: Rate,
    /// Property management fee as a fraction of gross rent
    pub management_fraction: Rate,
}

/// Annual income statement before debt service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseResult {
    pub gross_annual_rent: Money,
    pub vacancy_loss: Money,
    pub management_fee: Money,
    /// All operating costs including vacancy and management; excludes
    /// debt service
    pub total_operating_expenses: Money,
    /// May be negative for an undercapitalized deal
    pub net_operating_income: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Net the property's annual income against operating expenses.
///
/// Debt service is deliberately excluded so NOI stays independent of how
/// the purchase is financed.
pub fn compute(unit_rents: &[Money], operating: &OperatingInputs) -> RentalResult<IncomeExpenseResult> {
    validate(unit_rents, operating)?;

    let monthly_rent: Money = unit_rents.iter().copied().sum();
    let gross_annual_rent = monthly_rent * dec!(12);

    let vacancy_loss = gross_annual_rent * operating.vacancy_fraction;
    let management_fee = gross_annual_rent * operating.management_fraction;

    let total_operating_expenses = operating.annual_taxes
        + operating.annual_insurance
        + operating.annual_repairs
        + operating.annual_utilities
        + operating.annual_reserves
        + vacancy_loss
        + management_fee;

    let net_operating_income = gross_annual_rent - total_operating_expenses;

    Ok(IncomeExpenseResult {
        gross_annual_rent,
        vacancy_loss,
        management_fee,
        total_operating_expenses,
        net_operating_income,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(unit_rents: &[Money], operating: &OperatingInputs) -> RentalResult<()> {
    if unit_rents.is_empty() {
        return Err(RentalCoreError::invalid(
            "unit_rents",
            "At least one unit rent is required",
        ));
    }

    for (i, rent) in unit_rents.iter().enumerate() {
        if *rent < Decimal::ZERO {
            return Err(RentalCoreError::InvalidInput {
                field: format!("unit_rents[{i}]"),
                reason: "Unit rent cannot be negative".into(),
            });
        }
    }

    let expenses = [
        ("annual_taxes", operating.annual_taxes),
        ("annual_insurance", operating.annual_insurance),
        ("annual_repairs", operating.annual_repairs),
        ("annual_utilities", operating.annual_utilities),
        ("annual_reserves", operating.annual_reserves),
    ];
    for (field, amount) in expenses {
        if amount < Decimal::ZERO {
            return Err(RentalCoreError::invalid(
                field,
                "Annual expense cannot be negative",
            ));
        }
    }

    let fractions = [
        ("vacancy_fraction", operating.vacancy_fraction),
        ("management_fraction", operating.management_fraction),
    ];
    for (field, fraction) in fractions {
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(RentalCoreError::invalid(
                field,
                "Fraction must be between 0 and 1",
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
