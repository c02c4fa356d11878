use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationResult;
use crate::deal::ExitInputs;
use crate::error::RentalCoreError;
use crate::income::IncomeExpenseResult;
use crate::types::{MetricValue, Money};
use crate::RentalResult;

/// Share of the purchase price attributed to the building (land does not
/// depreciate). Fixed policy constant, not user-configurable.
pub const BUILDING_VALUE_RATIO: Decimal = dec!(0.85);

/// Straight-line residential depreciation life in years.
pub const DEPRECIATION_LIFE_YEARS: Decimal = dec!(27.5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Year-1 return metrics for a financed rental purchase.
///
/// Ratio metrics use `MetricValue` so a zero denominator reads as
/// `Undefined` for that field alone; the rest of the metrics still compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// 12 x monthly payment
    pub annual_debt_service: Money,
    /// NOI minus debt service
    pub cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// NOI / purchase price, as a percentage
    pub cap_rate: MetricValue,
    /// Cash flow / down payment, as a percentage
    pub cash_on_cash_return: MetricValue,
    /// NOI / annual debt service
    pub debt_coverage_ratio: MetricValue,
    /// Annual straight-line depreciation on the building value
    pub depreciation_expense: Money,
    pub tax_savings: Money,
    /// Single-year appreciation in absolute currency
    pub equity_gain: Money,
    /// Cash flow + tax savings + year-1 principal paydown + appreciation
    pub total_return: Money,
    /// Total return / (down payment + closing costs), as a percentage
    pub total_roi: MetricValue,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the blended return metrics from already-computed income and
/// amortization results.
pub fn compute(
    income: &IncomeExpenseResult,
    amortization: &AmortizationResult,
    purchase_price: Money,
    down_payment: Money,
    total_investment: Money,
    exit: &ExitInputs,
) -> RentalResult<ReturnMetrics> {
    validate(exit)?;

    let noi = income.net_operating_income;
    let annual_debt_service = amortization.monthly_payment * dec!(12);
    let cash_flow = noi - annual_debt_service;
    let monthly_cash_flow = cash_flow / dec!(12);

    let cap_rate = MetricValue::percentage(noi, purchase_price);
    let cash_on_cash_return = MetricValue::percentage(cash_flow, down_payment);
    let debt_coverage_ratio = MetricValue::ratio(noi, annual_debt_service);

    let depreciation_expense = purchase_price * BUILDING_VALUE_RATIO / DEPRECIATION_LIFE_YEARS;
    let tax_savings = depreciation_expense * exit.marginal_tax_rate;

    let equity_gain = purchase_price * exit.appreciation_rate;
    let total_return = cash_flow + tax_savings + amortization.year1_principal_paid + equity_gain;
    let total_roi = MetricValue::percentage(total_return, total_investment);

    Ok(ReturnMetrics {
        annual_debt_service,
        cash_flow,
        monthly_cash_flow,
        cap_rate,
        cash_on_cash_return,
        debt_coverage_ratio,
        depreciation_expense,
        tax_savings,
        equity_gain,
        total_return,
        total_roi,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(exit: &ExitInputs) -> RentalResult<()> {
    if exit.marginal_tax_rate < Decimal::ZERO || exit.marginal_tax_rate > Decimal::ONE {
        return Err(RentalCoreError::invalid(
            "marginal_tax_rate",
            "Tax rate must be between 0 and 1",
        ));
    }
    if exit.appreciation_rate < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "appreciation_rate",
            "Appreciation rate cannot be negative",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
