use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, AmortizationResult};
use crate::error::RentalCoreError;
use crate::income::{self, IncomeExpenseResult, OperatingInputs};
use crate::metrics::{self, ReturnMetrics};
use crate::projection::{self, ProjectionRow};
use crate::types::{with_metadata, ComputationOutput, MetricValue, Money, Rate};
use crate::RentalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Purchase terms for the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInputs {
    pub purchase_price: Money,
    pub closing_costs: Money,
    /// Monthly rent per unit; at least one unit
    pub unit_rents: Vec<Money>,
}

/// Mortgage terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingInputs {
    /// Down payment as a fraction of purchase price (0.25 = 25% down)
    pub down_payment_fraction: Rate,
    pub annual_interest_rate: Rate,
    pub term_years: u32,
}

/// Growth and exit assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitInputs {
    pub appreciation_rate: Rate,
    pub rent_growth_rate: Rate,
    pub marginal_tax_rate: Rate,
    pub holding_years: u32,
    /// Length of the rent forecast; independent of the holding period
    pub projection_horizon_years: u32,
}

/// Complete input record for one deal analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    pub property: PropertyInputs,
    pub financing: FinancingInputs,
    pub operating: OperatingInputs,
    pub exit: ExitInputs,
}

/// Holding-period exit figures: compound appreciation over the full hold
/// plus cumulative year-1 cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitSummary {
    /// purchase_price * (1 + appreciation)^holding_years
    pub projected_property_value: Money,
    pub appreciation_gain: Money,
    /// Year-1 cash flow held flat across the holding period
    pub cumulative_cash_flow: Money,
    pub total_profit: Money,
}

/// Complete deal analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysisOutput {
    pub down_payment: Money,
    pub loan_amount: Money,
    /// Down payment + closing costs
    pub total_investment: Money,
    pub amortization: AmortizationResult,
    pub income: IncomeExpenseResult,
    pub metrics: ReturnMetrics,
    pub projection: Vec<ProjectionRow>,
    pub exit_summary: ExitSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full pipeline: financing split, year-1 amortization, income
/// statement, return metrics, rent forecast, and exit summary.
///
/// Pure and deterministic: identical inputs always produce identical
/// results (or the identical validation error).
pub fn analyze_deal(input: &DealInput) -> RentalResult<ComputationOutput<DealAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let purchase_price = input.property.purchase_price;
    let down_payment = purchase_price * input.financing.down_payment_fraction;
    let loan_amount = purchase_price - down_payment;
    let total_investment = down_payment + input.property.closing_costs;

    let amortization = amortization::amortize(
        loan_amount,
        input.financing.annual_interest_rate,
        input.financing.term_years,
    )?;

    let income = income::compute(&input.property.unit_rents, &input.operating)?;

    let metrics = metrics::compute(
        &income,
        &amortization,
        purchase_price,
        down_payment,
        total_investment,
        &input.exit,
    )?;

    let base_monthly_rent: Money = input.property.unit_rents.iter().copied().sum();
    let projection: Vec<ProjectionRow> = projection::project(
        base_monthly_rent,
        input.exit.rent_growth_rate,
        input.exit.projection_horizon_years,
    )?
    .collect();

    let exit_summary = compute_exit_summary(purchase_price, metrics.cash_flow, &input.exit);

    collect_warnings(&income, &metrics, down_payment, &mut warnings);

    let output = DealAnalysisOutput {
        down_payment,
        loan_amount,
        total_investment,
        amortization,
        income,
        metrics,
        projection,
        exit_summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Return Analysis (Year-1 Basis)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Exit summary
// ---------------------------------------------------------------------------

fn compute_exit_summary(purchase_price: Money, cash_flow: Money, exit: &ExitInputs) -> ExitSummary {
    let growth = (Decimal::ONE + exit.appreciation_rate).powd(Decimal::from(exit.holding_years));
    let projected_property_value = purchase_price * growth;
    let appreciation_gain = projected_property_value - purchase_price;
    let cumulative_cash_flow = cash_flow * Decimal::from(exit.holding_years);

    ExitSummary {
        projected_property_value,
        appreciation_gain,
        cumulative_cash_flow,
        total_profit: appreciation_gain + cumulative_cash_flow,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &DealInput, warnings: &mut Vec<String>) -> RentalResult<()> {
    if input.property.purchase_price <= Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }
    if input.property.closing_costs < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "closing_costs",
            "Closing costs cannot be negative",
        ));
    }

    let f = &input.financing;
    if f.down_payment_fraction < Decimal::ZERO || f.down_payment_fraction > Decimal::ONE {
        return Err(RentalCoreError::invalid(
            "down_payment_fraction",
            "Down payment fraction must be between 0 and 1",
        ));
    }
    if f.annual_interest_rate < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "annual_interest_rate",
            "Interest rate cannot be negative",
        ));
    }
    if f.term_years == 0 {
        return Err(RentalCoreError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }

    let e = &input.exit;
    if e.rent_growth_rate < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "rent_growth_rate",
            "Rent growth rate cannot be negative",
        ));
    }
    if e.holding_years == 0 {
        return Err(RentalCoreError::invalid(
            "holding_years",
            "Holding period must be at least 1 year",
        ));
    }
    if e.projection_horizon_years == 0 {
        return Err(RentalCoreError::invalid(
            "projection_horizon_years",
            "Projection horizon must be at least 1 year",
        ));
    }

    if input.operating.vacancy_fraction > dec!(0.15) {
        warnings.push(format!(
            "Vacancy of {:.1}% is above typical market norms",
            input.operating.vacancy_fraction * dec!(100)
        ));
    }

    Ok(())
}

fn collect_warnings(
    income: &IncomeExpenseResult,
    metrics: &ReturnMetrics,
    down_payment: Money,
    warnings: &mut Vec<String>,
) {
    if income.net_operating_income < Decimal::ZERO {
        warnings.push(
            "Negative NOI: operating expenses exceed gross rent before debt service".into(),
        );
    }

    if let MetricValue::Defined(dcr) = metrics.debt_coverage_ratio {
        if dcr < dec!(1.2) {
            warnings.push(format!(
                "DCR of {dcr:.2} is below 1.20x — lender covenant risk"
            ));
        }
    }

    if down_payment.is_zero() {
        warnings.push(
            "100% financing: cash-on-cash return and total ROI are undefined".into(),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_deal() -> DealInput {
        DealInput {
            property: PropertyInputs {
                purchase_price: dec!(250000),
                closing_costs: Decimal::ZERO,
                unit_rents: vec![dec!(2200)],
            },
            financing: FinancingInputs {
                down_payment_fraction: dec!(0.25),
                annual_interest_rate: dec!(0.065),
                term_years: 30,
            },
            operating: OperatingInputs {
                annual_taxes: dec!(6000),
                annual_insurance: dec!(1200),
                annual_repairs: dec!(2640),
                annual_utilities: Decimal::ZERO,
                annual_reserves: Decimal::ZERO,
                vacancy_fraction: dec!(0.05),
                management_fraction: dec!(0.08),
            },
            exit: ExitInputs {
                appreciation_rate: dec!(0.03),
                rent_growth_rate: dec!(0.03),
                marginal_tax_rate: dec!(0.25),
                holding_years: 5,
                projection_horizon_years: 5,
            },
        }
    }

    #[test]
    fn test_financing_split() {
        let result = analyze_deal(&sample_deal()).unwrap();
        let out = &result.result;

        assert_eq!(out.down_payment, dec!(62500.00));
        assert_eq!(out.loan_amount, dec!(187500.00));
        assert_eq!(out.total_investment, dec!(62500.00));
    }

    #[test]
    fn test_exit_summary_compound_appreciation() {
        let result = analyze_deal(&sample_deal()).unwrap();
        let exit = &result.result.exit_summary;

        // 250000 * 1.03^5 = 289818.52...
        assert!((exit.projected_property_value - dec!(289818.52)).abs() < dec!(0.01));
        assert_eq!(
            exit.appreciation_gain,
            exit.projected_property_value - dec!(250000)
        );
        assert_eq!(
            exit.total_profit,
            exit.appreciation_gain + exit.cumulative_cash_flow
        );
    }

    #[test]
    fn test_projection_uses_combined_rent() {
        let mut input = sample_deal();
        input.property.unit_rents = vec![dec!(1100), dec!(1100)];
        let result = analyze_deal(&input).unwrap();
        let rows = &result.result.projection;

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].projected_monthly_rent, dec!(2200));
    }

    #[test]
    fn test_thin_deal_dcr_warning() {
        // The sample deal is thin: DCR below 1.2 triggers a warning
        let result = analyze_deal(&sample_deal()).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("DCR")));
    }

    #[test]
    fn test_high_vacancy_warning() {
        let mut input = sample_deal();
        input.operating.vacancy_fraction = dec!(0.20);
        let result = analyze_deal(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Vacancy")));
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut input = sample_deal();
        input.property.purchase_price = Decimal::ZERO;
        let result = analyze_deal(&input);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "purchase_price"
        ));
    }

    #[test]
    fn test_down_payment_fraction_above_one_rejected() {
        let mut input = sample_deal();
        input.financing.down_payment_fraction = dec!(1.25);
        let result = analyze_deal(&input);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "down_payment_fraction"
        ));
    }

    #[test]
    fn test_methodology_string() {
        let result = analyze_deal(&sample_deal()).unwrap();
        assert_eq!(
            result.methodology,
            "Rental Property Return Analysis (Year-1 Basis)"
        );
    }
}
