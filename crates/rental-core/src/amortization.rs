use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalCoreError;
use crate::types::{Money, Rate};
use crate::RentalResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Year-1 summary of a fixed-rate, level-payment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Fixed monthly payment from the annuity formula
    pub monthly_payment: Money,
    /// Principal retired during the first `periods_applied` months
    pub year1_principal_paid: Money,
    /// Interest paid during the first `periods_applied` months
    pub year1_interest_paid: Money,
    /// Months actually simulated (fewer than 12 only on early payoff)
    pub periods_applied: u32,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// 1-based month number
    pub period: u32,
    /// Payment applied this month (final payment may be smaller)
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance outstanding after this payment
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment: P * r / (1 - (1+r)^-n) with r = annual_rate/12.
///
/// Short-circuits before the formula for the two degenerate cases: a zero
/// principal pays zero, and a zero rate amortizes straight-line.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> RentalResult<Money> {
    validate(principal, annual_rate, term_years)?;

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let total_months = term_years * MONTHS_PER_YEAR;
    let monthly_rate = annual_rate / dec!(12);

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    Ok(principal * monthly_rate * compound / (compound - Decimal::ONE))
}

/// Simulate the first year of the loan and split payments into principal
/// and interest.
///
/// The running balance never goes negative: if the loan pays off inside the
/// year, the final principal component is capped at the remaining balance
/// and the simulation stops, reporting only the periods actually applied.
pub fn amortize(principal: Money, annual_rate: Rate, term_years: u32) -> RentalResult<AmortizationResult> {
    let payment = monthly_payment(principal, annual_rate, term_years)?;
    let monthly_rate = annual_rate / dec!(12);

    let mut balance = principal;
    let mut principal_paid = Decimal::ZERO;
    let mut interest_paid = Decimal::ZERO;
    let mut periods_applied = 0u32;

    for _ in 0..MONTHS_PER_YEAR {
        if balance.is_zero() {
            break;
        }
        let interest = balance * monthly_rate;
        let mut principal_component = payment - interest;
        if principal_component > balance {
            principal_component = balance;
        }
        balance -= principal_component;
        principal_paid += principal_component;
        interest_paid += interest;
        periods_applied += 1;
    }

    Ok(AmortizationResult {
        monthly_payment: payment,
        year1_principal_paid: principal_paid,
        year1_interest_paid: interest_paid,
        periods_applied,
    })
}

/// Full amortization schedule, optionally truncated to the first `limit`
/// periods. Stops early if the balance reaches zero.
pub fn schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    limit: Option<usize>,
) -> RentalResult<Vec<AmortizationPeriod>> {
    let payment = monthly_payment(principal, annual_rate, term_years)?;
    let monthly_rate = annual_rate / dec!(12);

    let total_months = (term_years * MONTHS_PER_YEAR) as usize;
    let months = limit.map_or(total_months, |l| l.min(total_months));

    let mut rows = Vec::with_capacity(months);
    let mut balance = principal;

    for period in 1..=months as u32 {
        if balance.is_zero() {
            break;
        }
        let interest = balance * monthly_rate;
        let mut principal_component = payment - interest;
        if principal_component > balance {
            principal_component = balance;
        }
        balance -= principal_component;
        rows.push(AmortizationPeriod {
            period,
            payment: principal_component + interest,
            interest,
            principal: principal_component,
            balance,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(principal: Money, annual_rate: Rate, term_years: u32) -> RentalResult<()> {
    if principal < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "principal",
            "Loan principal cannot be negative",
        ));
    }
    if annual_rate < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "annual_rate",
            "Interest rate cannot be negative",
        ));
    }
    if term_years == 0 {
        return Err(RentalCoreError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_standard_mortgage() {
        // $187.5k at 6.5% over 30 years: ~$1,185/mo
        let payment = monthly_payment(dec!(187500), dec!(0.065), 30).unwrap();
        assert!(
            payment > dec!(1185) && payment < dec!(1186),
            "Monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, 30).unwrap();
        // $360k / 360 months = $1000/mo exactly
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_principal_short_circuits() {
        let payment = monthly_payment(Decimal::ZERO, dec!(0.065), 30).unwrap();
        assert_eq!(payment, Decimal::ZERO);

        let result = amortize(Decimal::ZERO, dec!(0.065), 30).unwrap();
        assert_eq!(result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.year1_principal_paid, Decimal::ZERO);
        assert_eq!(result.year1_interest_paid, Decimal::ZERO);
        assert_eq!(result.periods_applied, 0);
    }

    #[test]
    fn test_year1_conservation() {
        // principal + interest over year 1 equals 12 x payment exactly:
        // every period splits the payment without remainder
        let result = amortize(dec!(187500), dec!(0.065), 30).unwrap();
        assert_eq!(result.periods_applied, 12);
        assert_eq!(
            result.year1_principal_paid + result.year1_interest_paid,
            result.monthly_payment * dec!(12)
        );
    }

    #[test]
    fn test_year1_mostly_interest_early_on() {
        let result = amortize(dec!(187500), dec!(0.065), 30).unwrap();
        assert!(result.year1_interest_paid > result.year1_principal_paid);
    }

    #[test]
    fn test_one_year_loan_pays_off_within_year1() {
        let result = amortize(dec!(12000), dec!(0.12), 1).unwrap();
        assert_eq!(result.periods_applied, 12);
        // All principal retired (up to decimal dust in the final period)
        assert!((result.year1_principal_paid - dec!(12000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_full_length() {
        let rows = schedule(dec!(187500), dec!(0.065), 30, None).unwrap();
        assert_eq!(rows.len(), 360);
        assert_eq!(rows[0].period, 1);
        // Principal share grows as the balance declines
        assert!(rows[359].principal > rows[0].principal);
        assert!(rows[359].balance < dec!(0.01));
    }

    #[test]
    fn test_schedule_partial() {
        let rows = schedule(dec!(187500), dec!(0.065), 30, Some(24)).unwrap();
        assert_eq!(rows.len(), 24);
    }

    #[test]
    fn test_schedule_balance_monotonically_decreases() {
        let rows = schedule(dec!(100000), dec!(0.05), 15, Some(60)).unwrap();
        for pair in rows.windows(2) {
            assert!(pair[1].balance < pair[0].balance);
        }
    }

    #[test]
    fn test_negative_principal_rejected() {
        let result = monthly_payment(dec!(-1), dec!(0.05), 30);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "principal"
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = amortize(dec!(100000), dec!(-0.01), 30);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "annual_rate"
        ));
    }

    #[test]
    fn test_zero_term_rejected() {
        let result = amortize(dec!(100000), dec!(0.05), 0);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "term_years"
        ));
    }
}
