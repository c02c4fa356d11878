use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalCoreError;
use crate::types::{Money, Rate};
use crate::RentalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One year of the rent forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// 1-based forecast year
    pub year: u32,
    pub projected_monthly_rent: Money,
    pub projected_annual_rent: Money,
}

/// Lazy compound-growth rent forecast over a fixed horizon.
///
/// Each row depends only on its year index, so the sequence is restartable
/// (clone it) and rows can be computed out of order via [`RentProjection::row`].
#[derive(Debug, Clone)]
pub struct RentProjection {
    base_monthly_rent: Money,
    growth_rate: Rate,
    horizon_years: u32,
    next_year: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a rent forecast: year 1 is the base rent, each later year grows
/// by `growth_rate` compounded.
pub fn project(
    base_monthly_rent: Money,
    growth_rate: Rate,
    horizon_years: u32,
) -> RentalResult<RentProjection> {
    if base_monthly_rent < Decimal::ZERO {
        return Err(RentalCoreError::invalid(
            "base_monthly_rent",
            "Base rent cannot be negative",
        ));
    }
    if growth_rate <= dec!(-1) {
        return Err(RentalCoreError::invalid(
            "growth_rate",
            "Growth rate must be greater than -100%",
        ));
    }
    if horizon_years == 0 {
        return Err(RentalCoreError::invalid(
            "horizon_years",
            "Projection horizon must be at least 1 year",
        ));
    }

    Ok(RentProjection {
        base_monthly_rent,
        growth_rate,
        horizon_years,
        next_year: 1,
    })
}

impl RentProjection {
    /// Compute a single row directly. Returns `None` outside `1..=horizon`.
    pub fn row(&self, year: u32) -> Option<ProjectionRow> {
        if year == 0 || year > self.horizon_years {
            return None;
        }
        // base * (1 + g)^(year - 1); exponent 0 keeps year 1 exact
        let factor = (Decimal::ONE + self.growth_rate).powd(Decimal::from(year - 1));
        let projected_monthly_rent = self.base_monthly_rent * factor;
        Some(ProjectionRow {
            year,
            projected_monthly_rent,
            projected_annual_rent: projected_monthly_rent * dec!(12),
        })
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }
}

impl Iterator for RentProjection {
    type Item = ProjectionRow;

    fn next(&mut self) -> Option<ProjectionRow> {
        let row = self.row(self.next_year)?;
        self.next_year += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_year > self.horizon_years {
            0
        } else {
            (self.horizon_years - self.next_year + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RentProjection {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sequence_length_matches_horizon() {
        let rows: Vec<ProjectionRow> = project(dec!(2200), dec!(0.03), 5).unwrap().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[4].year, 5);
    }

    #[test]
    fn test_year_one_is_base_rent_exactly() {
        let projection = project(dec!(2200), dec!(0.177), 3).unwrap();
        let first = projection.row(1).unwrap();
        assert_eq!(first.projected_monthly_rent, dec!(2200));
        assert_eq!(first.projected_annual_rent, dec!(26400));
    }

    #[test]
    fn test_compound_growth_year_ten() {
        // 3600 * 1.03^9 = 4697.18...
        let projection = project(dec!(3600), dec!(0.03), 10).unwrap();
        let row = projection.row(10).unwrap();
        assert!((row.projected_monthly_rent - dec!(4697.18)).abs() < dec!(0.01));
        assert_eq!(row.projected_annual_rent, row.projected_monthly_rent * dec!(12));
    }

    #[test]
    fn test_restartable_by_clone() {
        let projection = project(dec!(2000), dec!(0.02), 4).unwrap();
        let first_pass: Vec<ProjectionRow> = projection.clone().collect();
        let second_pass: Vec<ProjectionRow> = projection.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_rows_independent_of_iteration_order() {
        let projection = project(dec!(2000), dec!(0.05), 6).unwrap();
        let direct = projection.row(4).unwrap();
        let iterated = projection.clone().nth(3).unwrap();
        assert_eq!(direct, iterated);
    }

    #[test]
    fn test_out_of_range_rows() {
        let projection = project(dec!(2000), dec!(0.05), 6).unwrap();
        assert!(projection.row(0).is_none());
        assert!(projection.row(7).is_none());
    }

    #[test]
    fn test_exact_size_iterator() {
        let mut projection = project(dec!(2000), dec!(0.05), 6).unwrap();
        assert_eq!(projection.len(), 6);
        projection.next();
        assert_eq!(projection.len(), 5);
    }

    #[test]
    fn test_declining_rent_allowed() {
        let rows: Vec<ProjectionRow> = project(dec!(1000), dec!(-0.10), 3).unwrap().collect();
        assert_eq!(rows[1].projected_monthly_rent, dec!(900.0));
        assert!(rows[2].projected_monthly_rent < rows[1].projected_monthly_rent);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = project(dec!(2200), dec!(0.03), 0);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "horizon_years"
        ));
    }

    #[test]
    fn test_growth_below_negative_one_rejected() {
        let result = project(dec!(2200), dec!(-1.5), 5);
        assert!(matches!(
            result,
            Err(RentalCoreError::InvalidInput { ref field, .. }) if field == "growth_rate"
        ));
    }
}
