//! Means-tested deduction: taper on income above the disregard

use super::allowance::AllowanceResult;
use super::check_rows;
use crate::benefit_unit::BenefitUnit;
use crate::error::Result;
use crate::parameters::ParameterSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeductionResult {
    pub disregard: f64,
    /// Taper applied to income above the disregard, floored at zero
    pub full_deduction: f64,
    /// Full deduction bounded by the full allowance
    pub capped_deduction: f64,
}

pub fn deduction_for(
    post_tax_hh_income: f64,
    params: &ParameterSet,
    allowance: &AllowanceResult,
    disregard: f64,
) -> DeductionResult {
    let full_deduction = ((post_tax_hh_income - disregard) * params.taper).max(0.0);
    let capped_deduction = full_deduction.min(allowance.full_allowance);

    DeductionResult {
        disregard,
        full_deduction,
        capped_deduction,
    }
}

/// Deductions for every unit, in input order
pub fn compute_deductions(
    units: &[BenefitUnit],
    params: &ParameterSet,
    allowances: &[AllowanceResult],
    disregard: &[f64],
) -> Result<Vec<DeductionResult>> {
    check_rows("deduction", units.len(), allowances.len())?;
    check_rows("deduction", units.len(), disregard.len())?;

    Ok(units
        .iter()
        .zip(allowances)
        .zip(disregard)
        .map(|((unit, allowance), &d)| deduction_for(unit.post_tax_hh_income, params, allowance, d))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::PolicyYear;

    fn allowance(full_allowance: f64) -> AllowanceResult {
        AllowanceResult {
            standard_allowance: full_allowance,
            child_element: 0.0,
            childcare_element: 0.0,
            housing_element: 0.0,
            full_allowance,
        }
    }

    #[test]
    fn test_no_income() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = deduction_for(0.0, &p, &allowance(900.0), 404.0);
        assert_eq!(d.full_deduction, 0.0);
        assert_eq!(d.capped_deduction, 0.0);
        assert_eq!(d.disregard, 404.0);
    }

    #[test]
    fn test_income_below_disregard() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = deduction_for(300.0, &p, &allowance(900.0), 404.0);
        assert_eq!(d.full_deduction, 0.0);
    }

    #[test]
    fn test_taper_above_disregard() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = deduction_for(1_404.0, &p, &allowance(900.0), 404.0);
        approx::assert_relative_eq!(d.full_deduction, 550.0, epsilon = 1e-9);
        assert_eq!(d.capped_deduction, d.full_deduction);
    }

    #[test]
    fn test_high_income_capped_at_allowance() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = deduction_for(1e10, &p, &allowance(1_234.5), 0.0);
        assert!(d.full_deduction > 1_234.5);
        assert_eq!(d.capped_deduction, 1_234.5);
    }

    #[test]
    fn test_weakly_increasing_in_income() {
        let p = PolicyYear::Y2024_25.parameters();
        let a = allowance(1_500.0);
        let mut previous = deduction_for(0.0, &p, &a, 404.0);
        for step in 1..400 {
            let next = deduction_for(step as f64 * 10.0, &p, &a, 404.0);
            assert!(next.full_deduction >= previous.full_deduction);
            assert!(next.capped_deduction >= previous.capped_deduction);
            previous = next;
        }
    }
}
