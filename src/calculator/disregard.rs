//! Earned-income disregard (work allowance)

use super::allowance::AllowanceResult;
use super::check_rows;
use crate::benefit_unit::BenefitUnit;
use crate::error::{CalcError, Result};
use crate::parameters::ParameterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisregardCase {
    NoChildren,
    ChildrenNoHousing,
    ChildrenWithHousing,
}

impl DisregardCase {
    /// Classify from the child count and the computed housing element.
    /// A negative or NaN housing element matches no case.
    pub fn classify(num_kids: u32, housing_element: f64) -> Option<Self> {
        if num_kids == 0 {
            Some(DisregardCase::NoChildren)
        } else if housing_element == 0.0 {
            Some(DisregardCase::ChildrenNoHousing)
        } else if housing_element > 0.0 {
            Some(DisregardCase::ChildrenWithHousing)
        } else {
            None
        }
    }

    pub fn amount(self, params: &ParameterSet) -> f64 {
        match self {
            DisregardCase::NoChildren => 0.0,
            DisregardCase::ChildrenNoHousing => params.disregard_kids_no_housing,
            DisregardCase::ChildrenWithHousing => params.disregard_kids_with_housing,
        }
    }
}

/// Disregard for a single unit; `row` locates a classification failure
pub fn disregard_for(
    unit: &BenefitUnit,
    params: &ParameterSet,
    allowance: &AllowanceResult,
    row: usize,
) -> Result<f64> {
    DisregardCase::classify(unit.num_kids, allowance.housing_element)
        .map(|case| case.amount(params))
        .ok_or(CalcError::Unclassified {
            stage: "disregard",
            row,
        })
}

/// Disregard for every unit, in input order
pub fn compute_disregard(
    units: &[BenefitUnit],
    params: &ParameterSet,
    allowances: &[AllowanceResult],
) -> Result<Vec<f64>> {
    check_rows("disregard", units.len(), allowances.len())?;

    units
        .iter()
        .zip(allowances)
        .enumerate()
        .map(|(row, (unit, allowance))| disregard_for(unit, params, allowance, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::allowance::compute_allowances;
    use crate::parameters::PolicyYear;

    fn units_with(num_kids: u32, rent: f64) -> Vec<BenefitUnit> {
        [false, true]
            .into_iter()
            .map(|couple| BenefitUnit {
                couple,
                num_kids,
                rent,
                post_tax_hh_income: 900.0,
                ..BenefitUnit::single_adult()
            })
            .collect()
    }

    fn disregards(units: &[BenefitUnit], params: &ParameterSet) -> Vec<f64> {
        let allowances = compute_allowances(units, params).expect("valid units");
        compute_disregard(units, params, &allowances).expect("classified")
    }

    #[test]
    fn test_no_kids() {
        let p = PolicyYear::Y2024_25.parameters();
        for rent in [0.0, 100.0, 2_000.0] {
            assert!(disregards(&units_with(0, rent), &p).iter().all(|d| *d == 0.0));
        }
    }

    #[test]
    fn test_kids_no_housing() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = disregards(&units_with(1, 0.0), &p);
        assert!(d.iter().all(|d| *d == p.disregard_kids_no_housing));
    }

    #[test]
    fn test_kids_with_housing() {
        let p = PolicyYear::Y2024_25.parameters();
        let d = disregards(&units_with(3, 100.0), &p);
        assert!(d.iter().all(|d| *d == p.disregard_kids_with_housing));
    }

    #[test]
    fn test_reads_housing_element_not_rent() {
        let p = PolicyYear::Y2024_25.parameters();
        let unit = BenefitUnit {
            num_kids: 1,
            rent: 500.0,
            ..BenefitUnit::single_adult()
        };
        // A housing element of zero overrides the unit's rent
        let allowance = AllowanceResult {
            standard_allowance: 0.0,
            child_element: 0.0,
            childcare_element: 0.0,
            housing_element: 0.0,
            full_allowance: 0.0,
        };
        let d = disregard_for(&unit, &p, &allowance, 0).expect("classified");
        assert_eq!(d, p.disregard_kids_no_housing);
    }

    #[test]
    fn test_unclassified_housing_element() {
        let p = PolicyYear::Y2024_25.parameters();
        let unit = BenefitUnit {
            num_kids: 2,
            ..BenefitUnit::single_adult()
        };
        let allowance = AllowanceResult {
            standard_allowance: 0.0,
            child_element: 0.0,
            childcare_element: 0.0,
            housing_element: f64::NAN,
            full_allowance: 0.0,
        };
        assert!(matches!(
            compute_disregard(&[unit], &p, &[allowance]),
            Err(CalcError::Unclassified { stage: "disregard", row: 0 })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let p = PolicyYear::Y2024_25.parameters();
        let units = units_with(1, 0.0);
        assert!(matches!(
            compute_disregard(&units, &p, &[]),
            Err(CalcError::LengthMismatch { expected: 2, actual: 0, .. })
        ));
    }
}
