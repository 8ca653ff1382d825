//! Allowance components: standard allowance, child, childcare and housing elements

use crate::benefit_unit::BenefitUnit;
use crate::error::Result;
use crate::parameters::ParameterSet;
use serde::Serialize;

/// Family type selecting the standard allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FamilyType {
    SingleOver25,
    SingleUnder25,
    CoupleOver25,
    CoupleUnder25,
}

impl FamilyType {
    pub const ALL: [FamilyType; 4] = [
        FamilyType::SingleOver25,
        FamilyType::SingleUnder25,
        FamilyType::CoupleOver25,
        FamilyType::CoupleUnder25,
    ];

    pub fn classify(couple: bool, adults_under_25: bool) -> Self {
        match (couple, adults_under_25) {
            (false, false) => FamilyType::SingleOver25,
            (false, true) => FamilyType::SingleUnder25,
            (true, false) => FamilyType::CoupleOver25,
            (true, true) => FamilyType::CoupleUnder25,
        }
    }

    pub fn of(unit: &BenefitUnit) -> Self {
        Self::classify(unit.couple, unit.adults_under_25)
    }

    /// Name of the parameter holding this family type's standard allowance
    pub fn parameter_key(self) -> &'static str {
        match self {
            FamilyType::SingleOver25 => "standard_single_over_25",
            FamilyType::SingleUnder25 => "standard_single_under_25",
            FamilyType::CoupleOver25 => "standard_couple_over_25",
            FamilyType::CoupleUnder25 => "standard_couple_under_25",
        }
    }

    pub fn standard_allowance(self, params: &ParameterSet) -> f64 {
        match self {
            FamilyType::SingleOver25 => params.standard_single_over_25,
            FamilyType::SingleUnder25 => params.standard_single_under_25,
            FamilyType::CoupleOver25 => params.standard_couple_over_25,
            FamilyType::CoupleUnder25 => params.standard_couple_under_25,
        }
    }
}

/// Number-of-children band used by the child and childcare elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildTier {
    NoChildren,
    OneChild,
    TwoOrMore,
}

impl ChildTier {
    pub fn from_count(num_kids: u32) -> Self {
        match num_kids {
            0 => ChildTier::NoChildren,
            1 => ChildTier::OneChild,
            _ => ChildTier::TwoOrMore,
        }
    }

    pub fn child_element(self, params: &ParameterSet) -> f64 {
        match self {
            ChildTier::NoChildren => 0.0,
            ChildTier::OneChild => params.child_first,
            ChildTier::TwoOrMore => params.child_first + params.child_second,
        }
    }

    /// Proportion of costs, bounded above by the tier's cap.
    /// Units without children get nothing.
    pub fn childcare_element(self, childcare_costs: f64, params: &ParameterSet) -> f64 {
        let proportional = childcare_costs * params.childcare_prop;
        match self {
            ChildTier::NoChildren => 0.0,
            ChildTier::OneChild => proportional.min(params.childcare_max_one),
            ChildTier::TwoOrMore => proportional.min(params.childcare_max_two),
        }
    }
}

/// Allowance components for one benefit unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllowanceResult {
    pub standard_allowance: f64,
    pub child_element: f64,
    pub childcare_element: f64,
    pub housing_element: f64,
    /// Sum of the four components
    pub full_allowance: f64,
}

/// Allowance components for a single unit
pub fn allowance_for(unit: &BenefitUnit, params: &ParameterSet) -> AllowanceResult {
    let tier = ChildTier::from_count(unit.num_kids);

    let standard_allowance = FamilyType::of(unit).standard_allowance(params);
    let child_element = tier.child_element(params);
    let childcare_element = tier.childcare_element(unit.childcare_costs, params);
    // TODO: cap at local housing allowance once rates by area are loaded
    let housing_element = unit.rent;

    AllowanceResult {
        standard_allowance,
        child_element,
        childcare_element,
        housing_element,
        full_allowance: standard_allowance + child_element + childcare_element + housing_element,
    }
}

/// Allowance components for every unit, in input order.
/// Units are validated first; nothing is returned if any row is invalid.
pub fn compute_allowances(
    units: &[BenefitUnit],
    params: &ParameterSet,
) -> Result<Vec<AllowanceResult>> {
    for (row, unit) in units.iter().enumerate() {
        unit.validate(row)?;
    }
    Ok(units.iter().map(|unit| allowance_for(unit, params)).collect())
}
