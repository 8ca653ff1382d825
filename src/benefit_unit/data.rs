//! Benefit unit record consumed by the rule engine

use crate::error::{CalcError, Result};
use serde::Serialize;

/// Canonical column names, in the order they are written to CSV
pub const REQUIRED_FIELDS: [&str; 6] = [
    "couple",
    "adults_under_25",
    "num_kids",
    "childcare_costs",
    "rent",
    "post_tax_hh_income",
];

/// A household or sub-household group assessed jointly for Universal Credit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitUnit {
    /// At least two adults in the unit
    pub couple: bool,

    /// All adults in the unit are under 25
    pub adults_under_25: bool,

    /// Number of dependent children
    pub num_kids: u32,

    /// Total childcare expenditure per assessment period
    pub childcare_costs: f64,

    /// Rent per assessment period
    pub rent: f64,

    /// Net household income per assessment period
    pub post_tax_hh_income: f64,
}

impl BenefitUnit {
    /// Single adult aged 25 or over with no children, costs or income
    pub fn single_adult() -> Self {
        Self {
            couple: false,
            adults_under_25: false,
            num_kids: 0,
            childcare_costs: 0.0,
            rent: 0.0,
            post_tax_hh_income: 0.0,
        }
    }

    /// Check the real-valued fields are finite and non-negative.
    /// `row` is only used to locate the failure in the error.
    pub fn validate(&self, row: usize) -> Result<()> {
        check_amount("childcare_costs", self.childcare_costs, row)?;
        check_amount("rent", self.rent, row)?;
        check_amount("post_tax_hh_income", self.post_tax_hh_income, row)?;
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64, row: usize) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::InvalidValue {
            field,
            row,
            reason: format!("{value} is not a finite amount"),
        });
    }
    if value < 0.0 {
        return Err(CalcError::InvalidValue {
            field,
            row,
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}
