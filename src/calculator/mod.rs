//! Universal Credit rule engine
//!
//! Stages run strictly forward, each taking the previous stages' outputs as
//! immutable slices:
//! allowance → disregard → deduction → receipt.
//! [`generate_result`] sequences them into a [`ResultTable`].

pub mod allowance;
pub mod disregard;
pub mod deduction;
pub mod receipt;
mod results;

pub use allowance::{allowance_for, compute_allowances, AllowanceResult, ChildTier, FamilyType};
pub use disregard::{compute_disregard, disregard_for, DisregardCase};
pub use deduction::{compute_deductions, deduction_for, DeductionResult};
pub use receipt::{compute_receipt, receipt_for, ReceiptResult};
pub use results::{summarise_by_family_type, ReceiptSummary, ResultRow, ResultTable};

use crate::benefit_unit::BenefitUnit;
use crate::error::{CalcError, Result};
use crate::parameters::ParameterSet;
use log::{debug, info};
use rayon::prelude::*;

/// Allowance and deduction tables without the receipt
pub fn generate_allowance_and_deduction(
    units: &[BenefitUnit],
    params: &ParameterSet,
) -> Result<(Vec<AllowanceResult>, Vec<DeductionResult>)> {
    params.validate()?;

    let allowances = compute_allowances(units, params)?;
    debug!("Computed allowances for {} units", allowances.len());

    let disregard = compute_disregard(units, params, &allowances)?;
    let deductions = compute_deductions(units, params, &allowances, &disregard)?;
    debug!("Computed deductions for {} units", deductions.len());

    Ok((allowances, deductions))
}

/// Calculate allowances, deductions and receipt for every unit.
///
/// The table has one row per unit in input order. Any invalid unit or
/// parameter fails the whole call.
pub fn generate_result(units: &[BenefitUnit], params: &ParameterSet) -> Result<ResultTable> {
    let (allowances, deductions) = generate_allowance_and_deduction(units, params)?;
    let receipts = compute_receipt(&allowances, &deductions)?;

    let rows = allowances
        .iter()
        .zip(&deductions)
        .zip(&receipts)
        .enumerate()
        .map(|(row, ((a, d), r))| ResultRow::new(row, a, d, r))
        .collect();

    let table = ResultTable::new(rows);
    info!("Calculated Universal Credit for {} benefit units", table.len());
    Ok(table)
}

/// Same table as [`generate_result`], with rows computed on the rayon pool
pub fn generate_result_parallel(
    units: &[BenefitUnit],
    params: &ParameterSet,
) -> Result<ResultTable> {
    params.validate()?;
    // Validate up front so the reported row is the first bad one
    for (row, unit) in units.iter().enumerate() {
        unit.validate(row)?;
    }

    let rows = units
        .par_iter()
        .enumerate()
        .map(|(row, unit)| calculate_row(row, unit, params))
        .collect::<Result<Vec<_>>>()?;

    let table = ResultTable::new(rows);
    info!(
        "Calculated Universal Credit for {} benefit units on {} threads",
        table.len(),
        rayon::current_num_threads()
    );
    Ok(table)
}

/// Run every stage for one unit
pub fn calculate_row(row: usize, unit: &BenefitUnit, params: &ParameterSet) -> Result<ResultRow> {
    let allowance = allowance_for(unit, params);
    let disregard = disregard_for(unit, params, &allowance, row)?;
    let deduction = deduction_for(unit.post_tax_hh_income, params, &allowance, disregard);
    let receipt = receipt_for(&allowance, &deduction);
    Ok(ResultRow::new(row, &allowance, &deduction, &receipt))
}

pub(crate) fn check_rows(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CalcError::LengthMismatch {
            stage,
            expected,
            actual,
        })
    }
}
