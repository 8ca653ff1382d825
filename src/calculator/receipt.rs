//! Net Universal Credit receipt

use super::allowance::AllowanceResult;
use super::check_rows;
use super::deduction::DeductionResult;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReceiptResult {
    /// Full allowance less capped deduction, in [0, full_allowance]
    pub uc_receipt: f64,
}

pub fn receipt_for(allowance: &AllowanceResult, deduction: &DeductionResult) -> ReceiptResult {
    ReceiptResult {
        uc_receipt: allowance.full_allowance - deduction.capped_deduction,
    }
}

/// Receipts for every unit, in input order
pub fn compute_receipt(
    allowances: &[AllowanceResult],
    deductions: &[DeductionResult],
) -> Result<Vec<ReceiptResult>> {
    check_rows("receipt", allowances.len(), deductions.len())?;

    Ok(allowances
        .iter()
        .zip(deductions)
        .map(|(allowance, deduction)| receipt_for(allowance, deduction))
        .collect())
}
