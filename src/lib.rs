//! UC Calculator - Universal Credit entitlement engine for survey microdata
//!
//! This library provides:
//! - Benefit unit records and canonical CSV loading
//! - Parameter sets, parameter files and built-in policy years
//! - The allowance, disregard, deduction and receipt rule engine
//! - Result tables with CSV output and summary reporting

pub mod error;
pub mod benefit_unit;
pub mod parameters;
pub mod calculator;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use benefit_unit::BenefitUnit;
pub use parameters::{ParameterSet, PolicyYear};
pub use calculator::{
    generate_result, generate_result_parallel, AllowanceResult, DeductionResult, ReceiptResult,
    ResultRow, ResultTable,
};
