//! Error type shared by loaders, parameter handling and the rule engine

use thiserror::Error;

/// Errors raised while loading inputs or calculating entitlements
#[derive(Debug, Error)]
pub enum CalcError {
    /// A required benefit unit column is absent from the input table
    #[error("missing required column `{field}`")]
    MissingColumn { field: &'static str },

    /// A required benefit unit field is empty for one row
    #[error("missing value for `{field}` at row {row}")]
    MissingField { field: &'static str, row: usize },

    /// A required parameter key is absent from the parameter set
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A benefit unit field is outside its domain
    #[error("invalid value for `{field}` at row {row}: {reason}")]
    InvalidValue {
        field: &'static str,
        row: usize,
        reason: String,
    },

    /// A parameter value is outside its domain
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A row matched none of the arms of a classification
    #[error("row {row} matched no {stage} case")]
    Unclassified { stage: &'static str, row: usize },

    /// Stage inputs disagree on the number of rows
    #[error("{stage} received {actual} rows, expected {expected}")]
    LengthMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unrecognised policy year `{0}`")]
    UnknownPolicyYear(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
