//! Load benefit units from a canonical-column CSV table
//!
//! Column order does not matter and extra columns are ignored. Every column in
//! [`REQUIRED_FIELDS`] must be present and every cell in them non-empty.

use super::data::{BenefitUnit, REQUIRED_FIELDS};
use crate::error::{CalcError, Result};
use csv::StringRecord;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load benefit units from a CSV file
pub fn load_units<P: AsRef<Path>>(path: P) -> Result<Vec<BenefitUnit>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let units = load_units_from_reader(file)?;
    info!("Loaded {} benefit units from {}", units.len(), path.display());
    Ok(units)
}

/// Load benefit units from any CSV reader
pub fn load_units_from_reader<R: Read>(reader: R) -> Result<Vec<BenefitUnit>> {
    // Short rows reach `cell` so the absent field is reported by name
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut units = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let unit = columns.parse(&record, row)?;
        unit.validate(row)?;
        units.push(unit);
    }

    Ok(units)
}

/// Positions of the required columns within a header row,
/// in [`REQUIRED_FIELDS`] order
struct ColumnIndex {
    positions: [usize; REQUIRED_FIELDS.len()],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; REQUIRED_FIELDS.len()];
        for (slot, field) in positions.iter_mut().zip(REQUIRED_FIELDS) {
            *slot = headers
                .iter()
                .position(|h| h == field)
                .ok_or(CalcError::MissingColumn { field })?;
        }
        Ok(Self { positions })
    }

    fn parse(&self, record: &StringRecord, row: usize) -> Result<BenefitUnit> {
        let [couple, under_25, kids, childcare, rent, income] = self.positions;
        Ok(BenefitUnit {
            couple: parse_bool("couple", cell(record, couple, "couple", row)?, row)?,
            adults_under_25: parse_bool(
                "adults_under_25",
                cell(record, under_25, "adults_under_25", row)?,
                row,
            )?,
            num_kids: parse_count("num_kids", cell(record, kids, "num_kids", row)?, row)?,
            childcare_costs: parse_amount(
                "childcare_costs",
                cell(record, childcare, "childcare_costs", row)?,
                row,
            )?,
            rent: parse_amount("rent", cell(record, rent, "rent", row)?, row)?,
            post_tax_hh_income: parse_amount(
                "post_tax_hh_income",
                cell(record, income, "post_tax_hh_income", row)?,
                row,
            )?,
        })
    }
}

/// Fetch a cell, treating empty and NA markers as missing
fn cell<'r>(
    record: &'r StringRecord,
    pos: usize,
    field: &'static str,
    row: usize,
) -> Result<&'r str> {
    match record.get(pos) {
        Some(value) if !is_missing_marker(value) => Ok(value),
        _ => Err(CalcError::MissingField { field, row }),
    }
}

fn is_missing_marker(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan")
}

fn parse_bool(field: &'static str, value: &str, row: usize) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" => Ok(true),
        "false" | "0" | "0.0" => Ok(false),
        _ => Err(CalcError::InvalidValue {
            field,
            row,
            reason: format!("`{value}` is not a boolean"),
        }),
    }
}

/// Parse a child count; survey exports often write counts as floats
fn parse_count(field: &'static str, value: &str, row: usize) -> Result<u32> {
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }
    let invalid = || CalcError::InvalidValue {
        field,
        row,
        reason: format!("`{value}` is not a non-negative whole number"),
    };
    let as_float = value.parse::<f64>().map_err(|_| invalid())?;
    if as_float.is_finite()
        && as_float >= 0.0
        && as_float.fract() == 0.0
        && as_float <= f64::from(u32::MAX)
    {
        Ok(as_float as u32)
    } else {
        Err(invalid())
    }
}

fn parse_amount(field: &'static str, value: &str, row: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|_| CalcError::InvalidValue {
        field,
        row,
        reason: format!("`{value}` is not a number"),
    })
}
