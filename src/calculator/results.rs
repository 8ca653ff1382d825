//! Result table, CSV output and summary reporting

use super::allowance::{AllowanceResult, FamilyType};
use super::check_rows;
use super::deduction::DeductionResult;
use super::receipt::ReceiptResult;
use crate::benefit_unit::BenefitUnit;
use crate::error::Result;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One output row: allowance, deduction and receipt columns for a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRow {
    /// Position of the unit in the input table
    pub row: usize,
    pub standard_allowance: f64,
    pub child_element: f64,
    pub childcare_element: f64,
    pub housing_element: f64,
    pub full_allowance: f64,
    pub disregard: f64,
    pub full_deduction: f64,
    pub capped_deduction: f64,
    pub uc_receipt: f64,
}

impl ResultRow {
    pub fn new(
        row: usize,
        allowance: &AllowanceResult,
        deduction: &DeductionResult,
        receipt: &ReceiptResult,
    ) -> Self {
        Self {
            row,
            standard_allowance: allowance.standard_allowance,
            child_element: allowance.child_element,
            childcare_element: allowance.childcare_element,
            housing_element: allowance.housing_element,
            full_allowance: allowance.full_allowance,
            disregard: deduction.disregard,
            full_deduction: deduction.full_deduction,
            capped_deduction: deduction.capped_deduction,
            uc_receipt: receipt.uc_receipt,
        }
    }
}

/// Calculation output, one row per input unit in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn summary(&self) -> ReceiptSummary {
        ReceiptSummary::from_rows(self.rows.iter())
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_csv(File::create(path)?)?;
        info!("Wrote {} result rows to {}", self.len(), path.display());
        Ok(())
    }
}

/// Aggregate totals over a set of result rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReceiptSummary {
    pub units: usize,
    /// Units with a positive receipt
    pub recipients: usize,
    pub total_allowance: f64,
    pub total_deduction: f64,
    pub total_receipt: f64,
}

impl ReceiptSummary {
    fn from_rows<'a>(rows: impl Iterator<Item = &'a ResultRow>) -> Self {
        rows.fold(Self::default(), |mut acc, row| {
            acc.add(row);
            acc
        })
    }

    fn add(&mut self, row: &ResultRow) {
        self.units += 1;
        if row.uc_receipt > 0.0 {
            self.recipients += 1;
        }
        self.total_allowance += row.full_allowance;
        self.total_deduction += row.capped_deduction;
        self.total_receipt += row.uc_receipt;
    }

    /// Mean receipt across all units, zero for an empty summary
    pub fn mean_receipt(&self) -> f64 {
        if self.units == 0 {
            0.0
        } else {
            self.total_receipt / self.units as f64
        }
    }
}

/// Summaries keyed by family type; types with no units are omitted
pub fn summarise_by_family_type(
    units: &[BenefitUnit],
    table: &ResultTable,
) -> Result<BTreeMap<FamilyType, ReceiptSummary>> {
    check_rows("summary", units.len(), table.len())?;

    let mut summaries: BTreeMap<FamilyType, ReceiptSummary> = BTreeMap::new();
    for (unit, row) in units.iter().zip(table.iter()) {
        summaries.entry(FamilyType::of(unit)).or_default().add(row);
    }
    Ok(summaries)
}
