//! Calculate Universal Credit receipt for a table of benefit units
//!
//! Reads a canonical benefit unit CSV (or generates a synthetic population),
//! applies a parameter set and writes the result table as CSV.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use uc_calculator::benefit_unit::{generate_population, load_units, PopulationParams};
use uc_calculator::calculator::{
    generate_result, generate_result_parallel, summarise_by_family_type,
};
use uc_calculator::parameters::load_parameters;
use uc_calculator::{ParameterSet, PolicyYear};

#[derive(Debug, Parser)]
#[command(name = "uc_calc", about = "Universal Credit entitlement calculator")]
struct Args {
    /// Benefit unit CSV with canonical column names
    #[arg(long, conflicts_with = "synthetic")]
    units: Option<PathBuf>,

    /// Generate this many synthetic benefit units instead of reading a file
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for the synthetic population
    #[arg(long, default_value_t = 291_289)]
    seed: u64,

    /// Parameter file (.json or .csv)
    #[arg(long, conflicts_with_all = ["policy_year", "date"])]
    params: Option<PathBuf>,

    /// Built-in policy year, e.g. 2024-25
    #[arg(long, conflicts_with = "date")]
    policy_year: Option<PolicyYear>,

    /// Use the policy year in force on this date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output CSV path
    #[arg(long, short, default_value = "uc_results.csv")]
    output: PathBuf,

    /// Spread rows across all cores
    #[arg(long)]
    parallel: bool,
}

fn resolve_parameters(args: &Args) -> Result<ParameterSet> {
    if let Some(path) = &args.params {
        return load_parameters(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()));
    }
    if let Some(date) = args.date {
        let year = PolicyYear::containing(date)
            .with_context(|| format!("No supported policy year covers {date}"))?;
        println!("Using {year} rates for {date}");
        return Ok(year.parameters());
    }
    let year = args.policy_year.unwrap_or(PolicyYear::Y2024_25);
    println!("Using {year} rates");
    Ok(year.parameters())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let units = match (&args.units, args.synthetic) {
        (Some(path), _) => load_units(path)
            .with_context(|| format!("Failed to load benefit units from {}", path.display()))?,
        (None, Some(size)) => generate_population(&PopulationParams {
            size,
            seed: args.seed,
            ..Default::default()
        }),
        (None, None) => bail!("Provide --units <CSV> or --synthetic <N>"),
    };
    println!("Loaded {} benefit units in {:?}", units.len(), start.elapsed());

    let params = resolve_parameters(&args)?;

    let calc_start = Instant::now();
    let table = if args.parallel {
        generate_result_parallel(&units, &params)
    } else {
        generate_result(&units, &params)
    }
    .context("Calculation failed")?;
    println!("Calculated {} rows in {:?}", table.len(), calc_start.elapsed());

    table
        .write_csv_path(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Output written to {}", args.output.display());

    let summary = table.summary();
    println!("\nSummary:");
    println!(
        "  Units={}, Recipients={}, Total receipt=£{:.2}, Mean receipt=£{:.2}",
        summary.units,
        summary.recipients,
        summary.total_receipt,
        summary.mean_receipt()
    );
    for (family, s) in summarise_by_family_type(&units, &table)? {
        println!(
            "  {:<14} Units={:<6} Recipients={:<6} Mean receipt=£{:.2}",
            format!("{family:?}"),
            s.units,
            s.recipients,
            s.mean_receipt()
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
