//! Load parameter sets from JSON or CSV files
//!
//! JSON files hold a flat object of parameter name to number. CSV files hold
//! two columns, `parameter,value`, one row per parameter.

use super::ParameterSet;
use crate::error::Result;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ParameterRow {
    parameter: String,
    value: f64,
}

/// Load a parameter file, choosing the format from its extension.
/// `.csv` is read as CSV, anything else as JSON.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<ParameterSet> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let params = if is_csv {
        parameters_from_csv_reader(file)?
    } else {
        parameters_from_json_reader(file)?
    };

    info!("Loaded parameters from {}", path.display());
    Ok(params)
}

/// Read a JSON object of parameter name to value
pub fn parameters_from_json_reader<R: Read>(reader: R) -> Result<ParameterSet> {
    let values: HashMap<String, f64> = serde_json::from_reader(reader)?;
    let params = ParameterSet::from_map(&values)?;
    params.validate()?;
    Ok(params)
}

/// Read `parameter,value` rows
pub fn parameters_from_csv_reader<R: Read>(reader: R) -> Result<ParameterSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = HashMap::new();
    for row in rdr.deserialize() {
        let row: ParameterRow = row?;
        if let Some(previous) = values.insert(row.parameter.clone(), row.value) {
            warn!(
                "Parameter `{}` repeated; {} replaces {}",
                row.parameter, row.value, previous
            );
        }
    }

    let params = ParameterSet::from_map(&values)?;
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::parameters::PolicyYear;

    #[test]
    fn test_json_parameters() {
        let json = serde_json::to_string(&PolicyYear::Y2024_25.parameters().to_map())
            .expect("serialize");
        let params = parameters_from_json_reader(json.as_bytes()).expect("Failed to load");
        assert_eq!(params, PolicyYear::Y2024_25.parameters());
    }

    #[test]
    fn test_csv_parameters() {
        let mut csv = String::from("parameter,value\n");
        for (key, value) in PolicyYear::Y2023_24.parameters().to_map() {
            csv.push_str(&format!("{key},{value}\n"));
        }
        let params = parameters_from_csv_reader(csv.as_bytes()).expect("Failed to load");
        assert_eq!(params, PolicyYear::Y2023_24.parameters());
    }

    #[test]
    fn test_csv_repeated_parameter_last_wins() {
        let mut csv = String::from("parameter,value\n");
        for (key, value) in PolicyYear::Y2024_25.parameters().to_map() {
            csv.push_str(&format!("{key},{value}\n"));
        }
        csv.push_str("taper,0.63\n");

        let params = parameters_from_csv_reader(csv.as_bytes()).expect("Failed to load");
        assert_eq!(params.taper, 0.63);
        assert_eq!(
            ParameterSet { taper: 0.55, ..params },
            PolicyYear::Y2024_25.parameters()
        );
    }

    #[test]
    fn test_missing_key_in_json() {
        let json = r#"{"standard_single_over_25": 400.0}"#;
        assert!(matches!(
            parameters_from_json_reader(json.as_bytes()),
            Err(CalcError::MissingParameter("standard_single_under_25"))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let json = r#"{"taper": "fifty-five percent"}"#;
        assert!(matches!(
            parameters_from_json_reader(json.as_bytes()),
            Err(CalcError::Json(_))
        ));
    }
}
