//! Universal Credit policy parameters
//!
//! A [`ParameterSet`] holds the twelve monthly rates, caps and thresholds the
//! rule engine reads. Sets come from parameter files ([`loader`]) or from the
//! built-in policy years ([`PolicyYear`]).

pub mod loader;
mod years;

pub use loader::{load_parameters, parameters_from_csv_reader, parameters_from_json_reader};
pub use years::PolicyYear;

use crate::error::{CalcError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Every parameter key the rule engine reads, in canonical order
pub const PARAMETER_KEYS: [&str; 12] = [
    "standard_single_over_25",
    "standard_single_under_25",
    "standard_couple_over_25",
    "standard_couple_under_25",
    "child_first",
    "child_second",
    "childcare_prop",
    "childcare_max_one",
    "childcare_max_two",
    "taper",
    "disregard_kids_no_housing",
    "disregard_kids_with_housing",
];

/// Policy constants for one calculation run.
/// Amounts are per monthly assessment period; `childcare_prop` and `taper`
/// are fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Standard allowance, single claimant aged 25 or over
    pub standard_single_over_25: f64,
    /// Standard allowance, single claimant under 25
    pub standard_single_under_25: f64,
    /// Standard allowance, joint claimants, one or both 25 or over
    pub standard_couple_over_25: f64,
    /// Standard allowance, joint claimants both under 25
    pub standard_couple_under_25: f64,

    /// Child element for the first child
    pub child_first: f64,
    /// Additional child element once there are two or more children
    pub child_second: f64,

    /// Share of childcare costs reimbursed
    pub childcare_prop: f64,
    /// Childcare element cap with one child
    pub childcare_max_one: f64,
    /// Childcare element cap with two or more children
    pub childcare_max_two: f64,

    /// Withdrawal rate applied to income above the disregard
    pub taper: f64,

    /// Work allowance for units with children and no housing element
    pub disregard_kids_no_housing: f64,
    /// Work allowance for units with children and a housing element
    pub disregard_kids_with_housing: f64,
}

impl ParameterSet {
    /// Build a parameter set from a name → value map.
    ///
    /// Fails with [`CalcError::MissingParameter`] naming the first absent key
    /// in canonical order. Keys the engine does not read are logged and
    /// ignored.
    pub fn from_map(values: &HashMap<String, f64>) -> Result<Self> {
        for key in values.keys() {
            if !PARAMETER_KEYS.contains(&key.as_str()) {
                warn!("Ignoring unknown parameter `{key}`");
            }
        }

        let take = |key: &'static str| -> Result<f64> {
            values
                .get(key)
                .copied()
                .ok_or(CalcError::MissingParameter(key))
        };

        Ok(Self {
            standard_single_over_25: take("standard_single_over_25")?,
            standard_single_under_25: take("standard_single_under_25")?,
            standard_couple_over_25: take("standard_couple_over_25")?,
            standard_couple_under_25: take("standard_couple_under_25")?,
            child_first: take("child_first")?,
            child_second: take("child_second")?,
            childcare_prop: take("childcare_prop")?,
            childcare_max_one: take("childcare_max_one")?,
            childcare_max_two: take("childcare_max_two")?,
            taper: take("taper")?,
            disregard_kids_no_housing: take("disregard_kids_no_housing")?,
            disregard_kids_with_housing: take("disregard_kids_with_housing")?,
        })
    }

    /// Parameter values keyed by name, in canonical order
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        PARAMETER_KEYS.into_iter().zip(self.values()).collect()
    }

    /// Look up a parameter by name
    pub fn get(&self, key: &str) -> Option<f64> {
        PARAMETER_KEYS
            .into_iter()
            .zip(self.values())
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Values in [`PARAMETER_KEYS`] order
    fn values(&self) -> [f64; 12] {
        [
            self.standard_single_over_25,
            self.standard_single_under_25,
            self.standard_couple_over_25,
            self.standard_couple_under_25,
            self.child_first,
            self.child_second,
            self.childcare_prop,
            self.childcare_max_one,
            self.childcare_max_two,
            self.taper,
            self.disregard_kids_no_housing,
            self.disregard_kids_with_housing,
        ]
    }

    /// Check every value is finite and non-negative, and the two rates lie
    /// in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in PARAMETER_KEYS.into_iter().zip(self.values()) {
            if !value.is_finite() {
                return Err(CalcError::InvalidParameter {
                    name,
                    value,
                    reason: "not finite",
                });
            }
            if value < 0.0 {
                return Err(CalcError::InvalidParameter {
                    name,
                    value,
                    reason: "negative",
                });
            }
        }

        for (name, value) in [("childcare_prop", self.childcare_prop), ("taper", self.taper)] {
            if value > 1.0 {
                return Err(CalcError::InvalidParameter {
                    name,
                    value,
                    reason: "rate above 1",
                });
            }
        }

        if self.childcare_max_two < self.childcare_max_one {
            warn!(
                "childcare_max_two ({}) is below childcare_max_one ({}); a second child can lower entitlement",
                self.childcare_max_two, self.childcare_max_one
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, f64> {
        PARAMETER_KEYS
            .iter()
            .enumerate()
            .map(|(i, k)| (k.to_string(), i as f64 / 20.0))
            .collect()
    }

    #[test]
    fn test_from_map() {
        let params = ParameterSet::from_map(&full_map()).expect("complete map");

        assert_eq!(params.standard_single_over_25, 0.0);
        assert_eq!(params.child_first, 0.2);
        assert_eq!(params.taper, 0.45);
        assert_eq!(params.disregard_kids_with_housing, 0.55);
    }

    #[test]
    fn test_missing_parameter() {
        let mut map = full_map();
        map.remove("taper");
        map.remove("child_second");

        // First absent key in canonical order is reported
        match ParameterSet::from_map(&map) {
            Err(CalcError::MissingParameter(key)) => assert_eq!(key, "child_second"),
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut map = full_map();
        map.insert("lha_cap".to_string(), 900.0);
        assert!(ParameterSet::from_map(&map).is_ok());
    }

    #[test]
    fn test_map_round_trip() {
        let params = PolicyYear::Y2024_25.parameters();
        let map: HashMap<String, f64> = params
            .to_map()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert_eq!(map.len(), PARAMETER_KEYS.len());
        assert_eq!(ParameterSet::from_map(&map).expect("round trip"), params);
        assert_eq!(params.get("taper"), Some(0.55));
        assert_eq!(params.get("lha_cap"), None);
    }

    #[test]
    fn test_validate() {
        let params = PolicyYear::Y2023_24.parameters();
        assert!(params.validate().is_ok());

        let negative = ParameterSet { child_first: -1.0, ..params };
        assert!(matches!(
            negative.validate(),
            Err(CalcError::InvalidParameter { name: "child_first", .. })
        ));

        let steep = ParameterSet { taper: 1.2, ..params };
        assert!(matches!(
            steep.validate(),
            Err(CalcError::InvalidParameter { name: "taper", .. })
        ));

        let infinite = ParameterSet { childcare_max_two: f64::INFINITY, ..params };
        assert!(infinite.validate().is_err());
    }
}
