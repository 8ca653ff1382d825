//! Built-in Universal Credit rates by policy year
//!
//! Monthly amounts as uprated each April. A year runs from its uprating date
//! until the next year's uprating date; the latest year is open-ended.

use super::ParameterSet;
use crate::error::CalcError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyYear {
    #[serde(rename = "2023-24")]
    Y2023_24,
    #[serde(rename = "2024-25")]
    Y2024_25,
}

impl PolicyYear {
    /// All supported years, oldest first
    pub const ALL: [PolicyYear; 2] = [PolicyYear::Y2023_24, PolicyYear::Y2024_25];

    pub fn label(self) -> &'static str {
        match self {
            PolicyYear::Y2023_24 => "2023-24",
            PolicyYear::Y2024_25 => "2024-25",
        }
    }

    /// First day the year's rates apply
    pub fn uprating_date(self) -> NaiveDate {
        let (year, month, day) = match self {
            PolicyYear::Y2023_24 => (2023, 4, 10),
            PolicyYear::Y2024_25 => (2024, 4, 8),
        };
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
    }

    /// The policy year whose rates are in force on `date`.
    /// Dates before the earliest supported year give `None`.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|year| year.uprating_date() <= date)
    }

    /// Published monthly rates for the year
    pub fn parameters(self) -> ParameterSet {
        match self {
            PolicyYear::Y2023_24 => ParameterSet {
                standard_single_over_25: 368.74,
                standard_single_under_25: 292.11,
                standard_couple_over_25: 578.82,
                standard_couple_under_25: 458.51,
                child_first: 315.00,
                child_second: 269.58,
                childcare_prop: 0.85,
                childcare_max_one: 951.01,
                childcare_max_two: 1630.15,
                taper: 0.55,
                disregard_kids_no_housing: 631.0,
                disregard_kids_with_housing: 379.0,
            },
            PolicyYear::Y2024_25 => ParameterSet {
                standard_single_over_25: 393.45,
                standard_single_under_25: 311.68,
                standard_couple_over_25: 617.60,
                standard_couple_under_25: 489.23,
                child_first: 333.33,
                child_second: 287.92,
                childcare_prop: 0.85,
                childcare_max_one: 1014.63,
                childcare_max_two: 1739.37,
                taper: 0.55,
                disregard_kids_no_housing: 673.0,
                disregard_kids_with_housing: 404.0,
            },
        }
    }
}

impl fmt::Display for PolicyYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyYear {
    type Err = CalcError;

    /// Accepts "2024-25", "2024/25" and "2024_25"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace(['/', '_'], "-");
        Self::ALL
            .iter()
            .copied()
            .find(|year| year.label() == normalised)
            .ok_or_else(|| CalcError::UnknownPolicyYear(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_containing() {
        assert_eq!(PolicyYear::containing(date(2023, 4, 9)), None);
        assert_eq!(PolicyYear::containing(date(2023, 4, 10)), Some(PolicyYear::Y2023_24));
        assert_eq!(PolicyYear::containing(date(2024, 1, 31)), Some(PolicyYear::Y2023_24));
        assert_eq!(PolicyYear::containing(date(2024, 4, 8)), Some(PolicyYear::Y2024_25));
        assert_eq!(PolicyYear::containing(date(2030, 6, 1)), Some(PolicyYear::Y2024_25));
    }

    #[test]
    fn test_uprating_dates() {
        assert_eq!(PolicyYear::Y2023_24.uprating_date(), date(2023, 4, 10));
        assert_eq!(PolicyYear::Y2024_25.uprating_date(), date(2024, 4, 8));
        for year in PolicyYear::ALL {
            assert_eq!(PolicyYear::containing(year.uprating_date()), Some(year));
            assert_eq!(year.uprating_date().weekday(), chrono::Weekday::Mon);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-25".parse::<PolicyYear>().ok(), Some(PolicyYear::Y2024_25));
        assert_eq!("2023/24".parse::<PolicyYear>().ok(), Some(PolicyYear::Y2023_24));
        assert!(matches!(
            "1999-00".parse::<PolicyYear>(),
            Err(CalcError::UnknownPolicyYear(_))
        ));
        assert_eq!(PolicyYear::Y2024_25.to_string(), "2024-25");
    }

    #[test]
    fn test_built_in_years_are_valid() {
        for year in PolicyYear::ALL {
            let params = year.parameters();
            assert!(params.validate().is_ok(), "{year} failed validation");
            assert!(params.childcare_max_two >= params.childcare_max_one);
            assert!(params.disregard_kids_no_housing > params.disregard_kids_with_housing);
        }
    }
}
