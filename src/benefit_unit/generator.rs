//! Synthetic benefit unit populations
//!
//! Generates reproducible populations from a seed for demonstrations,
//! benchmarks and population-level tests:
//! - Couple and under-25 shares
//! - Distribution of the number of children
//! - Uniform childcare, rent and income ranges

use super::BenefitUnit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parameters for generating a population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationParams {
    /// Number of benefit units to generate
    #[serde(default = "default_size")]
    pub size: usize,

    /// Probability a unit is a couple
    #[serde(default = "default_couple_share")]
    pub couple_share: f64,

    /// Probability all adults in a unit are under 25
    #[serde(default = "default_under_25_share")]
    pub under_25_share: f64,

    /// Probabilities of 0, 1, 2, 3 children
    #[serde(default = "default_kid_weights")]
    pub kid_weights: [f64; 4],

    /// Upper bound of monthly childcare costs (units with children only)
    #[serde(default = "default_max_amount")]
    pub max_childcare: f64,

    /// Upper bound of monthly rent
    #[serde(default = "default_max_amount")]
    pub max_rent: f64,

    /// Upper bound of monthly net household income
    #[serde(default = "default_max_amount")]
    pub max_income: f64,

    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_size() -> usize { 1000 }
fn default_couple_share() -> f64 { 0.5 }
fn default_under_25_share() -> f64 { 0.2 }
fn default_kid_weights() -> [f64; 4] { [0.3, 0.3, 0.2, 0.2] }
fn default_max_amount() -> f64 { 2000.0 }
fn default_seed() -> u64 { 291_289 }

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            size: default_size(),
            couple_share: default_couple_share(),
            under_25_share: default_under_25_share(),
            kid_weights: default_kid_weights(),
            max_childcare: default_max_amount(),
            max_rent: default_max_amount(),
            max_income: default_max_amount(),
            seed: default_seed(),
        }
    }
}

/// Generate a population of benefit units.
/// The same parameters always produce the same population.
pub fn generate_population(params: &PopulationParams) -> Vec<BenefitUnit> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let couple_share = probability(params.couple_share);
    let under_25_share = probability(params.under_25_share);

    (0..params.size)
        .map(|_| {
            let couple = rng.random_bool(couple_share);
            let adults_under_25 = rng.random_bool(under_25_share);
            let num_kids = sample_kids(&mut rng, &params.kid_weights);
            let childcare_costs = if num_kids > 0 {
                uniform(&mut rng, params.max_childcare)
            } else {
                0.0
            };
            let post_tax_hh_income = uniform(&mut rng, params.max_income);
            let rent = uniform(&mut rng, params.max_rent);

            BenefitUnit {
                couple,
                adults_under_25,
                num_kids,
                childcare_costs,
                rent,
                post_tax_hh_income,
            }
        })
        .collect()
}

/// Clamp a share into [0, 1]; NaN counts as zero
fn probability(share: f64) -> f64 {
    if share.is_nan() {
        0.0
    } else {
        share.clamp(0.0, 1.0)
    }
}

/// Draw from [0, max); non-positive or non-finite bounds give zero
fn uniform(rng: &mut StdRng, max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}

/// Draw a child count by inverting the cumulative weights
fn sample_kids(rng: &mut StdRng, weights: &[f64; 4]) -> u32 {
    let weight = |w: f64| if w.is_finite() { w.max(0.0) } else { 0.0 };
    let total: f64 = weights.iter().map(|&w| weight(w)).sum();
    if total <= 0.0 {
        return 0;
    }

    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (kids, w) in weights.iter().enumerate() {
        cumulative += weight(*w);
        if draw < cumulative {
            return kids as u32;
        }
    }
    (weights.len() - 1) as u32
}
