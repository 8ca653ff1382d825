//! Benefit unit data structures, canonical CSV loading and synthetic populations

mod data;
pub mod loader;
pub mod generator;

pub use data::{BenefitUnit, REQUIRED_FIELDS};
pub use loader::{load_units, load_units_from_reader};
pub use generator::{generate_population, PopulationParams};
