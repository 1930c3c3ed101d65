//! # Solution Calculations
//!
//! Each calculation module follows the pattern:
//!
//! - `*Input` - raw text fields exactly as typed into a form
//! - `*Result` - derived quantities, unrounded, JSON-serializable
//! - a typed function over `f64` (e.g. [`mass_fraction::mass_fraction`])
//! - `calculate(&input) -> Option<*Result>` - parse, validate, compute
//!
//! A calculation never fails loudly. Text that is not a number, or numbers
//! outside the formula's preconditions, produce `None` and the caller shows
//! nothing. Identical inputs always give bit-identical results.
//!
//! ## Available Calculations
//!
//! - [`mass_fraction`] - solute/water masses for a w% solution, optionally via a hydrate
//! - [`molar_concentration`] - solute mass for a solution of given molarity
//! - [`mole_fraction`] - mole fractions of a two-component mixture
//! - [`volume_fraction`] - φ from solute and solution volumes
//! - [`hydrate`] - anhydrous mass to crystal hydrate mass

pub mod hydrate;
pub mod mass_fraction;
pub mod molar_concentration;
pub mod mole_fraction;
pub mod volume_fraction;

use serde::{Deserialize, Serialize};

pub use hydrate::{HydrateInput, HydrateResult, HydrateSalt};
pub use mass_fraction::{MassFractionInput, MassFractionResult, SoluteMass};
pub use molar_concentration::{MolarConcentrationInput, MolarConcentrationResult};
pub use mole_fraction::{MoleFractionInput, MoleFractionResult};
pub use volume_fraction::{VolumeFractionInput, VolumeFractionResult};

/// Parse one form field into a finite number.
///
/// Surrounding whitespace is ignored; anything else that is not a complete
/// decimal number (including `NaN` and infinities) gives `None`.
pub fn parse_input(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Any of the calculator scenarios, tagged for JSON.
///
/// ## JSON Example
///
/// ```json
/// { "type": "VolumeFraction", "solute_volume_ml": "50", "solution_volume_ml": "500" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationInput {
    MassFraction(MassFractionInput),
    MolarConcentration(MolarConcentrationInput),
    MoleFraction(MoleFractionInput),
    VolumeFraction(VolumeFractionInput),
    Hydrate(HydrateInput),
}

/// Result of whichever scenario was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    MassFraction(MassFractionResult),
    MolarConcentration(MolarConcentrationResult),
    MoleFraction(MoleFractionResult),
    VolumeFraction(VolumeFractionResult),
    Hydrate(HydrateResult),
}

impl CalculationInput {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationInput::MassFraction(_) => "MassFraction",
            CalculationInput::MolarConcentration(_) => "MolarConcentration",
            CalculationInput::MoleFraction(_) => "MoleFraction",
            CalculationInput::VolumeFraction(_) => "VolumeFraction",
            CalculationInput::Hydrate(_) => "Hydrate",
        }
    }
}

/// Run the scenario described by `input`.
pub fn calculate(input: &CalculationInput) -> Option<CalculationOutput> {
    match input {
        CalculationInput::MassFraction(i) => mass_fraction::calculate(i).map(CalculationOutput::MassFraction),
        CalculationInput::MolarConcentration(i) => {
            molar_concentration::calculate(i).map(CalculationOutput::MolarConcentration)
        }
        CalculationInput::MoleFraction(i) => mole_fraction::calculate(i).map(CalculationOutput::MoleFraction),
        CalculationInput::VolumeFraction(i) => volume_fraction::calculate(i).map(CalculationOutput::VolumeFraction),
        CalculationInput::Hydrate(i) => hydrate::calculate(i).map(CalculationOutput::Hydrate),
    }
}
