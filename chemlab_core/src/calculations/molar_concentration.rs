//! # Molar Concentration
//!
//! Mass of solute needed for a solution of given volume and molarity:
//!
//! ```text
//! n(solute) = C × V / 1000
//! m(solute) = n(solute) × M
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::calculations::molar_concentration::molar_concentration;
//!
//! // 1 L of 1 M NaCl
//! let result = molar_concentration(1000.0, 1.0, 58.5).unwrap();
//! assert!((result.solute_mass_g - 58.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::parse_input;
use crate::units::ML_PER_L;

/// Raw text input for the molar concentration calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MolarConcentrationInput {
    /// Volume of solution to prepare (ml)
    pub volume_ml: String,
    /// Target concentration (mol/L)
    pub concentration_mol_per_l: String,
    /// Molar mass of the solute (g/mol)
    pub molar_mass: String,
}

/// Results from the molar concentration calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolarConcentrationResult {
    /// Amount of solute (mol)
    pub solute_moles: f64,
    /// Mass of solute to weigh out (g)
    pub solute_mass_g: f64,
}

/// Returns `None` unless all three inputs are positive.
pub fn molar_concentration(
    volume_ml: f64,
    concentration_mol_per_l: f64,
    molar_mass: f64,
) -> Option<MolarConcentrationResult> {
    if !(volume_ml > 0.0) || !(concentration_mol_per_l > 0.0) || !(molar_mass > 0.0) {
        return None;
    }
    if !volume_ml.is_finite() || !concentration_mol_per_l.is_finite() || !molar_mass.is_finite() {
        return None;
    }
    let solute_moles = concentration_mol_per_l * (volume_ml / ML_PER_L);
    Some(MolarConcentrationResult {
        solute_moles,
        solute_mass_g: solute_moles * molar_mass,
    })
}

/// Parse the raw input and run [`molar_concentration`].
pub fn calculate(input: &MolarConcentrationInput) -> Option<MolarConcentrationResult> {
    molar_concentration(
        parse_input(&input.volume_ml)?,
        parse_input(&input.concentration_mol_per_l)?,
        parse_input(&input.molar_mass)?,
    )
}
