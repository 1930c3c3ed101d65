//! # Mole Fraction
//!
//! Composition of a two-component mixture from the masses and molar masses
//! of solute and solvent. This answers a different question than
//! [`super::molar_concentration`] (what is in a mixture, rather than how to
//! prepare one) and is kept as its own calculation.
//!
//! ```text
//! n = m / M
//! x(solute)  = n(solute) / (n(solute) + n(solvent))
//! x(solvent) = 1 − x(solute)
//! ```

use serde::{Deserialize, Serialize};

use super::parse_input;
use crate::units::WATER_MOLAR_MASS;

/// Raw text input for the mole fraction calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleFractionInput {
    pub solute_mass_g: String,
    pub solute_molar_mass: String,
    pub solvent_mass_g: String,
    pub solvent_molar_mass: String,
}

impl Default for MoleFractionInput {
    /// Empty fields with water pre-filled as the solvent
    fn default() -> Self {
        MoleFractionInput {
            solute_mass_g: String::new(),
            solute_molar_mass: String::new(),
            solvent_mass_g: String::new(),
            solvent_molar_mass: WATER_MOLAR_MASS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleFractionResult {
    pub solute_moles: f64,
    pub solvent_moles: f64,
    /// x(solute), dimensionless
    pub solute_fraction: f64,
    /// x(solvent), dimensionless
    pub solvent_fraction: f64,
}

/// Returns `None` when a molar mass is not positive or the mixture holds no
/// moles at all.
pub fn mole_fraction(
    solute_mass_g: f64,
    solute_molar_mass: f64,
    solvent_mass_g: f64,
    solvent_molar_mass: f64,
) -> Option<MoleFractionResult> {
    if !(solute_molar_mass > 0.0) || !(solvent_molar_mass > 0.0) {
        return None;
    }
    let solute_moles = solute_mass_g / solute_molar_mass;
    let solvent_moles = solvent_mass_g / solvent_molar_mass;
    let total = solute_moles + solvent_moles;
    if !(total > 0.0) || !total.is_finite() {
        log::debug!("mole fraction rejected: total moles = {}", total);
        return None;
    }
    let solute_fraction = solute_moles / total;
    Some(MoleFractionResult {
        solute_moles,
        solvent_moles,
        solute_fraction,
        solvent_fraction: 1.0 - solute_fraction,
    })
}

/// Parse the raw input and run [`mole_fraction`].
pub fn calculate(input: &MoleFractionInput) -> Option<MoleFractionResult> {
    mole_fraction(
        parse_input(&input.solute_mass_g)?,
        parse_input(&input.solute_molar_mass)?,
        parse_input(&input.solvent_mass_g)?,
        parse_input(&input.solvent_molar_mass)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_salt_in_water() {
        // 10 g NaCl in 100 g water
        let result = mole_fraction(10.0, 58.5, 100.0, WATER_MOLAR_MASS).unwrap();
        assert_relative_eq!(result.solute_moles, 10.0 / 58.5, epsilon = 1e-12);
        assert_relative_eq!(result.solute_fraction, 0.02987, epsilon = 1e-4);
        assert_relative_eq!(result.solute_fraction + result.solvent_fraction, 1.0, epsilon = 1e-12);
        assert_eq!(crate::units::format_fixed(result.solute_fraction, 4), "0.0299");
    }

    #[test]
    fn test_rejects_bad_molar_mass() {
        assert!(mole_fraction(10.0, 0.0, 100.0, 18.015).is_none());
        assert!(mole_fraction(10.0, 58.5, 100.0, -1.0).is_none());
    }

    #[test]
    fn test_rejects_empty_mixture() {
        assert!(mole_fraction(0.0, 58.5, 0.0, 18.015).is_none());
    }

    #[test]
    fn test_default_input_prefills_water() {
        let mut input = MoleFractionInput::default();
        assert_eq!(input.solvent_molar_mass, "18.015");
        assert!(calculate(&input).is_none());

        input.solute_mass_g = "10".to_string();
        input.solute_molar_mass = "58.5".to_string();
        input.solvent_mass_g = "100".to_string();
        assert!(calculate(&input).is_some());
    }
}
