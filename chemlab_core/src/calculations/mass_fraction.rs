//! # Mass Fraction Preparation
//!
//! How much solute and water to weigh out for a solution of given mass and
//! mass fraction.
//!
//! ```text
//! m(solute)  = m(solution) × w / 100
//! m(solvent) = m(solution) − m(solute)
//! ```
//!
//! When the solute is taken as a crystal hydrate, the solute mass is
//! recalculated to the hydrate and the water of crystallization is
//! subtracted from the water to add:
//!
//! ```text
//! m(hydrate) = m(solute) × M(hydrate) / M(anhydrous)
//! m(solvent) = m(solution) − m(hydrate)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::calculations::mass_fraction::mass_fraction;
//!
//! let result = mass_fraction(200.0, 15.0).unwrap();
//! assert!((result.solute.mass_g() - 30.0).abs() < 1e-9);
//! assert!((result.solvent_mass_g - 170.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::hydrate::HydrateSalt;
use super::parse_input;

/// Raw text parameters of the hydrate option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HydrateOption {
    /// Molar mass of the anhydrous salt (g/mol)
    pub anhydrous_molar_mass: String,
    /// Water molecules per formula unit
    pub water_count: String,
}

/// Raw text input for the mass fraction calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "solution_mass_g": "200",
///   "mass_fraction_pct": "15",
///   "hydrate": { "anhydrous_molar_mass": "159.6", "water_count": "5" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassFractionInput {
    /// Mass of the solution to prepare (g)
    pub solution_mass_g: String,
    /// Target mass fraction (%)
    pub mass_fraction_pct: String,
    /// Set when the solute is weighed out as a crystal hydrate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrate: Option<HydrateOption>,
}

/// What the solute figure refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum SoluteMass {
    /// Mass of the anhydrous substance
    Anhydrous { mass_g: f64 },
    /// Mass of crystal hydrate to weigh out
    Hydrate {
        mass_g: f64,
        /// Anhydrous substance contained in that hydrate (g)
        anhydrous_mass_g: f64,
        /// Molar mass of the hydrate (g/mol)
        hydrate_molar_mass: f64,
    },
}

impl SoluteMass {
    /// Mass to weigh out, whichever form it is
    pub fn mass_g(&self) -> f64 {
        match self {
            SoluteMass::Anhydrous { mass_g } => *mass_g,
            SoluteMass::Hydrate { mass_g, .. } => *mass_g,
        }
    }

    pub fn is_hydrate(&self) -> bool {
        matches!(self, SoluteMass::Hydrate { .. })
    }
}

/// Results from the mass fraction calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassFractionResult {
    /// Substance to weigh out
    pub solute: SoluteMass,
    /// Water to add (g)
    pub solvent_mass_g: f64,
}

fn valid_fraction(solution_mass_g: f64, mass_fraction_pct: f64) -> bool {
    if !solution_mass_g.is_finite() || !mass_fraction_pct.is_finite() {
        return false;
    }
    if mass_fraction_pct <= 0.0 || mass_fraction_pct > 100.0 {
        log::debug!("mass fraction rejected: w = {} outside (0, 100]", mass_fraction_pct);
        return false;
    }
    true
}

/// Solute and solvent masses for an anhydrous solute.
///
/// Returns `None` unless `0 < w ≤ 100`.
pub fn mass_fraction(solution_mass_g: f64, mass_fraction_pct: f64) -> Option<MassFractionResult> {
    if !valid_fraction(solution_mass_g, mass_fraction_pct) {
        return None;
    }
    let solute_mass_g = solution_mass_g * mass_fraction_pct / 100.0;
    Some(MassFractionResult {
        solute: SoluteMass::Anhydrous { mass_g: solute_mass_g },
        solvent_mass_g: solution_mass_g - solute_mass_g,
    })
}

/// Solute and solvent masses when the solute is weighed out as a hydrate.
///
/// Returns `None` unless `0 < w ≤ 100` and `salt` passes
/// [`HydrateSalt::new`].
pub fn mass_fraction_with_hydrate(
    solution_mass_g: f64,
    mass_fraction_pct: f64,
    anhydrous_molar_mass: f64,
    water_count: f64,
) -> Option<MassFractionResult> {
    if !valid_fraction(solution_mass_g, mass_fraction_pct) {
        return None;
    }
    let salt = HydrateSalt::new(anhydrous_molar_mass, water_count)?;
    let anhydrous_mass_g = solution_mass_g * mass_fraction_pct / 100.0;
    let hydrate_mass_g = salt.hydrate_mass_for(anhydrous_mass_g);
    Some(MassFractionResult {
        solute: SoluteMass::Hydrate {
            mass_g: hydrate_mass_g,
            anhydrous_mass_g,
            hydrate_molar_mass: salt.hydrate_molar_mass(),
        },
        solvent_mass_g: solution_mass_g - hydrate_mass_g,
    })
}

/// Parse the raw input and run the matching calculation.
pub fn calculate(input: &MassFractionInput) -> Option<MassFractionResult> {
    let solution_mass_g = parse_input(&input.solution_mass_g)?;
    let mass_fraction_pct = parse_input(&input.mass_fraction_pct)?;
    match &input.hydrate {
        None => mass_fraction(solution_mass_g, mass_fraction_pct),
        Some(option) => mass_fraction_with_hydrate(
            solution_mass_g,
            mass_fraction_pct,
            parse_input(&option.anhydrous_molar_mass)?,
            parse_input(&option.water_count)?,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn text_input(m: &str, w: &str) -> MassFractionInput {
        MassFractionInput {
            solution_mass_g: m.to_string(),
            mass_fraction_pct: w.to_string(),
            hydrate: None,
        }
    }

    #[test]
    fn test_fifteen_percent_solution() {
        let result = mass_fraction(200.0, 15.0).unwrap();
        assert_relative_eq!(result.solute.mass_g(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(result.solvent_mass_g, 170.0, epsilon = 1e-9);
        assert!(!result.solute.is_hydrate());
    }

    #[test]
    fn test_mass_balance() {
        for &m in &[0.5, 1.0, 37.3, 200.0, 1234.5] {
            for &w in &[0.01, 1.0, 15.0, 33.3, 99.9, 100.0] {
                let result = mass_fraction(m, w).unwrap();
                assert!((result.solute.mass_g() + result.solvent_mass_g - m).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(mass_fraction(200.0, 0.0).is_none());
        assert!(mass_fraction(200.0, -5.0).is_none());
        assert!(mass_fraction(200.0, 100.0001).is_none());
        assert!(mass_fraction(200.0, 100.0).is_some());
    }

    #[test]
    fn test_solution_mass_not_range_checked() {
        let result = mass_fraction(-100.0, 10.0).unwrap();
        assert_relative_eq!(result.solute.mass_g(), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_text_input() {
        let result = calculate(&text_input("200", "15")).unwrap();
        assert_eq!(crate::units::format_fixed(result.solute.mass_g(), 2), "30.00");
        assert_eq!(crate::units::format_fixed(result.solvent_mass_g, 2), "170.00");

        assert!(calculate(&text_input("abc", "15")).is_none());
        assert!(calculate(&text_input("200", "")).is_none());
        assert!(calculate(&text_input("200", "150")).is_none());
    }

    #[test]
    fn test_hydrate_option() {
        // 100 g of 10% CuSO4 from CuSO4·5H2O
        let result = mass_fraction_with_hydrate(100.0, 10.0, 159.6, 5.0).unwrap();
        match &result.solute {
            SoluteMass::Hydrate {
                mass_g,
                anhydrous_mass_g,
                hydrate_molar_mass,
            } => {
                assert_relative_eq!(*anhydrous_mass_g, 10.0, epsilon = 1e-9);
                assert_relative_eq!(*hydrate_molar_mass, 249.675, epsilon = 1e-9);
                assert_relative_eq!(*mass_g, 15.6438, epsilon = 1e-4);
            }
            other => panic!("expected hydrate form, got {:?}", other),
        }
        assert_relative_eq!(result.solvent_mass_g, 100.0 - result.solute.mass_g(), epsilon = 1e-9);
    }

    #[test]
    fn test_hydrate_option_requires_positive_salt() {
        assert!(mass_fraction_with_hydrate(100.0, 10.0, 0.0, 5.0).is_none());
        assert!(mass_fraction_with_hydrate(100.0, 10.0, 159.6, 0.0).is_none());
        assert!(mass_fraction_with_hydrate(100.0, 0.0, 159.6, 5.0).is_none());

        let mut input = text_input("100", "10");
        input.hydrate = Some(HydrateOption {
            anhydrous_molar_mass: "159.6".to_string(),
            water_count: "five".to_string(),
        });
        assert!(calculate(&input).is_none());
    }

    #[test]
    fn test_idempotent() {
        let a = mass_fraction_with_hydrate(250.0, 7.5, 142.04, 10.0).unwrap();
        let b = mass_fraction_with_hydrate(250.0, 7.5, 142.04, 10.0).unwrap();
        assert_eq!(a.solute.mass_g().to_bits(), b.solute.mass_g().to_bits());
        assert_eq!(a.solvent_mass_g.to_bits(), b.solvent_mass_g.to_bits());
    }

    #[test]
    fn test_result_serialization_tags_form() {
        let result = mass_fraction(200.0, 15.0).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"form\":\"anhydrous\""));
        let roundtrip: MassFractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
