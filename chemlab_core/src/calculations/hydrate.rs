//! # Hydrate Conversion
//!
//! Recalculates a mass of anhydrous salt into the mass of its crystal
//! hydrate, e.g. how much CuSO₄·5H₂O to weigh out to get 10 g of CuSO₄.
//!
//! ```text
//! M(water)   = 18.015 × n
//! M(hydrate) = M(anhydrous) + M(water)
//! m(hydrate) = m(anhydrous) × M(hydrate) / M(anhydrous)
//! ```
//!
//! The same [`HydrateSalt`] is used by the hydrate option of the mass
//! fraction calculation, so both paths accept and reject the same salts:
//! anhydrous molar mass and water count must both be positive.
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::calculations::hydrate::hydrate;
//!
//! let result = hydrate(10.0, 159.6, 5.0).unwrap();
//! assert!((result.hydrate_molar_mass - 249.675).abs() < 1e-9);
//! assert!((result.hydrate_mass_g - 15.64).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use super::parse_input;
use crate::units::WATER_MOLAR_MASS;

/// A crystal hydrate described by its anhydrous part and water count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrateSalt {
    /// Molar mass of the anhydrous salt (g/mol)
    pub anhydrous_molar_mass: f64,
    /// Molecules of water of crystallization per formula unit
    pub water_count: f64,
}

impl HydrateSalt {
    /// Returns `None` unless both parameters are positive.
    pub fn new(anhydrous_molar_mass: f64, water_count: f64) -> Option<Self> {
        // Written as negated comparisons so NaN is rejected too
        if !(anhydrous_molar_mass > 0.0) || !(water_count > 0.0) {
            log::debug!(
                "hydrate rejected: M = {}, n = {} (both must be positive)",
                anhydrous_molar_mass,
                water_count
            );
            return None;
        }
        Some(HydrateSalt {
            anhydrous_molar_mass,
            water_count,
        })
    }

    /// n × M(H₂O)
    pub fn water_molar_mass(&self) -> f64 {
        WATER_MOLAR_MASS * self.water_count
    }

    pub fn hydrate_molar_mass(&self) -> f64 {
        self.anhydrous_molar_mass + self.water_molar_mass()
    }

    /// Mass of hydrate that carries `anhydrous_mass_g` of anhydrous salt
    pub fn hydrate_mass_for(&self, anhydrous_mass_g: f64) -> f64 {
        anhydrous_mass_g * self.hydrate_molar_mass() / self.anhydrous_molar_mass
    }
}

/// Raw text input for the standalone hydrate conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HydrateInput {
    /// Mass of anhydrous salt (g)
    pub anhydrous_mass_g: String,
    /// Molar mass of anhydrous salt (g/mol)
    pub anhydrous_molar_mass: String,
    /// Water molecules per formula unit
    pub water_count: String,
}

/// Results of a hydrate conversion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "anhydrous_mass_g": 10.0,
///   "water_molar_mass": 90.075,
///   "hydrate_molar_mass": 249.675,
///   "hydrate_mass_g": 15.6438
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrateResult {
    pub anhydrous_mass_g: f64,
    /// n × 18.015 (g/mol)
    pub water_molar_mass: f64,
    /// Molar mass of the hydrate (g/mol)
    pub hydrate_molar_mass: f64,
    /// Mass of hydrate to weigh out (g)
    pub hydrate_mass_g: f64,
}

/// Convert an anhydrous mass into the equivalent hydrate mass.
pub fn hydrate(anhydrous_mass_g: f64, anhydrous_molar_mass: f64, water_count: f64) -> Option<HydrateResult> {
    if !anhydrous_mass_g.is_finite() {
        return None;
    }
    let salt = HydrateSalt::new(anhydrous_molar_mass, water_count)?;
    Some(HydrateResult {
        anhydrous_mass_g,
        water_molar_mass: salt.water_molar_mass(),
        hydrate_molar_mass: salt.hydrate_molar_mass(),
        hydrate_mass_g: salt.hydrate_mass_for(anhydrous_mass_g),
    })
}

/// Parse the raw input and run [`hydrate`].
pub fn calculate(input: &HydrateInput) -> Option<HydrateResult> {
    hydrate(
        parse_input(&input.anhydrous_mass_g)?,
        parse_input(&input.anhydrous_molar_mass)?,
        parse_input(&input.water_count)?,
    )
}
