//! # Units and Presentation
//!
//! The lab only deals in two stock units: grams for dry reagents and
//! milliliters for liquids and solutions. Calculation results are plain
//! `f64` fields with the unit in the field name (`solute_mass_g`,
//! `volume_ml`); this module holds the shared constants and the fixed-point
//! formatting used when a result is shown to a person.
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::units::{format_fixed, Unit, MASS_DECIMALS};
//!
//! assert_eq!(format_fixed(15.6390977, MASS_DECIMALS), "15.64");
//! assert_eq!(Unit::Grams.symbol(), "g");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Molar mass of water in g/mol, used for hydrate and mole-fraction work
pub const WATER_MOLAR_MASS: f64 = 18.015;

/// Milliliters per liter
pub const ML_PER_L: f64 = 1000.0;

/// Decimal places for masses, percentages and molar masses
pub const MASS_DECIMALS: usize = 2;

/// Decimal places for mole fractions
pub const MOLE_FRACTION_DECIMALS: usize = 4;

/// Stock unit of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "ml")]
    Milliliters,
}

impl Unit {
    /// Short symbol as printed next to a quantity
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Milliliters => "ml",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Render `value` with exactly `decimals` places.
///
/// Rounding happens here and only here; calculations keep full precision.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}
