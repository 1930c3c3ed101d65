//! # Volume Fraction
//!
//! ```text
//! φ = V(solute) / V(solution) × 100
//! ```

use serde::{Deserialize, Serialize};

use super::parse_input;

/// Raw text input for the volume fraction calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeFractionInput {
    /// Volume of dissolved substance (ml)
    pub solute_volume_ml: String,
    /// Volume of the whole solution (ml)
    pub solution_volume_ml: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeFractionResult {
    /// φ (%)
    pub volume_fraction_pct: f64,
}

/// Returns `None` unless `V(solution) > 0` and `V(solute) ≤ V(solution)`.
pub fn volume_fraction(solute_volume_ml: f64, solution_volume_ml: f64) -> Option<VolumeFractionResult> {
    if !solute_volume_ml.is_finite() || !solution_volume_ml.is_finite() {
        return None;
    }
    if solution_volume_ml <= 0.0 || solute_volume_ml > solution_volume_ml {
        return None;
    }
    Some(VolumeFractionResult {
        volume_fraction_pct: solute_volume_ml / solution_volume_ml * 100.0,
    })
}

/// Parse the raw input and run [`volume_fraction`].
pub fn calculate(input: &VolumeFractionInput) -> Option<VolumeFractionResult> {
    volume_fraction(
        parse_input(&input.solute_volume_ml)?,
        parse_input(&input.solution_volume_ml)?,
    )
}
