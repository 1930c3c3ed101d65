//! # Reagent Catalog
//!
//! Static reference data used to fill the "pick from list" side of the
//! add-to-inventory form. Nothing here is user-mutable or persisted.
//!
//! ## Lists
//!
//! - [`predefined`] - a short hand-curated list with known defaults
//! - [`mandatory`] - the school's required reagent list, classified by name
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::catalog::{find_reagent, ReagentState};
//!
//! let naoh = find_reagent("naoh").unwrap();
//! assert_eq!(naoh.default_state, ReagentState::Dry);
//! ```

pub mod mandatory;
pub mod predefined;

pub use mandatory::{classify, mandatory_reagents, InorganicSubcategory, MandatoryReagent};
pub use predefined::{PredefinedReagent, PREDEFINED_REAGENTS};

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};
use crate::units::Unit;

/// Broad chemical class of a reagent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReagentCategory {
    Inorganic,
    Organic,
}

impl ReagentCategory {
    pub const ALL: [ReagentCategory; 2] = [ReagentCategory::Inorganic, ReagentCategory::Organic];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReagentCategory::Inorganic => "Неорганические",
            ReagentCategory::Organic => "Органические",
        }
    }
}

impl std::fmt::Display for ReagentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Physical form a reagent is stocked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReagentState {
    Dry,
    Liquid,
    Solution,
}

impl ReagentState {
    /// All states for UI selection
    pub const ALL: [ReagentState; 3] = [ReagentState::Dry, ReagentState::Liquid, ReagentState::Solution];

    /// Stock unit: grams for dry reagents, milliliters otherwise
    pub fn unit(&self) -> Unit {
        match self {
            ReagentState::Dry => Unit::Grams,
            ReagentState::Liquid | ReagentState::Solution => Unit::Milliliters,
        }
    }

    /// Quantity below which stock counts as low (g or ml)
    pub fn low_stock_threshold(&self) -> f64 {
        match self {
            ReagentState::Dry => 50.0,
            ReagentState::Liquid => 100.0,
            ReagentState::Solution => 200.0,
        }
    }

    /// Get the code string used in JSON
    pub fn code(&self) -> &'static str {
        match self {
            ReagentState::Dry => "dry",
            ReagentState::Liquid => "liquid",
            ReagentState::Solution => "solution",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> LabResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "dry" | "d" | "сухое" => Ok(ReagentState::Dry),
            "liquid" | "l" | "жидкость" => Ok(ReagentState::Liquid),
            "solution" | "s" | "sol" | "раствор" => Ok(ReagentState::Solution),
            _ => Err(LabError::invalid_input("state", s, "Expected dry, liquid or solution")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReagentState::Dry => "Сухое",
            ReagentState::Liquid => "Жидкость",
            ReagentState::Solution => "Раствор",
        }
    }
}

impl std::fmt::Display for ReagentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Common view of an entry from either list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: ReagentCategory,
    pub default_state: ReagentState,
}

impl CatalogEntry<'_> {
    pub fn default_unit(&self) -> Unit {
        self.default_state.unit()
    }
}

/// Look up a catalog entry by id across both lists.
///
/// Custom reagents (`custom_*` ids) are never found here.
pub fn find_reagent(id: &str) -> Option<CatalogEntry<'static>> {
    if let Some(r) = PREDEFINED_REAGENTS.iter().find(|r| r.id == id) {
        return Some(CatalogEntry {
            id: r.id,
            name: r.name,
            category: r.category,
            default_state: r.default_state,
        });
    }
    mandatory_reagents().iter().find(|r| r.id == id).map(|r| CatalogEntry {
        id: &r.id,
        name: &r.name,
        category: r.category,
        default_state: r.default_state,
    })
}

/// Mandatory reagents of one category, sorted by name
pub fn mandatory_by_category(category: ReagentCategory) -> Vec<&'static MandatoryReagent> {
    let mut list: Vec<_> = mandatory_reagents().iter().filter(|r| r.category == category).collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

/// Inorganic mandatory reagents grouped by subcategory.
///
/// Groups are ordered by subcategory name, entries by reagent name.
pub fn inorganic_by_subcategory() -> Vec<(InorganicSubcategory, Vec<&'static MandatoryReagent>)> {
    let mut groups: Vec<(InorganicSubcategory, Vec<&'static MandatoryReagent>)> = Vec::new();
    for reagent in mandatory_by_category(ReagentCategory::Inorganic) {
        let sub = reagent.subcategory.unwrap_or(InorganicSubcategory::Miscellaneous);
        match groups.iter_mut().find(|(s, _)| *s == sub) {
            Some((_, members)) => members.push(reagent),
            None => groups.push((sub, vec![reagent])),
        }
    }
    groups.sort_by(|a, b| a.0.display_name().cmp(b.0.display_name()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_units() {
        assert_eq!(ReagentState::Dry.unit(), Unit::Grams);
        assert_eq!(ReagentState::Liquid.unit(), Unit::Milliliters);
        assert_eq!(ReagentState::Solution.unit(), Unit::Milliliters);
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(serde_json::to_string(&ReagentState::Solution).unwrap(), "\"solution\"");
        let cat: ReagentCategory = serde_json::from_str("\"organic\"").unwrap();
        assert_eq!(cat, ReagentCategory::Organic);
    }

    #[test]
    fn test_state_codes_parse_and_match_json() {
        for state in ReagentState::ALL {
            assert_eq!(ReagentState::from_str_flexible(state.code()).unwrap(), state);
            assert_eq!(serde_json::to_string(&state).unwrap(), format!("\"{}\"", state.code()));
        }
    }

    #[test]
    fn test_state_from_str_flexible() {
        assert_eq!(ReagentState::from_str_flexible(" Liquid ").unwrap(), ReagentState::Liquid);
        assert_eq!(ReagentState::from_str_flexible("раствор").unwrap(), ReagentState::Solution);
        assert!(ReagentState::from_str_flexible("gas").is_err());
    }

    #[test]
    fn test_find_reagent_in_both_lists() {
        let predefined = find_reagent("cuso4_5h2o").unwrap();
        assert_eq!(predefined.default_unit(), Unit::Grams);

        let mandatory = find_reagent("mand_0").unwrap();
        assert_eq!(mandatory.name, "Суперфосфат двойной гранулированный");

        assert!(find_reagent("custom_1700000000000").is_none());
    }

    #[test]
    fn test_inorganic_grouping_is_sorted() {
        let groups = inorganic_by_subcategory();
        assert!(!groups.is_empty());
        for pair in groups.windows(2) {
            assert!(pair[0].0.display_name() <= pair[1].0.display_name());
        }
        for (_, members) in &groups {
            for pair in members.windows(2) {
                assert!(pair[0].name <= pair[1].name);
            }
        }
    }

    #[test]
    fn test_category_split_covers_everything() {
        let inorganic = mandatory_by_category(ReagentCategory::Inorganic).len();
        let organic = mandatory_by_category(ReagentCategory::Organic).len();
        assert_eq!(inorganic + organic, mandatory_reagents().len());
    }
}
