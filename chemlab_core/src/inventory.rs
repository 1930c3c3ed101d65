//! # Inventory Items
//!
//! One stock entry of a reagent. Quantity is kept in the unit implied by the
//! physical state (grams for dry, milliliters for liquids and solutions), so
//! the unit is never stored independently of the state.
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::catalog::{ReagentCategory, ReagentState};
//! use chemlab_core::inventory::NewInventoryItem;
//!
//! let item = NewInventoryItem::custom("Хлорид натрия", ReagentCategory::Inorganic, ReagentState::Dry, 49.0)
//!     .with_location("Шкаф 1, Полка 2");
//! assert!(item.validate().is_ok());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{CatalogEntry, ReagentCategory, ReagentState};
use crate::errors::{LabError, LabResult};
use crate::units::Unit;

/// A reagent in stock.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "5f0c1e7a-8a4b-4d2b-9a53-0c7d2f1e9b11",
///   "reagentId": "nacl",
///   "name": "Хлорид натрия",
///   "category": "inorganic",
///   "state": "dry",
///   "quantity": 250.0,
///   "unit": "g",
///   "location": "Шкаф 1"
/// }
/// ```
///
/// `unit` is written for readers of the stored document and ignored when
/// reading it back; it is always derived from `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "InventoryRecord", from = "InventoryRecord")]
pub struct InventoryItem {
    /// Assigned on creation, never changes
    pub id: Uuid,
    /// Catalog id (`nacl`, `mand_12`, `custom_<millis>`); not checked
    pub reagent_id: String,
    pub name: String,
    pub category: ReagentCategory,
    pub state: ReagentState,
    /// Amount in stock, in [`InventoryItem::unit`]
    pub quantity: f64,
    /// Percent, only kept for solutions
    pub concentration: Option<f64>,
    /// Free text such as "Шкаф 1, Полка 2"
    pub location: Option<String>,
}

impl InventoryItem {
    /// Stock unit implied by the state
    pub fn unit(&self) -> Unit {
        self.state.unit()
    }

    /// Below the state's low-stock threshold (strict comparison)
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.state.low_stock_threshold()
    }

    /// Drop fields that cannot apply to the current state
    fn normalize(&mut self) {
        if self.state != ReagentState::Solution {
            self.concentration = None;
        }
    }

    fn validate(&self) -> LabResult<()> {
        validate_fields(&self.name, self.state, self.quantity, self.concentration)
    }
}

/// Serialized shape of [`InventoryItem`]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryRecord {
    id: Uuid,
    reagent_id: String,
    name: String,
    category: ReagentCategory,
    state: ReagentState,
    quantity: f64,
    #[serde(default)]
    unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    concentration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl From<InventoryItem> for InventoryRecord {
    fn from(item: InventoryItem) -> Self {
        InventoryRecord {
            unit: Some(item.unit()),
            id: item.id,
            reagent_id: item.reagent_id,
            name: item.name,
            category: item.category,
            state: item.state,
            quantity: item.quantity,
            concentration: item.concentration,
            location: item.location,
        }
    }
}

impl From<InventoryRecord> for InventoryItem {
    fn from(record: InventoryRecord) -> Self {
        let mut item = InventoryItem {
            id: record.id,
            reagent_id: record.reagent_id,
            name: record.name,
            category: record.category,
            state: record.state,
            quantity: record.quantity,
            concentration: record.concentration,
            location: record.location,
        };
        item.normalize();
        item
    }
}

fn validate_fields(name: &str, state: ReagentState, quantity: f64, concentration: Option<f64>) -> LabResult<()> {
    if name.trim().is_empty() {
        return Err(LabError::invalid_input("name", name, "Reagent name is required"));
    }
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(LabError::invalid_input(
            "quantity",
            quantity.to_string(),
            "Quantity must be a non-negative number",
        ));
    }
    if state == ReagentState::Solution {
        if let Some(c) = concentration {
            if !(0.0..=100.0).contains(&c) {
                return Err(LabError::invalid_input(
                    "concentration",
                    c.to_string(),
                    "Concentration must be between 0 and 100 %",
                ));
            }
        }
    }
    Ok(())
}

/// Everything needed to add an item; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub reagent_id: String,
    pub name: String,
    pub category: ReagentCategory,
    pub state: ReagentState,
    pub quantity: f64,
    pub concentration: Option<f64>,
    pub location: Option<String>,
}

impl NewInventoryItem {
    /// Item picked from the catalog; stocked in the entry's default state.
    pub fn from_catalog(entry: &CatalogEntry<'_>, quantity: f64) -> Self {
        NewInventoryItem {
            reagent_id: entry.id.to_string(),
            name: entry.name.to_string(),
            category: entry.category,
            state: entry.default_state,
            quantity,
            concentration: None,
            location: None,
        }
    }

    /// Item typed in by hand, given a `custom_<millis>` reagent id.
    pub fn custom(name: impl Into<String>, category: ReagentCategory, state: ReagentState, quantity: f64) -> Self {
        NewInventoryItem {
            reagent_id: format!("custom_{}", Utc::now().timestamp_millis()),
            name: name.into(),
            category,
            state,
            quantity,
            concentration: None,
            location: None,
        }
    }

    pub fn with_state(mut self, state: ReagentState) -> Self {
        self.state = state;
        self
    }

    pub fn with_concentration(mut self, concentration: f64) -> Self {
        self.concentration = Some(concentration);
        self
    }

    /// Blank text counts as no location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = if location.trim().is_empty() { None } else { Some(location) };
        self
    }

    pub fn validate(&self) -> LabResult<()> {
        validate_fields(&self.name, self.state, self.quantity, self.concentration)
    }

    /// Build the stored item under `id`.
    pub(crate) fn into_item(self, id: Uuid) -> LabResult<InventoryItem> {
        self.validate()?;
        let mut item = InventoryItem {
            id,
            reagent_id: self.reagent_id,
            name: self.name,
            category: self.category,
            state: self.state,
            quantity: self.quantity,
            concentration: self.concentration,
            location: self.location,
        };
        item.normalize();
        Ok(item)
    }
}

/// Partial update of an inventory item. `None` leaves a field as is.
///
/// For the optional fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryPatch {
    pub reagent_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<ReagentCategory>,
    pub state: Option<ReagentState>,
    pub quantity: Option<f64>,
    pub concentration: Option<Option<f64>>,
    pub location: Option<Option<String>>,
}

impl InventoryPatch {
    pub fn quantity(quantity: f64) -> Self {
        InventoryPatch {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// Merge into `item`. On a validation error `item` is left unchanged.
    pub(crate) fn apply(self, item: &mut InventoryItem) -> LabResult<()> {
        let mut updated = item.clone();
        if let Some(reagent_id) = self.reagent_id {
            updated.reagent_id = reagent_id;
        }
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(state) = self.state {
            updated.state = state;
        }
        if let Some(quantity) = self.quantity {
            updated.quantity = quantity;
        }
        if let Some(concentration) = self.concentration {
            updated.concentration = concentration;
        }
        if let Some(location) = self.location {
            updated.location = location;
        }
        updated.validate()?;
        updated.normalize();
        *item = updated;
        Ok(())
    }
}
