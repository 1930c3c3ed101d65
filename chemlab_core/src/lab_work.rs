//! # Lab Works
//!
//! A planned lab session: when it happens, how many student groups take
//! part, and what each group needs. Amounts are always per group; totals
//! are derived on demand and never stored.
//!
//! Reagent lines refer to inventory items by id only. Removing an inventory
//! item leaves the line in place, and it resolves to an unknown reagent when
//! read (see [`crate::consistency`]).
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::lab_work::NewLabWork;
//! use chrono::{TimeZone, Utc};
//!
//! let work = NewLabWork::new("Получение кислорода", Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap(), 15)
//!     .with_equipment("Пробирка", 2.0);
//! assert!(work.validate().is_ok());
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LabError, LabResult};

/// How far ahead a lab work counts as upcoming
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// One reagent a lab work draws from inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentLine {
    /// Weak reference to an [`crate::inventory::InventoryItem`]
    pub inventory_id: Uuid,
    /// Amount for one group, in the item's unit
    pub amount_per_group: f64,
}

/// Equipment is not tracked in inventory, only named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLine {
    pub name: String,
    pub amount_per_group: f64,
}

/// A planned lab session.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "0d9a2c4e-3f1b-4a57-8e0c-7b6d5a4f3e21",
///   "title": "Реакции ионного обмена",
///   "date": "2025-03-14T09:00:00Z",
///   "groupsCount": 15,
///   "reagentsNeeded": [{ "inventoryId": "5f0c1e7a-8a4b-4d2b-9a53-0c7d2f1e9b11", "amountPerGroup": 2 }],
///   "equipmentNeeded": [{ "name": "Пробирка", "amountPerGroup": 3 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabWork {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Number of student groups, at least one
    pub groups_count: u32,
    #[serde(default)]
    pub reagents_needed: Vec<ReagentLine>,
    #[serde(default)]
    pub equipment_needed: Vec<EquipmentLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LabWork {
    /// `amount_per_group × groups_count`
    pub fn total_amount(&self, amount_per_group: f64) -> f64 {
        amount_per_group * f64::from(self.groups_count)
    }

    /// Strictly after `now` and strictly before `now + 7 days`
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now && self.date < now + Duration::days(UPCOMING_WINDOW_DAYS)
    }

    /// Does any reagent line point at `inventory_id`?
    pub fn uses_inventory_item(&self, inventory_id: &Uuid) -> bool {
        self.reagents_needed.iter().any(|line| &line.inventory_id == inventory_id)
    }

    /// Drop reagent lines without a usable amount and equipment lines
    /// without a name or usable amount, as unfinished rows of the form.
    ///
    /// Keeps every stored amount finite, so the document always reloads.
    fn normalize(&mut self) {
        self.reagents_needed.retain(|line| usable_amount(line.amount_per_group));
        self.equipment_needed
            .retain(|line| !line.name.trim().is_empty() && usable_amount(line.amount_per_group));
    }

    fn validate(&self) -> LabResult<()> {
        validate_header(&self.title, self.groups_count)
    }
}

fn validate_header(title: &str, groups_count: u32) -> LabResult<()> {
    if title.trim().is_empty() {
        return Err(LabError::invalid_input("title", title, "Title is required"));
    }
    if groups_count == 0 {
        return Err(LabError::invalid_input(
            "groups_count",
            "0",
            "At least one group is required",
        ));
    }
    Ok(())
}

fn usable_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Everything needed to plan a lab work; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLabWork {
    pub title: String,
    pub date: DateTime<Utc>,
    pub groups_count: u32,
    pub reagents_needed: Vec<ReagentLine>,
    pub equipment_needed: Vec<EquipmentLine>,
    pub notes: Option<String>,
}

impl NewLabWork {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>, groups_count: u32) -> Self {
        NewLabWork {
            title: title.into(),
            date,
            groups_count,
            reagents_needed: Vec::new(),
            equipment_needed: Vec::new(),
            notes: None,
        }
    }

    pub fn with_reagent(mut self, inventory_id: Uuid, amount_per_group: f64) -> Self {
        self.reagents_needed.push(ReagentLine {
            inventory_id,
            amount_per_group,
        });
        self
    }

    pub fn with_equipment(mut self, name: impl Into<String>, amount_per_group: f64) -> Self {
        self.equipment_needed.push(EquipmentLine {
            name: name.into(),
            amount_per_group,
        });
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> LabResult<()> {
        validate_header(&self.title, self.groups_count)
    }

    /// Build the stored lab work under `id`; unfinished lines are dropped.
    pub(crate) fn into_lab_work(self, id: Uuid) -> LabResult<LabWork> {
        self.validate()?;
        let mut work = LabWork {
            id,
            title: self.title,
            date: self.date,
            groups_count: self.groups_count,
            reagents_needed: self.reagents_needed,
            equipment_needed: self.equipment_needed,
            notes: self.notes,
        };
        work.normalize();
        Ok(work)
    }
}

/// Partial update of a lab work. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabWorkPatch {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub groups_count: Option<u32>,
    pub reagents_needed: Option<Vec<ReagentLine>>,
    pub equipment_needed: Option<Vec<EquipmentLine>>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl LabWorkPatch {
    /// Merge into `work`. On a validation error `work` is left unchanged.
    ///
    /// Replacement lines go through the same filtering as on creation.
    pub(crate) fn apply(self, work: &mut LabWork) -> LabResult<()> {
        let mut updated = work.clone();
        if let Some(title) = self.title {
            updated.title = title;
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(groups_count) = self.groups_count {
            updated.groups_count = groups_count;
        }
        if let Some(reagents) = self.reagents_needed {
            updated.reagents_needed = reagents;
        }
        if let Some(equipment) = self.equipment_needed {
            updated.equipment_needed = equipment;
        }
        if let Some(notes) = self.notes {
            updated.notes = notes;
        }
        updated.validate()?;
        updated.normalize();
        *work = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn work_on(date: DateTime<Utc>) -> LabWork {
        NewLabWork::new("Качественные реакции", date, 15)
            .into_lab_work(Uuid::new_v4())
            .unwrap()
    }

    #[test]
    fn test_total_amount() {
        let work = work_on(at(14, 9));
        assert_eq!(work.total_amount(2.0), 30.0);
        assert_eq!(work.total_amount(0.5), 7.5);
    }

    #[test]
    fn test_upcoming_window_is_open_on_both_ends() {
        let now = at(10, 12);
        assert!(!work_on(now).is_upcoming(now));
        assert!(work_on(at(10, 13)).is_upcoming(now));
        assert!(work_on(at(17, 11)).is_upcoming(now));
        assert!(!work_on(at(17, 12)).is_upcoming(now));
        assert!(!work_on(at(9, 12)).is_upcoming(now));
    }

    #[test]
    fn test_unfinished_lines_dropped() {
        let kept = Uuid::new_v4();
        let work = NewLabWork::new("Титрование", at(14, 9), 10)
            .with_reagent(kept, 5.0)
            .with_reagent(Uuid::new_v4(), 0.0)
            .with_equipment("Бюретка", 1.0)
            .with_equipment("", 1.0)
            .with_equipment("Колба", -1.0)
            .into_lab_work(Uuid::new_v4())
            .unwrap();
        assert_eq!(work.reagents_needed.len(), 1);
        assert!(work.uses_inventory_item(&kept));
        assert_eq!(work.equipment_needed.len(), 1);
        assert_eq!(work.equipment_needed[0].name, "Бюретка");
    }

    #[test]
    fn test_validation() {
        assert!(NewLabWork::new("", at(14, 9), 15).validate().is_err());
        assert!(NewLabWork::new("Опыт", at(14, 9), 0).validate().is_err());
    }

    #[test]
    fn test_patch_merges_fields() {
        let mut work = work_on(at(14, 9));
        let patch = LabWorkPatch {
            groups_count: Some(12),
            notes: Some(Some("Перенесено".to_string())),
            ..Default::default()
        };
        patch.apply(&mut work).unwrap();
        assert_eq!(work.groups_count, 12);
        assert_eq!(work.title, "Качественные реакции");
        assert_eq!(work.notes.as_deref(), Some("Перенесено"));

        let bad = LabWorkPatch {
            groups_count: Some(0),
            ..Default::default()
        };
        assert!(bad.apply(&mut work).is_err());
        assert_eq!(work.groups_count, 12);
    }

    #[test]
    fn test_patch_drops_unfinished_lines() {
        let mut work = work_on(at(14, 9));
        let kept = Uuid::new_v4();
        let patch = LabWorkPatch {
            reagents_needed: Some(vec![
                ReagentLine {
                    inventory_id: Uuid::new_v4(),
                    amount_per_group: f64::NAN,
                },
                ReagentLine {
                    inventory_id: Uuid::new_v4(),
                    amount_per_group: f64::INFINITY,
                },
                ReagentLine {
                    inventory_id: kept,
                    amount_per_group: 2.5,
                },
            ]),
            equipment_needed: Some(vec![
                EquipmentLine {
                    name: "".to_string(),
                    amount_per_group: 1.0,
                },
                EquipmentLine {
                    name: "Штатив".to_string(),
                    amount_per_group: -3.0,
                },
                EquipmentLine {
                    name: "Спиртовка".to_string(),
                    amount_per_group: 1.0,
                },
            ]),
            ..Default::default()
        };
        patch.apply(&mut work).unwrap();

        assert_eq!(work.reagents_needed.len(), 1);
        assert!(work.uses_inventory_item(&kept));
        assert_eq!(work.equipment_needed.len(), 1);
        assert_eq!(work.equipment_needed[0].name, "Спиртовка");

        let json = serde_json::to_string(&work).unwrap();
        assert!(!json.contains("null"));
        let reloaded: LabWork = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, work);
    }

    #[test]
    fn test_reads_javascript_iso_dates() {
        let json = r#"{
            "id": "0d9a2c4e-3f1b-4a57-8e0c-7b6d5a4f3e21",
            "title": "Реакции ионного обмена",
            "date": "2025-03-14T09:00:00.000Z",
            "groupsCount": 15,
            "reagentsNeeded": [],
            "equipmentNeeded": [{ "name": "Пробирка", "amountPerGroup": 3 }]
        }"#;
        let work: LabWork = serde_json::from_str(json).unwrap();
        assert_eq!(work.date, at(14, 9));
        assert_eq!(work.equipment_needed[0].amount_per_group, 3.0);
        assert!(work.notes.is_none());
    }
}
