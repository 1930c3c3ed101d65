//! # Stock and Schedule Checks
//!
//! Read-only views derived from the inventory and lab-work collections.
//! Nothing here is stored: every call recomputes from the slices it is
//! given, and nothing here ever changes stock.
//!
//! - low stock: quantity under the state's threshold
//! - upcoming: lab works in the next seven days, earliest first
//! - demand: per-line totals for a lab work, checked against stock
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::consistency::reagent_demand;
//! use chemlab_core::lab_work::{LabWork, ReagentLine};
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! let work = LabWork {
//!     id: Uuid::new_v4(),
//!     title: "Опыт".to_string(),
//!     date: Utc::now(),
//!     groups_count: 15,
//!     reagents_needed: vec![ReagentLine { inventory_id: Uuid::new_v4(), amount_per_group: 2.0 }],
//!     equipment_needed: vec![],
//!     notes: None,
//! };
//!
//! // The referenced item does not exist, so the line is flagged
//! let demand = reagent_demand(&work, &[]);
//! assert!(demand[0].insufficient);
//! assert_eq!(demand[0].display_name(), "Неизвестный реактив");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::InventoryItem;
use crate::lab_work::LabWork;
use crate::units::Unit;

/// Shown for a reagent line whose inventory item no longer exists
pub const UNKNOWN_REAGENT: &str = "Неизвестный реактив";

/// Shown instead of a unit when the item is unknown
pub const UNKNOWN_UNIT: &str = "ед.";

/// Items whose quantity is below their low-stock threshold, in inventory order
pub fn low_stock_items(inventory: &[InventoryItem]) -> Vec<&InventoryItem> {
    inventory.iter().filter(|item| item.is_low_stock()).collect()
}

/// Lab works in `(now, now + 7 days)`, earliest first
pub fn upcoming_lab_works(lab_works: &[LabWork], now: DateTime<Utc>) -> Vec<&LabWork> {
    let mut upcoming: Vec<_> = lab_works.iter().filter(|work| work.is_upcoming(now)).collect();
    upcoming.sort_by_key(|work| work.date);
    upcoming
}

/// All lab works, earliest first
pub fn sorted_by_date(lab_works: &[LabWork]) -> Vec<&LabWork> {
    let mut sorted: Vec<_> = lab_works.iter().collect();
    sorted.sort_by_key(|work| work.date);
    sorted
}

/// Case-insensitive substring match on item names; an empty term matches all.
///
/// The term is used as typed, surrounding spaces included.
pub fn search_inventory<'a>(inventory: &'a [InventoryItem], term: &str) -> Vec<&'a InventoryItem> {
    let needle = term.to_lowercase();
    inventory
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}

/// Total need of one reagent line, resolved against inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentDemand {
    pub inventory_id: Uuid,
    /// `None` when the inventory item is gone
    pub reagent_name: Option<String>,
    pub unit: Option<Unit>,
    pub amount_per_group: f64,
    /// amount_per_group × groups_count
    pub total_amount: f64,
    /// Current stock, when the item exists
    pub in_stock: Option<f64>,
    /// Unknown reagent, or stock below the total
    pub insufficient: bool,
}

impl ReagentDemand {
    pub fn is_resolved(&self) -> bool {
        self.reagent_name.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.reagent_name.as_deref().unwrap_or(UNKNOWN_REAGENT)
    }

    pub fn unit_label(&self) -> &str {
        self.unit.map(|u| u.symbol()).unwrap_or(UNKNOWN_UNIT)
    }

    /// How much more is needed; zero when stock suffices, the whole
    /// total when the reagent is unknown
    pub fn missing_amount(&self) -> f64 {
        match self.in_stock {
            Some(stock) => (self.total_amount - stock).max(0.0),
            None => self.total_amount,
        }
    }
}

/// Total need of one equipment line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDemand {
    pub name: String,
    pub amount_per_group: f64,
    pub total_amount: f64,
}

/// Resolve every reagent line of `work` against `inventory`, in line order.
pub fn reagent_demand(work: &LabWork, inventory: &[InventoryItem]) -> Vec<ReagentDemand> {
    work.reagents_needed
        .iter()
        .map(|line| {
            let total_amount = work.total_amount(line.amount_per_group);
            let item = inventory.iter().find(|item| item.id == line.inventory_id);
            match item {
                Some(item) => ReagentDemand {
                    inventory_id: line.inventory_id,
                    reagent_name: Some(item.name.clone()),
                    unit: Some(item.unit()),
                    amount_per_group: line.amount_per_group,
                    total_amount,
                    in_stock: Some(item.quantity),
                    insufficient: item.quantity < total_amount,
                },
                None => ReagentDemand {
                    inventory_id: line.inventory_id,
                    reagent_name: None,
                    unit: None,
                    amount_per_group: line.amount_per_group,
                    total_amount,
                    in_stock: None,
                    insufficient: true,
                },
            }
        })
        .collect()
}

/// Totals for every equipment line of `work`, in line order
pub fn equipment_demand(work: &LabWork) -> Vec<EquipmentDemand> {
    work.equipment_needed
        .iter()
        .map(|line| EquipmentDemand {
            name: line.name.clone(),
            amount_per_group: line.amount_per_group,
            total_amount: work.total_amount(line.amount_per_group),
        })
        .collect()
}

/// An insufficient reagent line, with the lab work it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub lab_work_id: Uuid,
    pub lab_work_title: String,
    pub date: DateTime<Utc>,
    pub demand: ReagentDemand,
}

/// Every insufficient line across `lab_works`, ordered by lab work date.
///
/// Each lab work is checked against the full stock on its own; demands of
/// different lab works are not summed.
pub fn shortages(lab_works: &[LabWork], inventory: &[InventoryItem]) -> Vec<Shortage> {
    sorted_by_date(lab_works)
        .into_iter()
        .flat_map(|work| {
            reagent_demand(work, inventory)
                .into_iter()
                .filter(|d| d.insufficient)
                .map(move |demand| Shortage {
                    lab_work_id: work.id,
                    lab_work_title: work.title.clone(),
                    date: work.date,
                    demand,
                })
        })
        .collect()
}

/// What the overview screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard<'a> {
    pub upcoming: Vec<&'a LabWork>,
    pub low_stock: Vec<&'a InventoryItem>,
}

impl<'a> Dashboard<'a> {
    pub fn build(inventory: &'a [InventoryItem], lab_works: &'a [LabWork], now: DateTime<Utc>) -> Self {
        Dashboard {
            upcoming: upcoming_lab_works(lab_works, now),
            low_stock: low_stock_items(inventory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ReagentCategory, ReagentState};
    use crate::lab_work::{EquipmentLine, ReagentLine};
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn item(name: &str, state: ReagentState, quantity: f64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            reagent_id: "custom_1".to_string(),
            name: name.to_string(),
            category: ReagentCategory::Inorganic,
            state,
            quantity,
            concentration: None,
            location: None,
        }
    }

    fn work(title: &str, date: DateTime<Utc>, groups_count: u32, reagents: Vec<ReagentLine>) -> LabWork {
        LabWork {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date,
            groups_count,
            reagents_needed: reagents,
            equipment_needed: vec![],
            notes: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_low_stock_items() {
        let inventory = vec![
            item("Сера", ReagentState::Dry, 49.0),
            item("Цинк", ReagentState::Dry, 50.0),
            item("Этанол", ReagentState::Liquid, 99.5),
            item("Пероксид водорода", ReagentState::Solution, 250.0),
        ];
        let low: Vec<_> = low_stock_items(&inventory).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(low, vec!["Сера", "Этанол"]);
    }

    #[test]
    fn test_demand_exceeds_stock() {
        let stock = item("Хлорид бария", ReagentState::Dry, 25.0);
        let lab = work(
            "Сульфат-ионы",
            now(),
            15,
            vec![ReagentLine {
                inventory_id: stock.id,
                amount_per_group: 2.0,
            }],
        );
        let demand = reagent_demand(&lab, std::slice::from_ref(&stock));
        assert_eq!(demand.len(), 1);
        assert_relative_eq!(demand[0].total_amount, 30.0);
        assert!(demand[0].insufficient);
        assert_relative_eq!(demand[0].missing_amount(), 5.0);
        assert_eq!(demand[0].unit_label(), "g");
    }

    #[test]
    fn test_demand_equal_to_stock_is_enough() {
        let stock = item("Хлорид бария", ReagentState::Dry, 30.0);
        let lab = work(
            "Сульфат-ионы",
            now(),
            15,
            vec![ReagentLine {
                inventory_id: stock.id,
                amount_per_group: 2.0,
            }],
        );
        let demand = reagent_demand(&lab, &[stock]);
        assert!(!demand[0].insufficient);
        assert_eq!(demand[0].missing_amount(), 0.0);
    }

    #[test]
    fn test_dangling_reference_is_unknown_and_insufficient() {
        let lab = work(
            "Опыт",
            now(),
            3,
            vec![ReagentLine {
                inventory_id: Uuid::new_v4(),
                amount_per_group: 1.0,
            }],
        );
        let demand = reagent_demand(&lab, &[item("Йод", ReagentState::Dry, 1000.0)]);
        assert!(!demand[0].is_resolved());
        assert!(demand[0].insufficient);
        assert_eq!(demand[0].display_name(), UNKNOWN_REAGENT);
        assert_eq!(demand[0].unit_label(), UNKNOWN_UNIT);
        assert_relative_eq!(demand[0].missing_amount(), 3.0);
    }

    #[test]
    fn test_demand_does_not_touch_stock() {
        let inventory = vec![item("Медь", ReagentState::Dry, 10.0)];
        let before = inventory.clone();
        let lab = work(
            "Опыт",
            now(),
            30,
            vec![ReagentLine {
                inventory_id: inventory[0].id,
                amount_per_group: 1.0,
            }],
        );
        let _ = reagent_demand(&lab, &inventory);
        let _ = shortages(std::slice::from_ref(&lab), &inventory);
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_equipment_demand() {
        let mut lab = work("Опыт", now(), 12, vec![]);
        lab.equipment_needed.push(EquipmentLine {
            name: "Пробирка".to_string(),
            amount_per_group: 3.0,
        });
        let equipment = equipment_demand(&lab);
        assert_eq!(equipment[0].name, "Пробирка");
        assert_relative_eq!(equipment[0].total_amount, 36.0);
    }

    #[test]
    fn test_upcoming_sorted_and_windowed() {
        let labs = vec![
            work("Через пять дней", now() + Duration::days(5), 10, vec![]),
            work("Вчера", now() - Duration::days(1), 10, vec![]),
            work("Завтра", now() + Duration::days(1), 10, vec![]),
            work("Через восемь дней", now() + Duration::days(8), 10, vec![]),
        ];
        let titles: Vec<_> = upcoming_lab_works(&labs, now()).iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Завтра", "Через пять дней"]);

        let all: Vec<_> = sorted_by_date(&labs).iter().map(|w| w.title.as_str()).collect();
        assert_eq!(all, vec!["Вчера", "Завтра", "Через пять дней", "Через восемь дней"]);
    }

    #[test]
    fn test_search_inventory() {
        let inventory = vec![
            item("Хлорид натрия", ReagentState::Dry, 100.0),
            item("Гидроксид натрия", ReagentState::Dry, 100.0),
            item("Сера", ReagentState::Dry, 100.0),
        ];
        assert_eq!(search_inventory(&inventory, "НАТРИЯ").len(), 2);
        assert_eq!(search_inventory(&inventory, "").len(), 3);
        assert!(search_inventory(&inventory, "калия").is_empty());

        let spaced: Vec<_> = search_inventory(&inventory, " ").iter().map(|i| i.name.as_str()).collect();
        assert_eq!(spaced, vec!["Хлорид натрия", "Гидроксид натрия"]);
        assert!(search_inventory(&inventory, " сера").is_empty());
    }

    #[test]
    fn test_shortages_across_lab_works() {
        let stock = item("Нитрат серебра", ReagentState::Dry, 20.0);
        let labs = vec![
            work(
                "Позже",
                now() + Duration::days(3),
                10,
                vec![ReagentLine {
                    inventory_id: stock.id,
                    amount_per_group: 3.0,
                }],
            ),
            work(
                "Раньше",
                now() + Duration::days(1),
                10,
                vec![ReagentLine {
                    inventory_id: stock.id,
                    amount_per_group: 1.0,
                }],
            ),
        ];
        let found = shortages(&labs, &[stock]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].lab_work_title, "Позже");
    }

    #[test]
    fn test_dashboard() {
        let inventory = vec![item("Сера", ReagentState::Dry, 5.0)];
        let labs = vec![work("Завтра", now() + Duration::days(1), 10, vec![])];
        let dashboard = Dashboard::build(&inventory, &labs, now());
        assert_eq!(dashboard.upcoming.len(), 1);
        assert_eq!(dashboard.low_stock.len(), 1);
    }
}
