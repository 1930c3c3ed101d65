//! Predefined reagents with known default forms.

use super::{ReagentCategory, ReagentState};
use crate::units::Unit;

use ReagentCategory::{Inorganic, Organic};
use ReagentState::{Dry, Liquid, Solution};

/// A curated catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredefinedReagent {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ReagentCategory,
    pub default_state: ReagentState,
}

impl PredefinedReagent {
    const fn new(id: &'static str, name: &'static str, category: ReagentCategory, default_state: ReagentState) -> Self {
        PredefinedReagent {
            id,
            name,
            category,
            default_state,
        }
    }

    pub fn default_unit(&self) -> Unit {
        self.default_state.unit()
    }
}

pub const PREDEFINED_REAGENTS: [PredefinedReagent; 33] = [
    // Inorganic acids
    PredefinedReagent::new("h2so4", "Серная кислота", Inorganic, Liquid),
    PredefinedReagent::new("hcl", "Соляная кислота", Inorganic, Liquid),
    PredefinedReagent::new("hno3", "Азотная кислота", Inorganic, Liquid),
    PredefinedReagent::new("h3po4", "Ортофосфорная кислота", Inorganic, Liquid),
    // Bases
    PredefinedReagent::new("naoh", "Гидроксид натрия", Inorganic, Dry),
    PredefinedReagent::new("koh", "Гидроксид калия", Inorganic, Dry),
    PredefinedReagent::new("caoh2", "Гидроксид кальция", Inorganic, Dry),
    PredefinedReagent::new("nh3_aq", "Аммиак (водный раствор)", Inorganic, Solution),
    // Salts
    PredefinedReagent::new("cuso4", "Сульфат меди(II)", Inorganic, Dry),
    PredefinedReagent::new("cuso4_5h2o", "Медный купорос (CuSO4·5H2O)", Inorganic, Dry),
    PredefinedReagent::new("bacl2", "Хлорид бария", Inorganic, Dry),
    PredefinedReagent::new("agno3", "Нитрат серебра", Inorganic, Dry),
    PredefinedReagent::new("kmno4", "Перманганат калия", Inorganic, Dry),
    PredefinedReagent::new("k2cr2o7", "Дихромат калия", Inorganic, Dry),
    PredefinedReagent::new("nacl", "Хлорид натрия", Inorganic, Dry),
    PredefinedReagent::new("na2co3", "Карбонат натрия", Inorganic, Dry),
    PredefinedReagent::new("nahco3", "Гидрокарбонат натрия", Inorganic, Dry),
    // Metals and non-metals
    PredefinedReagent::new("fe", "Железо (опилки)", Inorganic, Dry),
    PredefinedReagent::new("zn", "Цинк (гранулы)", Inorganic, Dry),
    PredefinedReagent::new("cu", "Медь (стружка)", Inorganic, Dry),
    PredefinedReagent::new("mg", "Магний (лента)", Inorganic, Dry),
    PredefinedReagent::new("s", "Сера (порошок)", Inorganic, Dry),
    PredefinedReagent::new("i2", "Йод (кристаллический)", Inorganic, Dry),
    PredefinedReagent::new("h2o2", "Пероксид водорода", Inorganic, Solution),
    // Organic
    PredefinedReagent::new("ethanol", "Этанол", Organic, Liquid),
    PredefinedReagent::new("acetic_acid", "Уксусная кислота", Organic, Liquid),
    PredefinedReagent::new("glycerin", "Глицерин", Organic, Liquid),
    PredefinedReagent::new("glucose", "Глюкоза", Organic, Dry),
    PredefinedReagent::new("sucrose", "Сахароза", Organic, Dry),
    PredefinedReagent::new("starch", "Крахмал", Organic, Dry),
    // Indicators
    PredefinedReagent::new("phenolphthalein", "Фенолфталеин", Organic, Solution),
    PredefinedReagent::new("methyl_orange", "Метиловый оранжевый", Organic, Solution),
    PredefinedReagent::new("litmus", "Лакмус", Organic, Solution),
];
