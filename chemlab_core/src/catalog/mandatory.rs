//! Mandatory reagent list.
//!
//! The list comes as bare names (with `**` markers for controlled
//! substances). Category, inorganic subcategory and default state are
//! guessed from substrings of the lower-cased name. The guess is
//! best-effort: a name that merely contains a keyword is classified by it.
//!
//! Rules, applied in order:
//!
//! 1. organic if the name contains any organic keyword, else inorganic
//! 2. liquid if it names an alcohol, ester, glycerin, formalin, ethylene
//!    glycol, oil, a "%-й" solution, or an acid other than the solid ones
//!    (aminoacetic, palmitic, stearic, oxalic)
//! 3. solution if the name contains `%` (overrides liquid)
//! 4. inorganic reagents get the first matching subcategory

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{ReagentCategory, ReagentState};
use crate::units::Unit;

/// Grouping of inorganic reagents in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InorganicSubcategory {
    #[serde(rename = "Кислоты")]
    Acids,
    #[serde(rename = "Основания")]
    Bases,
    #[serde(rename = "Оксиды")]
    Oxides,
    #[serde(rename = "Простые вещества")]
    Elements,
    #[serde(rename = "Нитраты")]
    Nitrates,
    #[serde(rename = "Карбонаты")]
    Carbonates,
    #[serde(rename = "Сульфаты")]
    Sulfates,
    #[serde(rename = "Хлориды")]
    Chlorides,
    #[serde(rename = "Фосфаты")]
    Phosphates,
    #[serde(rename = "Другие соли")]
    OtherSalts,
    #[serde(rename = "Разное")]
    Miscellaneous,
}

impl InorganicSubcategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InorganicSubcategory::Acids => "Кислоты",
            InorganicSubcategory::Bases => "Основания",
            InorganicSubcategory::Oxides => "Оксиды",
            InorganicSubcategory::Elements => "Простые вещества",
            InorganicSubcategory::Nitrates => "Нитраты",
            InorganicSubcategory::Carbonates => "Карбонаты",
            InorganicSubcategory::Sulfates => "Сульфаты",
            InorganicSubcategory::Chlorides => "Хлориды",
            InorganicSubcategory::Phosphates => "Фосфаты",
            InorganicSubcategory::OtherSalts => "Другие соли",
            InorganicSubcategory::Miscellaneous => "Разное",
        }
    }
}

impl std::fmt::Display for InorganicSubcategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A classified entry of the mandatory list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandatoryReagent {
    /// `mand_<index>` in list order
    pub id: String,
    /// Name with `**` markers removed
    pub name: String,
    pub category: ReagentCategory,
    /// Only set for inorganic reagents
    pub subcategory: Option<InorganicSubcategory>,
    pub default_state: ReagentState,
}

impl MandatoryReagent {
    pub fn default_unit(&self) -> Unit {
        self.default_state.unit()
    }
}

const RAW_NAMES: &[&str] = &[
    "Суперфосфат двойной гранулированный", "Фосфоритная мука", "Нефть", "Глицерин", "Спирт н-бутиловый",
    "Спирт изоамиловый", "Спирт изобутиловый", "Спирт этиловый", "Формалин 40 %", "Этиленгликоль",
    "Уксусно-этиловый эфир", "Кислота аминоуксусная", "Кислота муравьиная**", "Кислота олеиновая",
    "Кислота пальмитиновая", "Кислота стеариновая", "Кислота уксусная**", "Кислота щавелевая",
    "Д-глюкоза", "Метиламин гидрохлорид", "Сахароза", "Активированный уголь", "Вазелин",
    "Кальция карбид", "Кальция карбонат (мрамор)", "Парафин",
    "Аммония нитрат**", "Калия нитрат**", "Кальция нитрат", "Натрия нитрат**", "Серебра нитрат**",
    "Лакмоид", "Метиловый оранжевый", "Фенолфталеин", "Аммофос", "Карбамид", "Натриевая селитра",
    "Кальциевая селитра", "Калийная соль", "Сульфат аммония", "Суперфосфат гранулированный",
    "Калия моногидроортофосфат (калий фосфорнокислый двузамещенный)", "Натрия силикат 9-водный",
    "Натрия ортофосфат трехзамещенный 12-водный",
    "Натрия моногидроортофосфат (натрий фосфорнокислый двузамещенный) 12-водный",
    "Натрия дигидроортофосфат (натрий фосфорнокислый однозамещенный) 2-водный",
    "Калия ферро (II) гексацианид (калий железистосинеродистый)",
    "Калия ферро (III) гексационид (калий железосинеродистый)",
    "Калия роданид**", "Натрия ацетат 3-водный", "Свинца ацетат", "Калия перманганат (калий марганцевокислый)**",
    "Марганца (IV) оксид", "Марганца (II) сульфат 5-водный", "Марганца хлорид 4-водный", "Аммония дихромат**",
    "Калия дихромат**", "Хрома (III) хлорид 6-водный", "Алюминия нитрат**",
    "Калия сульфат", "Кобальта (II) сульфат", "Магния сульфат 7-водный", "Меди (II) сульфат безводный",
    "Меди (II) сульфат 5-водный", "Натрия сульфид", "Натрия сульфит", "Натрия сульфат 10-водный",
    "Натрия гидросульфат", "Никеля сульфат", "Цинка сульфат 7-водный", "Аммония карбонат",
    "Калия карбонат (поташ)", "Меди (II) карбонат основной", "Натрия карбонат 10-водный", "Натрия гидрокарбонат",
    "Магний (порошок)", "Магний (лента)", "Медь (гранулы, опилки)", "Цинк (гранулы)", "Кальций**",
    "Натрий (ампул)", "Сера** (порошок)", "Фосфор** красный", "Фосфора (V) оксид**", "Йод",
    "Алюминия хлорид", "Аммония хлорид", "Бария хлорид 2-водный", "Железа (III) хлорид 5-водный",
    "Калия йодид**", "Калия хлорид", "Кальция хлорид 6-водный", "Магния хлорид 6-водный", "Меди (II) хлорид",
    "Натрия бромид 6-водный", "Натрия фторид", "Натрия хлорид", "Цинка хлорид**", "Алюминия сульфат 18-водный",
    "Аммония сульфат", "Железа (II) сульфид", "Железа (II) сульфат 7-водный",
    "Кислота серная**", "Кислота соляная**", "Кислота азотная**", "Кислота ортофосфорная**", "Аммиак 25 %-й",
    "Бария гидроксид", "Калия гидроксид**", "Кальция гидроксид**", "Натрия гидроксид**", "Алюминия оксид",
    "Железа (III) оксид", "Кальция оксид**", "Магния оксид", "Меди (II) оксид (порошок)", "Цинка оксид",
    "Алюминий (гранулы)", "Алюминий (порошок)", "Железо восстановленное (порошок)",
];

const ORGANIC_KEYWORDS: &[&str] = &[
    "спирт", "эфир", "глицерин", "формалин", "этиленгликоль", "нефть", "глюкоза", "сахароза",
    "парафин", "вазелин", "ацетат", "олеиновая", "пальмитиновая", "стеариновая", "уксусная",
    "щавелевая", "аминоуксусная", "муравьиная", "фенолфталеин", "метиловый оранжевый", "лакмоид",
    "карбамид", "метиламин", "уголь",
];

const LIQUID_KEYWORDS: &[&str] = &["спирт", "эфир", "глицерин", "формалин", "этиленгликоль", "нефть", "%-й"];

/// Acids that are stocked as solids
const SOLID_ACIDS: &[&str] = &["аминоуксусная", "пальмитиновая", "стеариновая", "щавелевая"];

const OTHER_SALT_KEYWORDS: &[&str] = &[
    "бромид", "фторид", "йодид", "иодид", "сульфид", "сульфит", "силикат", "гексацианид",
    "гексационид", "роданид", "дихромат", "соль", "карбид",
];

const ELEMENT_PREFIXES: &[&str] = &[
    "магний", "медь", "цинк", "кальций", "натрий", "сера", "фосфор", "йод", "алюминий", "железо",
];

/// A name starting with an element is still a compound if it contains one of these
const COMPOUND_MARKERS: &[&str] = &["оксид", "хлорид", "сульф", "нитрат", "карбонат", "фосфат", "карбид"];

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}

fn subcategory_for(lower: &str) -> InorganicSubcategory {
    use InorganicSubcategory::*;

    if lower.contains("кислота") {
        Acids
    } else if contains_any(lower, &["гидроксид", "аммиак"]) {
        Bases
    } else if lower.contains("оксид") {
        Oxides
    } else if contains_any(lower, &["нитрат", "селитра"]) {
        Nitrates
    } else if contains_any(lower, &["карбонат", "поташ"]) {
        Carbonates
    } else if contains_any(lower, &["сульфат", "гидросульфат"]) {
        Sulfates
    } else if lower.contains("хлорид") {
        Chlorides
    } else if contains_any(lower, &["фосфат", "аммофос"]) {
        Phosphates
    } else if contains_any(lower, OTHER_SALT_KEYWORDS) {
        OtherSalts
    } else if ELEMENT_PREFIXES.iter().any(|p| lower.starts_with(p)) && !contains_any(lower, COMPOUND_MARKERS) {
        Elements
    } else {
        Miscellaneous
    }
}

/// Classify one raw list entry.
///
/// `index` is the entry's position in the list and becomes its id.
pub fn classify(index: usize, raw_name: &str) -> MandatoryReagent {
    let name = raw_name.replace("**", "").trim().to_string();
    let lower = name.to_lowercase();

    let category = if contains_any(&lower, ORGANIC_KEYWORDS) {
        ReagentCategory::Organic
    } else {
        ReagentCategory::Inorganic
    };

    let liquid_acid = lower.contains("кислота") && !contains_any(&lower, SOLID_ACIDS);
    let mut default_state = if contains_any(&lower, LIQUID_KEYWORDS) || liquid_acid {
        ReagentState::Liquid
    } else {
        ReagentState::Dry
    };
    if lower.contains('%') {
        default_state = ReagentState::Solution;
    }

    let subcategory = match category {
        ReagentCategory::Inorganic => Some(subcategory_for(&lower)),
        ReagentCategory::Organic => None,
    };

    MandatoryReagent {
        id: format!("mand_{}", index),
        name,
        category,
        subcategory,
        default_state,
    }
}

static MANDATORY_REAGENTS: Lazy<Vec<MandatoryReagent>> = Lazy::new(|| {
    RAW_NAMES
        .iter()
        .enumerate()
        .map(|(index, raw)| classify(index, raw))
        .collect()
});

/// The classified mandatory list, in list order
pub fn mandatory_reagents() -> &'static [MandatoryReagent] {
    &MANDATORY_REAGENTS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_name(name: &str) -> &'static MandatoryReagent {
        mandatory_reagents()
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("{} not in list", name))
    }

    #[test]
    fn test_ids_follow_list_order() {
        let list = mandatory_reagents();
        assert_eq!(list.len(), RAW_NAMES.len());
        assert_eq!(list[0].id, "mand_0");
        assert_eq!(list[2].name, "Нефть");
        assert_eq!(list[2].id, "mand_2");
    }

    #[test]
    fn test_markers_stripped() {
        assert!(mandatory_reagents().iter().all(|r| !r.name.contains("**")));
        assert_eq!(classify(7, "Сера** (порошок)").name, "Сера (порошок)");
    }

    #[test]
    fn test_organic_liquids() {
        let ethanol = by_name("Спирт этиловый");
        assert_eq!(ethanol.category, ReagentCategory::Organic);
        assert_eq!(ethanol.default_state, ReagentState::Liquid);
        assert_eq!(ethanol.subcategory, None);

        let acetic = by_name("Кислота уксусная");
        assert_eq!(acetic.category, ReagentCategory::Organic);
        assert_eq!(acetic.default_state, ReagentState::Liquid);
    }

    #[test]
    fn test_solid_acids() {
        let oxalic = by_name("Кислота щавелевая");
        assert_eq!(oxalic.category, ReagentCategory::Organic);
        assert_eq!(oxalic.default_state, ReagentState::Dry);
    }

    #[test]
    fn test_percent_means_solution() {
        let formalin = by_name("Формалин 40 %");
        assert_eq!(formalin.default_state, ReagentState::Solution);
        assert_eq!(formalin.default_unit(), Unit::Milliliters);

        let ammonia = by_name("Аммиак 25 %-й");
        assert_eq!(ammonia.category, ReagentCategory::Inorganic);
        assert_eq!(ammonia.default_state, ReagentState::Solution);
        assert_eq!(ammonia.subcategory, Some(InorganicSubcategory::Bases));
    }

    #[test]
    fn test_inorganic_subcategories() {
        use InorganicSubcategory::*;

        assert_eq!(by_name("Кислота серная").subcategory, Some(Acids));
        assert_eq!(by_name("Кислота серная").default_state, ReagentState::Liquid);
        assert_eq!(by_name("Натрия гидроксид").subcategory, Some(Bases));
        assert_eq!(by_name("Цинка оксид").subcategory, Some(Oxides));
        assert_eq!(by_name("Натриевая селитра").subcategory, Some(Nitrates));
        assert_eq!(by_name("Калия карбонат (поташ)").subcategory, Some(Carbonates));
        assert_eq!(by_name("Натрия гидросульфат").subcategory, Some(Sulfates));
        assert_eq!(by_name("Натрия хлорид").subcategory, Some(Chlorides));
        assert_eq!(by_name("Аммофос").subcategory, Some(Phosphates));
        assert_eq!(by_name("Калия роданид").subcategory, Some(OtherSalts));
        assert_eq!(by_name("Кальция карбид").subcategory, Some(OtherSalts));
        assert_eq!(by_name("Магний (лента)").subcategory, Some(Elements));
        assert_eq!(by_name("Железо восстановленное (порошок)").subcategory, Some(Elements));
        assert_eq!(
            by_name("Калия перманганат (калий марганцевокислый)").subcategory,
            Some(Miscellaneous)
        );
    }

    #[test]
    fn test_heuristic_is_substring_based() {
        // "Натрия ацетат" is inorganic chemically but the keyword wins
        let acetate = by_name("Натрия ацетат 3-водный");
        assert_eq!(acetate.category, ReagentCategory::Organic);

        // Both start with the "фосфор" prefix and carry no compound marker
        assert_eq!(by_name("Фосфор красный").subcategory, Some(InorganicSubcategory::Elements));
        assert_eq!(by_name("Фосфоритная мука").subcategory, Some(InorganicSubcategory::Elements));
    }

    #[test]
    fn test_subcategory_serializes_as_display_name() {
        let json = serde_json::to_string(&InorganicSubcategory::OtherSalts).unwrap();
        assert_eq!(json, "\"Другие соли\"");
    }
}
