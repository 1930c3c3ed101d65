//! # ChemLab CLI Application
//!
//! Terminal front-end over `chemlab_core`: solution calculators, the
//! reagent inventory, lab work planning and the overview screen.
//!
//! State is kept in `<data dir>/chemlab-storage.json`. The directory
//! defaults to `./chemlab-data` and can be changed with `CHEMLAB_DATA_DIR`.
//! Set `RUST_LOG=info` to see store activity.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use chemlab_core::calculations::mass_fraction::{HydrateOption, MassFractionInput, SoluteMass};
use chemlab_core::calculations::{
    calculate, CalculationInput, CalculationOutput, HydrateInput, MolarConcentrationInput, MoleFractionInput,
    VolumeFractionInput,
};
use chemlab_core::catalog::{
    find_reagent, inorganic_by_subcategory, mandatory_by_category, ReagentCategory, ReagentState, PREDEFINED_REAGENTS,
};
use chemlab_core::consistency::{equipment_demand, reagent_demand, search_inventory, sorted_by_date, Dashboard};
use chemlab_core::inventory::{InventoryItem, InventoryPatch, NewInventoryItem};
use chemlab_core::lab_work::NewLabWork;
use chemlab_core::units::{format_fixed, MASS_DECIMALS, MOLE_FRACTION_DECIMALS};
use chemlab_core::{FileStorage, LabStore, StoreConfig};

type Store = LabStore<FileStorage>;

/// Read one line; `None` on end of input.
fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_or(label: &str, default: &str) -> String {
    match prompt(label) {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

fn prompt_f64(label: &str) -> Option<f64> {
    prompt(label).and_then(|s| chemlab_core::parse_input(&s))
}

fn prompt_index(label: &str, len: usize) -> Option<usize> {
    let n: usize = prompt(label)?.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn yes(label: &str) -> bool {
    matches!(prompt(label).as_deref(), Some("y") | Some("Y") | Some("д") | Some("Д"))
}

fn main() {
    env_logger::init();

    let config = StoreConfig::from_env();
    log::info!("Data directory: {}", config.data_dir.display());
    let storage = FileStorage::new(&config.data_dir);
    let mut store = LabStore::open_with_config(storage, config);
    log::info!("Storage key: {}", store.config().storage_key);

    println!("ChemLab - School Chemistry Lab Assistant");
    println!("=======================================");

    loop {
        println!();
        println!("  1) Calculator");
        println!("  2) Inventory");
        println!("  3) Lab works");
        println!("  4) Overview");
        println!("  5) Reagent catalog");
        println!("  q) Quit");

        match prompt("> ").as_deref() {
            Some("1") => calculator_menu(),
            Some("2") => inventory_menu(&mut store),
            Some("3") => lab_work_menu(&mut store),
            Some("4") => show_dashboard(&store),
            Some("5") => show_catalog(),
            Some("q") | None => break,
            Some(_) => println!("Unknown choice"),
        }
    }

    if let Err(e) = store.save() {
        eprintln!("Error: {}", e);
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

fn calculator_menu() {
    println!();
    println!("  1) Mass fraction");
    println!("  2) Molar concentration");
    println!("  3) Mole fraction");
    println!("  4) Volume fraction");
    println!("  5) Crystal hydrate");

    let input = match prompt("> ").as_deref() {
        Some("1") => {
            let solution_mass_g = prompt_or("Solution mass, g: ", "");
            let mass_fraction_pct = prompt_or("Mass fraction, %: ", "");
            let hydrate = if yes("Weigh out as crystal hydrate? [y/N]: ") {
                Some(HydrateOption {
                    anhydrous_molar_mass: prompt_or("M(anhydrous), g/mol: ", ""),
                    water_count: prompt_or("Water molecules n: ", ""),
                })
            } else {
                None
            };
            CalculationInput::MassFraction(MassFractionInput {
                solution_mass_g,
                mass_fraction_pct,
                hydrate,
            })
        }
        Some("2") => CalculationInput::MolarConcentration(MolarConcentrationInput {
            volume_ml: prompt_or("Solution volume, ml: ", ""),
            concentration_mol_per_l: prompt_or("Concentration, mol/l: ", ""),
            molar_mass: prompt_or("Molar mass, g/mol: ", ""),
        }),
        Some("3") => CalculationInput::MoleFraction(MoleFractionInput {
            solute_mass_g: prompt_or("Solute mass, g: ", ""),
            solute_molar_mass: prompt_or("Solute molar mass, g/mol: ", ""),
            solvent_mass_g: prompt_or("Solvent mass, g: ", ""),
            solvent_molar_mass: prompt_or("Solvent molar mass, g/mol [18.015]: ", "18.015"),
        }),
        Some("4") => CalculationInput::VolumeFraction(VolumeFractionInput {
            solute_volume_ml: prompt_or("Solute volume, ml: ", ""),
            solution_volume_ml: prompt_or("Solution volume, ml: ", ""),
        }),
        Some("5") => CalculationInput::Hydrate(HydrateInput {
            anhydrous_mass_g: prompt_or("Anhydrous salt mass, g: ", ""),
            anhydrous_molar_mass: prompt_or("M(anhydrous), g/mol: ", ""),
            water_count: prompt_or("Water molecules n: ", ""),
        }),
        _ => return,
    };

    println!();
    match calculate(&input) {
        Some(output) => print_output(&output),
        None => println!("(no result: check the numbers)"),
    }
}

fn print_output(output: &CalculationOutput) {
    let g = |v: f64| format_fixed(v, MASS_DECIMALS);
    match output {
        CalculationOutput::MassFraction(r) => {
            match &r.solute {
                SoluteMass::Anhydrous { mass_g } => println!("  Solute:   {} g", g(*mass_g)),
                SoluteMass::Hydrate {
                    mass_g,
                    anhydrous_mass_g,
                    hydrate_molar_mass,
                } => {
                    println!("  Hydrate:  {} g (M = {} g/mol)", g(*mass_g), g(*hydrate_molar_mass));
                    println!("  Contains: {} g anhydrous salt", g(*anhydrous_mass_g));
                }
            }
            println!("  Water:    {} g", g(r.solvent_mass_g));
        }
        CalculationOutput::MolarConcentration(r) => {
            println!("  Amount:   {} mol", format_fixed(r.solute_moles, MOLE_FRACTION_DECIMALS));
            println!("  Solute:   {} g", g(r.solute_mass_g));
        }
        CalculationOutput::MoleFraction(r) => {
            println!("  n(solute):  {} mol", format_fixed(r.solute_moles, MOLE_FRACTION_DECIMALS));
            println!("  n(solvent): {} mol", format_fixed(r.solvent_moles, MOLE_FRACTION_DECIMALS));
            println!("  χ(solute):  {}", format_fixed(r.solute_fraction, MOLE_FRACTION_DECIMALS));
            println!("  χ(solvent): {}", format_fixed(r.solvent_fraction, MOLE_FRACTION_DECIMALS));
        }
        CalculationOutput::VolumeFraction(r) => {
            println!("  φ = {} %", g(r.volume_fraction_pct));
        }
        CalculationOutput::Hydrate(r) => {
            println!("  M(water):   {} g/mol", g(r.water_molar_mass));
            println!("  M(hydrate): {} g/mol", g(r.hydrate_molar_mass));
            println!("  Hydrate:    {} g", g(r.hydrate_mass_g));
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

fn inventory_menu(store: &mut Store) {
    print_inventory(store.inventory().iter().collect());
    println!();
    println!("  a) Add  s) Search  u) Update quantity  r) Remove  (enter to go back)");

    match prompt("> ").as_deref() {
        Some("a") => add_inventory_item(store),
        Some("s") => {
            let term = prompt_or("Search: ", "");
            print_inventory(search_inventory(store.inventory(), &term));
        }
        Some("u") => {
            let Some(index) = prompt_index("Item #: ", store.inventory().len()) else {
                return;
            };
            let id = store.inventory()[index].id;
            let Some(quantity) = prompt_f64("New quantity: ") else {
                println!("Not a number");
                return;
            };
            if let Err(e) = store.update_inventory_item(&id, InventoryPatch::quantity(quantity)) {
                println!("Error: {}", e);
            }
        }
        Some("r") => {
            let Some(index) = prompt_index("Item #: ", store.inventory().len()) else {
                return;
            };
            let id = store.inventory()[index].id;
            if let Some(removed) = store.remove_inventory_item(&id) {
                println!("Removed {}", removed.name);
            }
        }
        _ => {}
    }
}

fn print_inventory(items: Vec<&InventoryItem>) {
    println!();
    if items.is_empty() {
        println!("  (inventory is empty)");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        let concentration = item
            .concentration
            .map(|c| format!(" {}%", format_fixed(c, MASS_DECIMALS)))
            .unwrap_or_default();
        let location = item.location.as_deref().map(|l| format!(" [{}]", l)).unwrap_or_default();
        println!(
            "  {:>3}. {}{} - {} {}{}{}",
            i + 1,
            item.name,
            concentration,
            format_fixed(item.quantity, MASS_DECIMALS),
            item.unit(),
            location,
            if item.is_low_stock() { "  LOW" } else { "" }
        );
    }
}

fn add_inventory_item(store: &mut Store) {
    let reagent_id = prompt_or("Catalog id (blank for custom): ", "");
    let new_item = if reagent_id.is_empty() {
        let name = prompt_or("Name: ", "");
        let category = if yes("Organic? [y/N]: ") {
            ReagentCategory::Organic
        } else {
            ReagentCategory::Inorganic
        };
        let codes: Vec<_> = ReagentState::ALL.iter().map(|s| s.code()).collect();
        let label = format!("State ({}) [{}]: ", codes.join("/"), ReagentState::Dry.code());
        let state = match ReagentState::from_str_flexible(&prompt_or(&label, ReagentState::Dry.code())) {
            Ok(state) => state,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        };
        let Some(quantity) = prompt_f64(&format!("Quantity, {}: ", state.unit())) else {
            println!("Not a number");
            return;
        };
        NewInventoryItem::custom(name, category, state, quantity)
    } else {
        let Some(entry) = find_reagent(&reagent_id) else {
            println!("No catalog entry '{}'", reagent_id);
            return;
        };
        let Some(quantity) = prompt_f64(&format!("{}: quantity, {}: ", entry.name, entry.default_unit())) else {
            println!("Not a number");
            return;
        };
        NewInventoryItem::from_catalog(&entry, quantity)
    };

    let mut new_item = new_item.with_location(prompt_or("Location: ", ""));
    if new_item.state == ReagentState::Solution {
        if let Some(c) = prompt_f64("Concentration, %: ") {
            new_item = new_item.with_concentration(c);
        }
    }

    match store.add_inventory_item(new_item) {
        Ok(_) => println!("Added"),
        Err(e) => println!("Error: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Lab works
// ---------------------------------------------------------------------------

fn lab_work_menu(store: &mut Store) {
    println!();
    let ids: Vec<Uuid> = {
        let works = sorted_by_date(store.lab_works());
        if works.is_empty() {
            println!("  (no lab works planned)");
        }
        for (i, work) in works.iter().enumerate() {
            let short = reagent_demand(work, store.inventory()).iter().filter(|d| d.insufficient).count();
            println!(
                "  {:>3}. {} {} ({} groups){}",
                i + 1,
                work.date.format("%Y-%m-%d"),
                work.title,
                work.groups_count,
                if short > 0 { format!("  {} short", short) } else { String::new() }
            );
        }
        works.iter().map(|w| w.id).collect()
    };

    println!();
    println!("  a) Add  d) Details  r) Remove  (enter to go back)");
    match prompt("> ").as_deref() {
        Some("a") => add_lab_work(store),
        Some("d") => {
            if let Some(index) = prompt_index("Lab work #: ", ids.len()) {
                show_lab_work(store, &ids[index]);
            }
        }
        Some("r") => {
            if let Some(index) = prompt_index("Lab work #: ", ids.len()) {
                if let Some(removed) = store.remove_lab_work(&ids[index]) {
                    println!("Removed {}", removed.title);
                }
            }
        }
        _ => {}
    }
}

fn show_lab_work(store: &Store, id: &Uuid) {
    let Some(work) = store.lab_work(id) else {
        return;
    };
    println!();
    println!("═══════════════════════════════════════");
    println!("  {} - {}", work.title, work.date.format("%Y-%m-%d"));
    println!("  Groups: {}", work.groups_count);
    println!("═══════════════════════════════════════");

    let reagents = reagent_demand(work, store.inventory());
    if !reagents.is_empty() {
        println!("Reagents:");
    }
    for d in &reagents {
        let stock = d
            .in_stock
            .map(|s| format!("in stock {}", format_fixed(s, MASS_DECIMALS)))
            .unwrap_or_else(|| "not in inventory".to_string());
        println!(
            "  {:<28} {} × {} = {} {}  ({}) {}",
            d.display_name(),
            format_fixed(d.amount_per_group, MASS_DECIMALS),
            work.groups_count,
            format_fixed(d.total_amount, MASS_DECIMALS),
            d.unit_label(),
            stock,
            status_icon(!d.insufficient)
        );
    }

    let equipment = equipment_demand(work);
    if !equipment.is_empty() {
        println!("Equipment:");
    }
    for e in &equipment {
        println!("  {:<28} {}", e.name, format_fixed(e.total_amount, MASS_DECIMALS));
    }

    if let Some(notes) = &work.notes {
        println!("Notes: {}", notes);
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok { "[OK]" } else { "[SHORT]" }
}

// ---------------------------------------------------------------------------
// Overview and catalog
// ---------------------------------------------------------------------------

fn show_dashboard(store: &Store) {
    let dashboard = Dashboard::build(store.inventory(), store.lab_works(), Utc::now());

    println!();
    println!("Upcoming lab works (next 7 days):");
    if dashboard.upcoming.is_empty() {
        println!("  none");
    }
    for work in &dashboard.upcoming {
        println!("  {} {} ({} groups)", work.date.format("%Y-%m-%d"), work.title, work.groups_count);
    }

    println!();
    println!("Low stock:");
    if dashboard.low_stock.is_empty() {
        println!("  none");
    }
    for item in &dashboard.low_stock {
        println!(
            "  {} - {} {} (below {})",
            item.name,
            format_fixed(item.quantity, MASS_DECIMALS),
            item.unit(),
            item.state.low_stock_threshold()
        );
    }

    if yes("\nShow as JSON? [y/N]: ") {
        match serde_json::to_string_pretty(&dashboard) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn show_catalog() {
    println!();
    println!("Common reagents:");
    for r in PREDEFINED_REAGENTS.iter() {
        println!("  {:<12} {} ({}, {})", r.id, r.name, r.category.display_name(), r.default_state);
    }

    println!();
    println!("Required list, inorganic:");
    for (subcategory, reagents) in inorganic_by_subcategory() {
        println!("  {}", subcategory.display_name());
        for r in reagents {
            println!("    {:<10} {}", r.id, r.name);
        }
    }

    println!();
    println!("Required list, organic:");
    for r in mandatory_by_category(ReagentCategory::Organic) {
        println!("    {:<10} {}", r.id, r.name);
    }
}

fn add_lab_work(store: &mut Store) {
    let title = prompt_or("Title: ", "");
    let date = prompt_or("Date (YYYY-MM-DD): ", "");
    let Ok(day) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        println!("Bad date");
        return;
    };
    let Some(groups_count) = prompt("Groups: ").and_then(|s| s.parse::<u32>().ok()) else {
        println!("Not a number");
        return;
    };
    let start = day.and_time(NaiveTime::MIN);
    let mut work = NewLabWork::new(title, Utc.from_utc_datetime(&start), groups_count);

    print_inventory(store.inventory().iter().collect());
    loop {
        let Some(index) = prompt_index("Reagent # (enter to finish): ", store.inventory().len()) else {
            break;
        };
        let item = &store.inventory()[index];
        let Some(amount) = prompt_f64(&format!("{} per group, {}: ", item.name, item.unit())) else {
            continue;
        };
        work = work.with_reagent(item.id, amount);
    }
    loop {
        let name = prompt_or("Equipment (enter to finish): ", "");
        if name.is_empty() {
            break;
        }
        let Some(amount) = prompt_f64("Per group: ") else {
            continue;
        };
        work = work.with_equipment(name, amount);
    }
    let notes = prompt_or("Notes: ", "");
    if !notes.is_empty() {
        work = work.with_notes(notes);
    }

    match store.add_lab_work(work) {
        Ok(id) => show_lab_work(store, &id),
        Err(e) => println!("Error: {}", e),
    }
}
