//! # chemlab_core - School Chemistry Lab Assistant
//!
//! `chemlab_core` holds everything a chemistry teacher's lab assistant needs
//! besides the screens: solution calculators, a reagent catalog, the stock
//! inventory, planned lab works, and the checks that tie stock to plans.
//! All data types are JSON-serializable; the persisted document stays
//! readable by the browser build of the app.
//!
//! ## Design Philosophy
//!
//! - **Quiet calculators**: invalid input gives `None`, never an error dialog
//! - **Derived, not stored**: units, totals and low-stock flags are computed
//! - **One owner**: [`store::LabStore`] is the only way to change state
//! - **Best-effort persistence**: a failed write never loses in-memory data
//!
//! ## Quick Start
//!
//! ```rust
//! use chemlab_core::calculations::mass_fraction::mass_fraction;
//! use chemlab_core::units::{format_fixed, MASS_DECIMALS};
//!
//! let result = mass_fraction(200.0, 15.0).unwrap();
//! assert_eq!(format_fixed(result.solute.mass_g(), MASS_DECIMALS), "30.00");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - mass fraction, molarity, mole fraction, volume fraction, hydrates
//! - [`catalog`] - predefined and mandatory reagent lists
//! - [`inventory`] - stock items
//! - [`lab_work`] - planned lab sessions
//! - [`consistency`] - low stock, upcoming works, demand vs stock
//! - [`store`] - the session-wide state owner
//! - [`storage`] - key-value persistence backends
//! - [`config`] - storage key and data directory
//! - [`units`] - units, constants and display formatting
//! - [`errors`] - structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod consistency;
pub mod errors;
pub mod inventory;
pub mod lab_work;
pub mod storage;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, parse_input, CalculationInput, CalculationOutput};
pub use catalog::{find_reagent, ReagentCategory, ReagentState};
pub use config::StoreConfig;
pub use errors::{LabError, LabResult};
pub use inventory::{InventoryItem, InventoryPatch, NewInventoryItem};
pub use lab_work::{LabWork, LabWorkPatch, NewLabWork};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{AppState, LabStore};
pub use units::Unit;
