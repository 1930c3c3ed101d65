//! # Application Store
//!
//! [`LabStore`] owns the two collections for the whole session and is the
//! only way to change them. It is created once by the front-end and passed
//! around by reference.
//!
//! ```text
//! LabStore
//! ├── state: AppState
//! │   ├── inventory: Vec<InventoryItem>
//! │   └── lab_works: Vec<LabWork>
//! ├── storage: impl KeyValueStorage
//! └── config: StoreConfig (storage key)
//! ```
//!
//! Opening a store hydrates the state from storage. Every successful
//! mutation writes the whole state back. A failed write is logged and
//! otherwise ignored: the in-memory state stays authoritative.
//!
//! A stored document that cannot be read (corrupt, or written by a newer
//! version) is copied to `<key>.unreadable` before the first write replaces
//! it. If that copy fails, the document is not overwritten.
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::catalog::{ReagentCategory, ReagentState};
//! use chemlab_core::inventory::NewInventoryItem;
//! use chemlab_core::storage::MemoryStorage;
//! use chemlab_core::store::LabStore;
//!
//! let mut store = LabStore::open(MemoryStorage::new());
//! let id = store
//!     .add_inventory_item(NewInventoryItem::custom("Сера", ReagentCategory::Inorganic, ReagentState::Dry, 40.0))
//!     .unwrap();
//! assert!(store.inventory_item(&id).unwrap().is_low_stock());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::consistency::{self, Dashboard, ReagentDemand};
use crate::errors::{LabError, LabResult};
use crate::inventory::{InventoryItem, InventoryPatch, NewInventoryItem};
use crate::lab_work::{LabWork, LabWorkPatch, NewLabWork};
use crate::storage::{decode_state, encode_state, KeyValueStorage};

/// Both collections, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub lab_works: Vec<LabWork>,
}

impl AppState {
    pub fn inventory_item(&self, id: &Uuid) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| &item.id == id)
    }

    pub fn lab_work(&self, id: &Uuid) -> Option<&LabWork> {
        self.lab_works.iter().find(|work| &work.id == id)
    }

    /// Reagent lines of a lab work resolved against current stock
    pub fn reagent_demand(&self, work: &LabWork) -> Vec<ReagentDemand> {
        consistency::reagent_demand(work, &self.inventory)
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Dashboard<'_> {
        Dashboard::build(&self.inventory, &self.lab_works, now)
    }
}

/// Session-wide owner of the application state.
pub struct LabStore<S: KeyValueStorage> {
    state: AppState,
    storage: S,
    config: StoreConfig,
    /// Raw document that failed to load, pending backup
    unreadable: Option<String>,
}

impl<S: KeyValueStorage> LabStore<S> {
    /// Open with the default storage key.
    pub fn open(storage: S) -> Self {
        Self::open_with_config(storage, StoreConfig::default())
    }

    /// Hydrate from `storage`.
    ///
    /// A missing, unreadable or incompatible document yields an empty
    /// state and the problem is logged. An unreadable document is backed
    /// up on the first write (see [`StoreConfig::unreadable_key`]).
    pub fn open_with_config(storage: S, config: StoreConfig) -> Self {
        let key = &config.storage_key;
        let (state, unreadable) = match storage.get(key) {
            Ok(Some(json)) => match decode_state(&json) {
                Ok(state) => {
                    log::info!(
                        "Loaded {} inventory items and {} lab works from '{}'",
                        state.inventory.len(),
                        state.lab_works.len(),
                        key
                    );
                    (state, None)
                }
                Err(e) => {
                    log::warn!(
                        "Could not load state from '{}': {}; starting empty, the stored document goes to '{}' on the next write",
                        key,
                        e,
                        config.unreadable_key()
                    );
                    (AppState::default(), Some(json))
                }
            },
            Ok(None) => {
                log::info!("No stored state under '{}', starting empty", key);
                (AppState::default(), None)
            }
            Err(e) => {
                log::warn!("Could not read '{}': {}; starting empty", key, e);
                (AppState::default(), None)
            }
        };
        LabStore {
            state,
            storage,
            config,
            unreadable,
        }
    }

    /// Current snapshot of both collections
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.state.inventory
    }

    pub fn lab_works(&self) -> &[LabWork] {
        &self.state.lab_works
    }

    pub fn inventory_item(&self, id: &Uuid) -> Option<&InventoryItem> {
        self.state.inventory_item(id)
    }

    pub fn lab_work(&self, id: &Uuid) -> Option<&LabWork> {
        self.state.lab_work(id)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Hand back the storage, e.g. to reopen it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add an item and return its new id.
    pub fn add_inventory_item(&mut self, item: NewInventoryItem) -> LabResult<Uuid> {
        let id = Uuid::new_v4();
        let item = item.into_item(id)?;
        log::info!("Added inventory item {} ({})", item.name, id);
        self.state.inventory.push(item);
        self.flush();
        Ok(id)
    }

    /// Merge `patch` into an existing item.
    pub fn update_inventory_item(&mut self, id: &Uuid, patch: InventoryPatch) -> LabResult<()> {
        let item = self
            .state
            .inventory
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| LabError::not_found("Inventory item", id))?;
        patch.apply(item)?;
        log::info!("Updated inventory item {}", id);
        self.flush();
        Ok(())
    }

    /// Remove an item, returning it if it existed.
    ///
    /// Lab works that reference it are left as they are.
    pub fn remove_inventory_item(&mut self, id: &Uuid) -> Option<InventoryItem> {
        let index = self.state.inventory.iter().position(|item| &item.id == id)?;
        let removed = self.state.inventory.remove(index);
        let referencing = self.state.lab_works.iter().filter(|w| w.uses_inventory_item(id)).count();
        if referencing > 0 {
            log::info!(
                "Removed inventory item {} ({}), still referenced by {} lab work(s)",
                removed.name,
                id,
                referencing
            );
        } else {
            log::info!("Removed inventory item {} ({})", removed.name, id);
        }
        self.flush();
        Some(removed)
    }

    /// Plan a lab work and return its new id.
    pub fn add_lab_work(&mut self, work: NewLabWork) -> LabResult<Uuid> {
        let id = Uuid::new_v4();
        let work = work.into_lab_work(id)?;
        log::info!("Added lab work '{}' on {} ({})", work.title, work.date.format("%Y-%m-%d"), id);
        self.state.lab_works.push(work);
        self.flush();
        Ok(id)
    }

    /// Merge `patch` into an existing lab work.
    pub fn update_lab_work(&mut self, id: &Uuid, patch: LabWorkPatch) -> LabResult<()> {
        let work = self
            .state
            .lab_works
            .iter_mut()
            .find(|work| &work.id == id)
            .ok_or_else(|| LabError::not_found("Lab work", id))?;
        patch.apply(work)?;
        log::info!("Updated lab work {}", id);
        self.flush();
        Ok(())
    }

    /// Remove a lab work, returning it if it existed.
    pub fn remove_lab_work(&mut self, id: &Uuid) -> Option<LabWork> {
        let index = self.state.lab_works.iter().position(|work| &work.id == id)?;
        let removed = self.state.lab_works.remove(index);
        log::info!("Removed lab work '{}' ({})", removed.title, id);
        self.flush();
        Some(removed)
    }

    /// Write the state now, reporting failure to the caller.
    pub fn save(&mut self) -> LabResult<()> {
        self.back_up_unreadable()?;
        let json = encode_state(&self.state)?;
        self.storage.set(&self.config.storage_key, &json)
    }

    /// Copy a document that failed to load aside, once.
    fn back_up_unreadable(&mut self) -> LabResult<()> {
        let Some(raw) = self.unreadable.take() else {
            return Ok(());
        };
        let backup_key = self.config.unreadable_key();
        if let Err(e) = self.storage.set(&backup_key, &raw) {
            self.unreadable = Some(raw);
            return Err(e);
        }
        log::warn!(
            "Unreadable state from '{}' kept under '{}'",
            self.config.storage_key,
            backup_key
        );
        Ok(())
    }

    /// Best-effort write after a mutation
    fn flush(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Failed to persist state under '{}': {}", self.config.storage_key, e);
        }
    }
}
