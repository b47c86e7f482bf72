// 💾 CRUD storage over whole-list JSON blobs
//
// Every entity type lives under one key as a JSON array. Each operation reads
// the full list, changes it in memory, and writes the full list back. Errors
// are logged and collapsed into `false` / empty / `None` for the caller.
// A list that can't be read is never written over.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use crate::db::KeyValueStore;
use crate::entities::{Artisan, Expense, Tenant};

/// A record that can live in a storage list
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Key of the list holding every record of this type
    const STORAGE_KEY: &'static str;

    /// Short name for log lines
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Refresh `updatedAt`
    fn touch(&mut self, at: DateTime<Utc>);
}

/// A partial-field update for a record type
pub trait Patch<T> {
    fn apply(self, record: &mut T);
}

/// Entry point: one collection per entity type over a shared store
pub struct Storage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Storage { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tenants(&self) -> Collection<'_, Tenant, S> {
        Collection::new(&self.store)
    }

    pub fn expenses(&self) -> Collection<'_, Expense, S> {
        Collection::new(&self.store)
    }

    pub fn artisans(&self) -> Collection<'_, Artisan, S> {
        Collection::new(&self.store)
    }

    /// Drop all three lists (reset)
    pub fn clear_all_data(&self) -> bool {
        let keys = [Tenant::STORAGE_KEY, Expense::STORAGE_KEY, Artisan::STORAGE_KEY];

        match self.store.remove_items(&keys) {
            Ok(()) => {
                tracing::info!("Cleared all stored data");
                true
            }
            Err(e) => {
                tracing::error!("Error clearing all data: {:#}", e);
                false
            }
        }
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// CRUD over the list of one record type
pub struct Collection<'a, T, S: KeyValueStore> {
    store: &'a S,
    _record: PhantomData<T>,
}

impl<'a, T: Record, S: KeyValueStore> Collection<'a, T, S> {
    fn new(store: &'a S) -> Self {
        Collection {
            store,
            _record: PhantomData,
        }
    }

    /// All records in insertion order; empty on any read failure
    pub fn get_all(&self) -> Vec<T> {
        match self.read() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error reading {}: {:#}", T::STORAGE_KEY, e);
                Vec::new()
            }
        }
    }

    /// Replace the whole list
    pub fn save_all(&self, records: &[T]) -> bool {
        match self.write(records) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving {}: {:#}", T::STORAGE_KEY, e);
                false
            }
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.get_all().into_iter().find(|record| record.id() == id)
    }

    /// Append a record. The id is not checked for uniqueness.
    pub fn add(&self, record: T) -> bool {
        let Some(mut records) = self.read_for_write() else {
            return false;
        };
        tracing::debug!("Adding {} {}", T::KIND, record.id());
        records.push(record);
        self.save_all(&records)
    }

    /// Apply a partial update. `false` when the id is unknown; the stored list
    /// is left untouched in that case.
    pub fn update<P: Patch<T>>(&self, id: &str, patch: P) -> bool {
        self.update_with(id, |record| patch.apply(record))
    }

    /// Same as `update`, with an arbitrary edit closure
    pub fn update_with<F>(&self, id: &str, update_fn: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let Some(mut records) = self.read_for_write() else {
            return false;
        };

        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            tracing::debug!("Update skipped, {} {} not found", T::KIND, id);
            return false;
        };

        update_fn(record);
        record.touch(Utc::now());

        self.save_all(&records)
    }

    /// Remove the record with this id; the rest keep their order
    pub fn delete(&self, id: &str) -> bool {
        let Some(mut records) = self.read_for_write() else {
            return false;
        };
        records.retain(|record| record.id() != id);
        self.save_all(&records)
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Current list for a read-modify-write. `None` when the stored list
    /// can't be read or decoded; writing back then would drop records.
    fn read_for_write(&self) -> Option<Vec<T>> {
        match self.read() {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::error!("Refusing to rewrite {}: {:#}", T::STORAGE_KEY, e);
                None
            }
        }
    }

    fn read(&self) -> Result<Vec<T>> {
        match self.store.get_item(T::STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {} list", T::KIND)),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set_item(T::STORAGE_KEY, &json)?;
        tracing::debug!("Wrote {} {} records", records.len(), T::KIND);
        Ok(())
    }
}

// ============================================================================
// RAW ACCESS (schema repair)
// ============================================================================

/// Read a list as untyped JSON so records that no longer fit the typed model
/// can still be inspected and fixed.
pub(crate) fn load_raw<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<serde_json::Value>> {
    match store.get_item(key)? {
        Some(json) => serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", key)),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn save_raw<S: KeyValueStore>(store: &S, key: &str, values: &[serde_json::Value]) -> Result<()> {
    let json = serde_json::to_string(values)?;
    store.set_item(key, &json)
}
