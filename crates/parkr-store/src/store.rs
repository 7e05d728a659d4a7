//! The [`Store`] handle.
//!
//! Owns a [`KvBackend`] and an [`EventBus`]. Entity modules add their
//! helpers as further `impl Store` blocks, the same way every collection is
//! read, mutated in memory and written back whole through [`Store::get`] and
//! [`Store::set`].

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use parkr_shared::constants::LOG_RETENTION;

use crate::backend::{KvBackend, MemoryBackend, SqliteBackend};
use crate::error::Result;
use crate::events::{EventBus, StoreEvent};

/// Tunables for a [`Store`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Audit entries kept; older ones are dropped on append.
    pub log_retention: usize,
    /// bcrypt work factor for stored credentials.
    pub bcrypt_cost: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            log_retention: LOG_RETENTION,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

pub struct Store {
    backend: Box<dyn KvBackend>,
    events: EventBus,
    options: StoreOptions,
}

impl Store {
    pub fn new(backend: Box<dyn KvBackend>, options: StoreOptions) -> Self {
        Self {
            backend,
            events: EventBus::new(),
            options,
        }
    }

    /// Store backed by process memory with default options.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()), StoreOptions::default())
    }

    /// Store backed by a SQLite file at `path`.
    pub fn open_at(path: &Path, options: StoreOptions) -> Result<Self> {
        Ok(Self::new(Box::new(SqliteBackend::open_at(path)?), options))
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn backend(&self) -> &dyn KvBackend {
        self.backend.as_ref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Listen for change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        self.events.emit(event);
    }

    /// Value stored under `key`, or `default` when the key is absent, the
    /// backend cannot be read, or the stored JSON does not parse.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "error parsing stored value, using default");
                default
            }
        }
    }

    /// Serialize `value` and overwrite whatever is stored under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        tracing::debug!(key, bytes = raw.len(), "writing collection");
        self.backend.write(key, &raw)
    }

    /// Full collection stored under `key`, empty if absent or unreadable.
    ///
    /// Records are decoded one by one; a record that does not fit `T` is
    /// skipped with a warning and its neighbours still load.
    pub(crate) fn collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let rows: Vec<serde_json::Value> = self.get(key, Vec::new());
        rows.into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_default_when_missing() {
        let store = Store::in_memory();
        let value: Vec<u32> = store.get("nothing", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn set_overwrites_whole_value() {
        let store = Store::in_memory();
        store.set("k", &vec![1, 2, 3]).unwrap();
        store.set("k", &vec![9]).unwrap();
        let value: Vec<u32> = store.get("k", Vec::new());
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn corrupt_value_degrades_to_default() {
        let store = Store::in_memory();
        store.backend().write("k", "{not json").unwrap();
        let value: Vec<String> = store.get("k", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn wrong_shape_degrades_to_default() {
        let store = Store::in_memory();
        store.set("k", &serde_json::json!({"not": "an array"})).unwrap();
        let value: Vec<u32> = store.collection("k");
        assert!(value.is_empty());
    }

    #[test]
    fn malformed_record_skipped_not_whole_collection() {
        let store = Store::in_memory();
        store.set("k", &serde_json::json!([1, "two", 3])).unwrap();
        let value: Vec<u32> = store.collection("k");
        assert_eq!(value, vec![1, 3]);
    }
}
