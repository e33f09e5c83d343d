//! Persistence of history, collections and settings over a key-value
//! substrate.
//!
//! Each store keeps its whole state as one JSON document under a fixed key
//! and writes it back after every mutation.

pub mod collection;
pub mod history;
pub mod settings;

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

pub use collection::{CollectionItem, CollectionKind, CollectionStore};
pub use history::{HistoryRequest, HistoryStore, RequestHistory};
pub use settings::{EditorSettings, SettingsStore, UserSettings};

/// A string-to-string store, like a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

pub(crate) fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Like [`load_json`], but unreadable data counts as absent.
pub(crate) fn load_json_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    match load_json(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load stored data, starting empty");
            T::default()
        }
    }
}

pub(crate) fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value).map_err(|source| Error::Serialization {
        key: key.to_string(),
        source,
    })?;
    store
        .set(key, raw)
        .inspect_err(|e| tracing::warn!(key, error = %e, "failed to save data"))
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
