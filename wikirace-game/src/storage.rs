//! Durable key-value storage seam and record keys
//!
//! Each store occupies exactly one key and performs a whole-record
//! read-modify-write per call. A malformed stored record is discarded in
//! favor of the default value; corruption never blocks the game.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Ranked record of completed races.
pub const LEADERBOARD_KEY: &str = "wiki-racer-leaderboard";
/// The single challenge for the current calendar day.
pub const DAILY_RACE_KEY: &str = "wiki-racer-daily-race";
/// Every identity ever registered on this profile.
pub const USERS_KEY: &str = "wiki-racer-users";
/// The signed-in identity, independent of the registry itself.
pub const CURRENT_USER_KEY: &str = "wiki-racer-current-user";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Flat textual storage scoped to the local profile.
///
/// Platform implementations sit on `localStorage` in the browser; tests use
/// [`MemoryStorage`]. No transactional guarantees across keys.
pub trait KeyValueStorage {
    /// Fetch the text stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Decode the record under `key`, falling back to `T::default()` on a
/// missing key, an unreachable backend, or malformed text.
pub fn load_json_or_default<T>(storage: &impl KeyValueStorage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("discarding corrupted record under {key}: {err}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("storage read failed for {key}: {err}");
            T::default()
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns an error if serialization fails or the backend refuses the write.
pub fn save_json<T: Serialize>(
    storage: &impl KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value)?;
    storage.set(key, &text)
}

/// In-memory storage for tests and headless runs.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrips_text() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn corrupted_record_degrades_to_default() {
        let storage = MemoryStorage::new();
        storage.set("nums", "{not json").unwrap();
        let loaded: Vec<u32> = load_json_or_default(&storage, "nums");
        assert!(loaded.is_empty());
    }

    #[test]
    fn missing_record_degrades_to_default() {
        let storage = MemoryStorage::new();
        let loaded: Vec<u32> = load_json_or_default(&storage, "absent");
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_preserves_value() {
        let storage = MemoryStorage::new();
        save_json(&storage, "nums", &vec![3_u32, 1, 2]).unwrap();
        let loaded: Vec<u32> = load_json_or_default(&storage, "nums");
        assert_eq!(loaded, vec![3, 1, 2]);
    }
}
