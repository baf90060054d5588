use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::catalog::VehicleType;

/// Storage key under which clients keep the visitor's language choice.
pub const LANGUAGE_PREF_KEY: &str = "colle:lang";

/// Storage key for the saved draft of one vehicle type.
pub fn draft_key(vehicle: VehicleType) -> String {
    format!("colle:draft:{}", vehicle.key())
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("draft storage unavailable: {0}")]
    Unavailable(String),
    #[error("draft storage quota exceeded")]
    QuotaExceeded,
}

/// Key-value persistence for drafts and small preferences.
///
/// Implementations may refuse to store at any time (private browsing, full
/// quota); callers treat every failure as a skipped save, never a fatal one.
pub trait DraftStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store used by the service and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryDraftStore {
    pub fn new() -> MemoryDraftStore {
        MemoryDraftStore::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("draft store mutex poisoned");
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().expect("draft store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("draft store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("draft store mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let store = MemoryDraftStore::new();
        let key = draft_key(VehicleType::Car);

        assert!(store.read(&key).expect("read").is_none());
        store.write(&key, "{}").expect("write");
        assert_eq!(store.read(&key).expect("read").as_deref(), Some("{}"));
        assert_eq!(store.keys(), vec![key.clone()]);

        store.remove(&key).expect("remove");
        assert!(store.read(&key).expect("read").is_none());
    }

    #[test]
    fn draft_keys_are_namespaced_per_vehicle() {
        assert_eq!(draft_key(VehicleType::Snowmobile), "colle:draft:snowmobile");
        assert_eq!(LANGUAGE_PREF_KEY, "colle:lang");
    }
}
