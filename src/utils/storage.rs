// ============================================================================
// STORAGE - Almacenamiento clave/valor persistente (localStorage o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,
    #[error("error escribiendo la clave '{0}'")]
    Write(String),
    #[error("error eliminando la clave '{0}'")]
    Remove(String),
    #[error("error serializando datos: {0}")]
    Serialize(String),
}

/// Almacenamiento clave/valor de strings
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// localStorage del navegador
#[derive(Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

/// Almacenamiento en memoria (tests, o navegador sin localStorage)
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    read_only_keys: RefCell<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace fallar las escrituras de una clave (simula cuota llena)
    #[cfg(test)]
    pub fn reject_writes_to(&self, key: &str) {
        self.read_only_keys.borrow_mut().push(key.to_string());
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only_keys.borrow().iter().any(|k| k == key) {
            return Err(StorageError::Write(key.to_string()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_json<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    storage.set(key, &json)
}

pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let json = storage.get(key)?;
    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrips_json() {
        let storage = MemoryStorage::new();
        save_json(&storage, "numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&storage, "numbers");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn load_json_ignores_garbage() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "not json").unwrap();
        let loaded: Option<Vec<u32>> = load_json(&storage, "numbers");
        assert!(loaded.is_none());
    }

    #[test]
    fn rejected_key_fails_to_write() {
        let storage = MemoryStorage::new();
        storage.reject_writes_to("user");
        assert_eq!(storage.set("user", "{}"), Err(StorageError::Write("user".into())));
        assert!(storage.is_empty());
    }
}
