use std::collections::HashMap;
use std::sync::Mutex;

use kurrent_core::errors::StoreError;
use kurrent_core::KvStore;

/// In-memory key-value store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.entries.lock().map_err(|_| StoreError::Backend {
            message: "store lock poisoned".to_string(),
        })?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.entries.lock().map_err(|_| StoreError::Backend {
            message: "store lock poisoned".to_string(),
        })?;
        map.remove(key);
        Ok(())
    }
}
