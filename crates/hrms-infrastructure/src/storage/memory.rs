//! In-memory session storage.

use hrms_core::error::Result;
use hrms_core::session::storage::SessionStorage;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-lifetime key/value store.
///
/// The direct analogue of browser `sessionStorage`: contents live exactly as
/// long as the process and are never written to disk. Also the default
/// storage for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.get("accessToken"), None);

        storage.set("accessToken", "tok-1").unwrap();
        assert_eq!(storage.get("accessToken"), Some("tok-1".to_string()));

        storage.set("accessToken", "tok-2").unwrap();
        assert_eq!(storage.get("accessToken"), Some("tok-2".to_string()));

        storage.remove("accessToken").unwrap();
        assert_eq!(storage.get("accessToken"), None);

        // Removing an absent key is not an error.
        storage.remove("accessToken").unwrap();
    }
}
