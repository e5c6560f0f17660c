//! In-memory property store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::PropertyStore;

/// Property store kept in memory and writable at runtime
///
/// Also the landing place for tag levels loaded from the config file.
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    properties: RwLock<HashMap<String, String>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_properties(initial: HashMap<String, String>) -> Self {
        Self {
            properties: RwLock::new(initial),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.properties.write().insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }

    pub fn clear(&self) {
        self.properties.write().clear();
    }

    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.properties.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryPropertyStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("log.tag.A"), None);

        store.set("log.tag.A", "DEBUG");
        assert!(store.has("log.tag.A"));
        assert_eq!(store.get("log.tag.A").as_deref(), Some("DEBUG"));

        store.set("log.tag.A", "WARN");
        assert_eq!(store.get("log.tag.A").as_deref(), Some("WARN"));

        assert_eq!(store.remove("log.tag.A").as_deref(), Some("WARN"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_with_properties() {
        let mut initial = HashMap::new();
        initial.insert("log.tag.Db".to_string(), "ERROR".to_string());
        let store = MemoryPropertyStore::with_properties(initial);
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }
}
