//! Chained property store with fallback behavior

use super::traits::{PropertyStore, SharedPropertyStore};

/// Tries each store in order and returns the first value found
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use xlog_core::{
///     ChainPropertyStore, EnvPropertyStore, MemoryPropertyStore, PropertyStore, SharedPropertyStore,
/// };
///
/// let from_config = Arc::new(MemoryPropertyStore::new());
/// from_config.set("log.tag.Net", "DEBUG");
///
/// // Environment wins, config file fills the gaps
/// let stores: Vec<SharedPropertyStore> = vec![Arc::new(EnvPropertyStore::new()), from_config];
/// let chain = ChainPropertyStore::new(stores);
/// assert!(chain.has("log.tag.Net"));
/// ```
pub struct ChainPropertyStore {
    stores: Vec<SharedPropertyStore>,
}

impl ChainPropertyStore {
    pub fn new(stores: Vec<SharedPropertyStore>) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &[SharedPropertyStore] {
        &self.stores
    }

    /// Find which store answers a key
    pub fn find_store(&self, key: &str) -> Option<&SharedPropertyStore> {
        self.stores.iter().find(|store| store.has(key))
    }
}

impl PropertyStore for ChainPropertyStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.stores.iter().find_map(|store| store.get(key))
    }
}

impl std::fmt::Debug for ChainPropertyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainPropertyStore")
            .field("stores", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MemoryPropertyStore;
    use std::sync::Arc;

    #[test]
    fn test_first_store_wins() {
        let first = Arc::new(MemoryPropertyStore::new());
        let second = Arc::new(MemoryPropertyStore::new());
        first.set("log.tag.A", "WARN");
        second.set("log.tag.A", "DEBUG");
        second.set("log.tag.B", "ERROR");

        let stores: Vec<SharedPropertyStore> = vec![first.clone(), second];
        let chain = ChainPropertyStore::new(stores);
        assert_eq!(chain.get("log.tag.A").as_deref(), Some("WARN"));
        assert_eq!(chain.get("log.tag.B").as_deref(), Some("ERROR"));
        assert_eq!(chain.get("log.tag.C"), None);

        first.remove("log.tag.A");
        assert_eq!(chain.get("log.tag.A").as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainPropertyStore::new(Vec::new());
        assert!(chain.stores().is_empty());
        assert!(!chain.has("log.tag.A"));
        assert!(chain.find_store("log.tag.A").is_none());
    }
}
