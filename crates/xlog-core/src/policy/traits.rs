//! Policy and property store traits

use std::sync::Arc;

use crate::level::Level;

/// Decides whether a tag is loggable at a level
///
/// Implementations:
/// - `PropertyLevelPolicy`: per-tag thresholds read from a `PropertyStore`
/// - Host adapters: delegate to the platform's own filter
pub trait LevelPolicy: Send + Sync {
    fn is_loggable(&self, tag: &str, level: Level) -> bool;
}

/// Type alias for an Arc-wrapped policy
pub type SharedLevelPolicy = Arc<dyn LevelPolicy>;

impl<T: LevelPolicy + ?Sized> LevelPolicy for Arc<T> {
    fn is_loggable(&self, tag: &str, level: Level) -> bool {
        (**self).is_loggable(tag, level)
    }
}

/// Read-only key/value source consulted at call time
pub trait PropertyStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Look up a property such as `log.tag.Net`
    fn get(&self, key: &str) -> Option<String>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Type alias for an Arc-wrapped property store
pub type SharedPropertyStore = Arc<dyn PropertyStore>;
