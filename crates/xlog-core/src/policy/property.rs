//! Property-backed level policy

use std::str::FromStr;

use super::traits::{LevelPolicy, PropertyStore, SharedPropertyStore};
use crate::level::{Level, ParseLevelError};

/// Threshold used when a tag has no property
pub const DEFAULT_LEVEL: Level = Level::Info;

const TAG_PREFIX: &str = "log.tag.";

/// Property key holding the threshold for a tag
pub fn tag_property_key(tag: &str) -> String {
    format!("{TAG_PREFIX}{tag}")
}

/// Value of a `log.tag.<TAG>` property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSetting {
    /// Lines at or above this level are loggable
    Threshold(Level),
    /// Nothing is loggable for the tag
    Suppress,
}

impl LevelSetting {
    pub fn allows(self, level: Level) -> bool {
        match self {
            LevelSetting::Threshold(min) => level >= min,
            LevelSetting::Suppress => false,
        }
    }
}

impl FromStr for LevelSetting {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("SUPPRESS") || trimmed.eq_ignore_ascii_case("S") {
            return Ok(LevelSetting::Suppress);
        }
        trimmed.parse().map(LevelSetting::Threshold)
    }
}

/// Per-tag thresholds read from a property store on every query
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use xlog_core::{Level, LevelPolicy, MemoryPropertyStore, PropertyLevelPolicy};
///
/// let props = Arc::new(MemoryPropertyStore::new());
/// let policy = PropertyLevelPolicy::new(props.clone());
/// assert!(!policy.is_loggable("Net", Level::Debug));
///
/// props.set("log.tag.Net", "DEBUG");
/// assert!(policy.is_loggable("Net", Level::Debug));
/// ```
pub struct PropertyLevelPolicy {
    store: SharedPropertyStore,
    default_level: Level,
}

impl PropertyLevelPolicy {
    pub fn new(store: SharedPropertyStore) -> Self {
        Self {
            store,
            default_level: DEFAULT_LEVEL,
        }
    }

    /// Override the threshold used for tags without a property
    pub fn with_default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Effective setting for a tag; unparseable values fall back to the default
    pub fn setting_for(&self, tag: &str) -> LevelSetting {
        self.store
            .get(&tag_property_key(tag))
            .and_then(|value| value.parse().ok())
            .unwrap_or(LevelSetting::Threshold(self.default_level))
    }
}

impl LevelPolicy for PropertyLevelPolicy {
    fn is_loggable(&self, tag: &str, level: Level) -> bool {
        self.setting_for(tag).allows(level)
    }
}

impl std::fmt::Debug for PropertyLevelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyLevelPolicy")
            .field("store", &self.store.name())
            .field("default_level", &self.default_level)
            .finish()
    }
}
