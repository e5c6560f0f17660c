//! Level filtering policy
//!
//! The facade never filters on its own; `XLog::is_loggable` is answered by an
//! injected [`LevelPolicy`]. The stock policy reads per-tag thresholds from a
//! [`PropertyStore`]:
//! - `EnvPropertyStore`: `log.tag.Net` → `LOG_TAG_NET`
//! - `MemoryPropertyStore`: runtime-settable map
//! - `ChainPropertyStore`: first store holding a value wins

mod traits;
mod property;
mod env_store;
mod memory_store;
mod chain_store;

pub use traits::{LevelPolicy, PropertyStore, SharedLevelPolicy, SharedPropertyStore};
pub use property::{tag_property_key, LevelSetting, PropertyLevelPolicy, DEFAULT_LEVEL};
pub use env_store::EnvPropertyStore;
pub use memory_store::MemoryPropertyStore;
pub use chain_store::ChainPropertyStore;
