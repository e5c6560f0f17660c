//! File-based configuration (YAML)
//!
//! Looked up at `$XLOG_CONFIG`, falling back to `~/.config/xlog/config.yaml`.
//! A missing file means defaults: console only, INFO threshold.
//!
//! ```yaml
//! file_logging: true
//! file: /var/tmp/myapp.log
//! sync: false
//! console: split
//! default_level: INFO
//! tags:
//!   Net: DEBUG
//!   Noisy: SUPPRESS
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::{NoOpConsole, StderrConsole};
use crate::error::{XlogError, XlogResult};
use crate::facade::XLog;
use crate::level::Level;
use crate::policy::{
    tag_property_key, ChainPropertyStore, EnvPropertyStore, LevelSetting, MemoryPropertyStore,
    PropertyLevelPolicy, SharedPropertyStore,
};

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "XLOG_CONFIG";
/// Environment override for `file_logging`
pub const FILE_LOGGING_VAR: &str = "XLOG_FILE_LOGGING";
/// Environment override for `file`
pub const FILE_VAR: &str = "XLOG_FILE";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid level {value:?} for tag {tag}")]
    InvalidLevel { tag: String, value: String },

    #[error("Invalid value {value:?} for {name}")]
    InvalidOverride { name: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which console sink to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    /// Everything on stderr
    #[default]
    Stderr,
    /// Below WARN on stdout, the rest on stderr
    Split,
    /// Discard console output
    None,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XlogConfig {
    /// Duplicate lines to a file
    pub file_logging: bool,

    /// Log file; defaults to [`default_log_path`]
    pub file: Option<PathBuf>,

    /// Sync to the device after every line
    pub sync: bool,

    pub console: ConsoleKind,

    /// Threshold for tags without an entry in `tags`
    pub default_level: Level,

    /// Per-tag level names or `SUPPRESS`
    pub tags: BTreeMap<String, String>,
}

impl Default for XlogConfig {
    fn default() -> Self {
        Self {
            file_logging: false,
            file: None,
            sync: false,
            console: ConsoleKind::default(),
            default_level: Level::Info,
            tags: BTreeMap::new(),
        }
    }
}

/// `~/.config/xlog/config.yaml` (platform config dir)
pub fn user_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join("xlog").join("config.yaml")
}

/// `<local data dir>/xlog/xlog.log`
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join("xlog")
        .join("xlog.log")
}

fn parse_bool(name: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

impl XlogConfig {
    /// Load a config file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from `$XLOG_CONFIG` or the user config path, then apply env overrides
    pub fn load_default() -> ConfigResult<Self> {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(user_config_path);
        let mut config = Self::load(path)?;
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: XlogConfig = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize YAML: {}", e)))
    }

    /// Export as JSON, e.g. for a host settings screen
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize JSON: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Every tag entry must be a level name or `SUPPRESS`
    pub fn validate(&self) -> ConfigResult<()> {
        for (tag, value) in &self.tags {
            if value.parse::<LevelSetting>().is_err() {
                return Err(ConfigError::InvalidLevel {
                    tag: tag.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Apply `XLOG_FILE_LOGGING` and `XLOG_FILE` from the process environment
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from any lookup; set values win over the file
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(value) = lookup(FILE_LOGGING_VAR) {
            self.file_logging = parse_bool(FILE_LOGGING_VAR, &value)?;
        }
        if let Some(value) = lookup(FILE_VAR).filter(|v| !v.is_empty()) {
            self.file = Some(PathBuf::from(value));
        }
        Ok(())
    }

    /// Effective log file path
    pub fn log_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_log_path)
    }

    /// Tag entries as `log.tag.<TAG>` properties
    pub fn tag_properties(&self) -> MemoryPropertyStore {
        let store = MemoryPropertyStore::new();
        for (tag, value) in &self.tags {
            store.set(&tag_property_key(tag), value);
        }
        store
    }

    /// Policy reading the environment first, then the config file's tags
    pub fn policy(&self) -> PropertyLevelPolicy {
        let stores: Vec<SharedPropertyStore> = vec![
            Arc::new(EnvPropertyStore::new()),
            Arc::new(self.tag_properties()),
        ];
        PropertyLevelPolicy::new(Arc::new(ChainPropertyStore::new(stores)))
            .with_default_level(self.default_level)
    }

    /// Build and initialise a logger from this configuration
    ///
    /// The default log directory is created when needed; an explicit `file`
    /// must point into an existing directory.
    pub fn build(&self) -> XlogResult<XLog> {
        let log = match self.console {
            ConsoleKind::Stderr => XLog::new(StderrConsole::new()),
            ConsoleKind::Split => XLog::new(StderrConsole::split_streams()),
            ConsoleKind::None => XLog::new(NoOpConsole::new()),
        }
        .with_policy(self.policy())
        .with_sync(self.sync);

        let path = self.log_path();
        if self.file_logging && self.file.is_none() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| XlogError::open(&path, e))?;
            }
        }
        log.init(None, self.file_logging, &path)?;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LevelPolicy;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = XlogConfig::load(dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, XlogConfig::default());
        assert!(!config.file_logging);
        assert_eq!(config.default_level, Level::Info);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
file_logging: true
file: /var/tmp/app.log
console: split
default_level: WARN
tags:
  Net: DEBUG
  Noisy: SUPPRESS
"#;
        let config = XlogConfig::from_yaml(yaml).unwrap();
        assert!(config.file_logging);
        assert_eq!(config.log_path(), PathBuf::from("/var/tmp/app.log"));
        assert_eq!(config.console, ConsoleKind::Split);
        assert_eq!(config.default_level, Level::Warn);
        assert_eq!(config.tags.get("Net").map(String::as_str), Some("DEBUG"));
        assert!(!config.sync);
    }

    #[test]
    fn test_default_level_any_case_or_letter() {
        for value in ["debug", "Debug", "D", "d"] {
            let yaml = format!("file_logging: true\ndefault_level: {value}\n");
            let config = XlogConfig::from_yaml(&yaml).unwrap();
            assert_eq!(config.default_level, Level::Debug, "value {value}");
            assert!(config.file_logging);
        }
        assert!(matches!(
            XlogConfig::from_yaml("default_level: loud"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_tag_level_rejected() {
        let err = XlogConfig::from_yaml("tags:\n  Net: LOUD\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel { ref tag, .. } if tag == "Net"));
    }

    #[test]
    fn test_bad_yaml_rejected() {
        assert!(matches!(
            XlogConfig::from_yaml("file_logging: [not, a, bool]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = XlogConfig::default();
        config.file_logging = true;
        config.tags.insert("Db".to_string(), "ERROR".to_string());
        config.save(&path).unwrap();

        let reloaded = XlogConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);

        let json = reloaded.to_json().unwrap();
        assert!(json.contains("\"file_logging\": true"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = XlogConfig::from_yaml("file_logging: false\nfile: /a.log\n").unwrap();
        let env: HashMap<&str, &str> =
            [(FILE_LOGGING_VAR, "true"), (FILE_VAR, "/b.log")].into_iter().collect();

        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert!(config.file_logging);
        assert_eq!(config.log_path(), PathBuf::from("/b.log"));
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = XlogConfig::default();
        let err = config
            .apply_overrides(|name| (name == FILE_LOGGING_VAR).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }

    #[test]
    fn test_policy_uses_tags_and_default() {
        let mut config = XlogConfig::default();
        config.default_level = Level::Error;
        config.tags.insert("XlogCfgTestNet".to_string(), "DEBUG".to_string());

        let policy = config.policy();
        assert!(policy.is_loggable("XlogCfgTestNet", Level::Debug));
        assert!(!policy.is_loggable("XlogCfgTestOther", Level::Warn));
    }

    #[test]
    fn test_build_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("built.log");
        let config = XlogConfig {
            file_logging: true,
            file: Some(path.clone()),
            console: ConsoleKind::None,
            ..XlogConfig::default()
        };

        let log = config.build().unwrap();
        log.info("Cfg", "from config").unwrap();
        assert!(fs::read_to_string(&path).unwrap().ends_with("\tI\tCfg\tfrom config\n"));
    }

    #[test]
    fn test_build_console_only() {
        let log = XlogConfig {
            console: ConsoleKind::None,
            ..XlogConfig::default()
        }
        .build()
        .unwrap();
        assert!(!log.is_file_logging());
    }
}
