//! Environment variable property store

use std::env;

use super::traits::PropertyStore;

/// Property store that reads environment variables
///
/// Keys are mapped to variable names by upper-casing them and replacing
/// every character outside `[A-Z0-9]` with `_`, so `log.tag.Net` is read from
/// `LOG_TAG_NET` and `log.tag.http-client` from `LOG_TAG_HTTP_CLIENT`.
#[derive(Debug, Default)]
pub struct EnvPropertyStore {
    _private: (),
}

impl EnvPropertyStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Environment variable consulted for a property key
    pub fn var_name(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl PropertyStore for EnvPropertyStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(Self::var_name(key)).ok().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_mapping() {
        assert_eq!(EnvPropertyStore::var_name("log.tag.Net"), "LOG_TAG_NET");
        assert_eq!(
            EnvPropertyStore::var_name("log.tag.http-client"),
            "LOG_TAG_HTTP_CLIENT"
        );
    }

    #[test]
    fn test_reads_environment() {
        let store = EnvPropertyStore::new();
        env::set_var("LOG_TAG_XLOG_ENV_STORE_TEST", "DEBUG");
        assert_eq!(
            store.get("log.tag.xlog_env_store_test").as_deref(),
            Some("DEBUG")
        );
        env::remove_var("LOG_TAG_XLOG_ENV_STORE_TEST");
        assert_eq!(store.get("log.tag.xlog_env_store_test"), None);
    }
}
