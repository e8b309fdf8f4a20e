//! Environment lookups.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Read-only view of environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` if it is unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the current process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_sources_return_values() {
        let mut map = HashMap::new();
        map.insert("DEEPSEEK_API_KEY".to_owned(), "sk-test".to_owned());

        assert_eq!(map.var("DEEPSEEK_API_KEY").as_deref(), Some("sk-test"));
        assert_eq!(map.var("QWEN_API_KEY"), None);

        let by_ref = &map;
        assert_eq!(by_ref.var("DEEPSEEK_API_KEY").as_deref(), Some("sk-test"));
    }

    #[test]
    fn process_env_misses_unset_keys() {
        assert_eq!(ProcessEnv.var("PROVIDER_CONFIG_TEST_SURELY_UNSET_VAR"), None);
    }
}
