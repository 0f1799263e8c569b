//! Environment variable naming and lookup.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// An environment variable name derived from a tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvVar(String);

impl EnvVar {
    /// Every `-` and `.` becomes `_`, then the whole name is upper-cased.
    pub fn new(name: &str) -> Self {
        let replaced: String = name
            .chars()
            .map(|c| if c == '-' || c == '.' { '_' } else { c })
            .collect();
        Self(replaced.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the variable in `env`.
    pub fn get<E: Env + ?Sized>(&self, env: &E) -> Option<String> {
        env.lookup(&self.0)
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key/value view of an environment.
pub trait Env {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<E: Env + ?Sized> Env for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Env for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Env for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Env for [(&str, &str)] {
    fn lookup(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

impl<const N: usize> Env for [(&str, &str); N] {
    fn lookup(&self, key: &str) -> Option<String> {
        self.as_slice().lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name() {
        assert_eq!(EnvVar::new("Env.Var.x1-Z").as_str(), "ENV_VAR_X1_Z");
        assert_eq!(EnvVar::new("a").as_str(), "A");
        assert_eq!(EnvVar::new("flag_value").to_string(), "FLAG_VALUE");
    }

    #[test]
    fn test_map_env() {
        let mut env = HashMap::new();
        env.insert("PORT".to_string(), "80".to_string());
        assert_eq!(EnvVar::new("port").get(&env), Some("80".to_string()));
        assert_eq!(EnvVar::new("host").get(&env), None);
    }

    #[test]
    fn test_pair_env() {
        let env = [("A_B", "1")];
        assert_eq!(EnvVar::new("a-b").get(&env), Some("1".to_string()));
        assert_eq!(EnvVar::new("a.c").get(&env), None);
    }

    #[test]
    fn test_process_env_missing() {
        assert_eq!(
            ProcessEnv.lookup("STRUCTCONF_CORE_TEST_SURELY_UNSET_VARIABLE"),
            None
        );
    }
}
