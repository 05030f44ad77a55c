//! CI environment passthrough
//!
//! Wraps a [`Client`] so every container it produces carries the metadata of
//! the CI run it was created in. The host environment is read through an
//! injected [`EnvSource`], never directly.

use super::container::{CacheVolume, Container, Directory};
use super::traits::Client;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Variable that signals a GitHub Actions run
pub const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";

/// Variables forwarded into containers when running on GitHub Actions
pub const GITHUB_ACTIONS_VARIABLES: &[&str] = &[
    GITHUB_ACTIONS,
    "GITHUB_HEAD_REF",
    "GITHUB_REF",
    "GITHUB_REPOSITORY",
    "GITHUB_RUN_ID",
    "GITHUB_SERVER_URL",
    "GITHUB_SHA",
    "GITHUB_WORKFLOW",
];

/// Lookup of host environment variables
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when it is not set
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Client decorator that injects CI variables into every container.
#[derive(Debug, Clone)]
pub struct CiDetectorClient<C, E = ProcessEnv> {
    inner: C,
    env: E,
}

impl<C: Client> CiDetectorClient<C> {
    /// Wraps `inner`, reading the process environment
    pub fn new(inner: C) -> Self {
        Self::with_env(inner, ProcessEnv)
    }
}

impl<C: Client, E: EnvSource> CiDetectorClient<C, E> {
    /// Wraps `inner`, reading variables from `env`
    pub fn with_env(inner: C, env: E) -> Self {
        Self { inner, env }
    }

    /// Returns true when a GitHub Actions run is detected
    pub fn is_github_actions(&self) -> bool {
        self.env
            .var(GITHUB_ACTIONS)
            .is_some_and(|value| !value.is_empty())
    }
}

impl<C: Client, E: EnvSource> Client for CiDetectorClient<C, E> {
    fn container(&self) -> Container {
        let container = self.inner.container();

        if !self.is_github_actions() {
            return container;
        }

        tracing::debug!("GitHub Actions detected, forwarding CI variables");

        GITHUB_ACTIONS_VARIABLES
            .iter()
            .fold(container, |container, name| {
                let value = self.env.var(name).unwrap_or_default();
                container.with_env_variable(*name, value)
            })
    }

    fn cache_volume(&self, key: &str) -> CacheVolume {
        self.inner.cache_volume(key)
    }

    fn host_directory(&self, path: &str) -> Directory {
        self.inner.host_directory(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BaseClient;
    use pretty_assertions::assert_eq;
    use std::hash::{BuildHasherDefault, DefaultHasher};

    fn github_env() -> HashMap<String, String> {
        [
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_REF", "refs/heads/main"),
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("GITHUB_SHA", "0123abcd"),
            ("GITHUB_RUN_ID", "42"),
            ("GITHUB_SERVER_URL", "https://github.com"),
            ("GITHUB_WORKFLOW", "CI"),
            ("UNRELATED", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_no_ci_leaves_container_untouched() {
        let client = CiDetectorClient::with_env(BaseClient, HashMap::<String, String>::new());

        assert!(!client.is_github_actions());
        assert_eq!(client.container(), Container::new());
    }

    #[test]
    fn test_empty_indicator_is_not_ci() {
        let env: HashMap<String, String> = [("GITHUB_ACTIONS".to_string(), String::new())].into();
        let client = CiDetectorClient::with_env(BaseClient, env);

        assert!(!client.is_github_actions());
        assert!(client.container().env().is_empty());
    }

    #[test]
    fn test_github_actions_variables_forwarded() {
        let client = CiDetectorClient::with_env(BaseClient, github_env());
        let container = client.container();

        assert_eq!(container.env_variable("GITHUB_ACTIONS"), Some("true"));
        assert_eq!(
            container.env_variable("GITHUB_REPOSITORY"),
            Some("acme/widgets")
        );
        assert_eq!(container.env_variable("GITHUB_SHA"), Some("0123abcd"));
        assert_eq!(container.env_variable("UNRELATED"), None);
        assert_eq!(container.env().len(), GITHUB_ACTIONS_VARIABLES.len());
    }

    #[test]
    fn test_missing_variables_forwarded_empty() {
        let client = CiDetectorClient::with_env(BaseClient, github_env());

        assert_eq!(client.container().env_variable("GITHUB_HEAD_REF"), Some(""));
    }

    #[test]
    fn test_pipelines_see_ci_variables() {
        let client = CiDetectorClient::with_env(BaseClient, github_env());
        let container = crate::golang::test(&client, [crate::golang::enable_race_detector()]);

        assert_eq!(
            container.env_variable("GITHUB_REF"),
            Some("refs/heads/main")
        );
        assert_eq!(container.env_variable("CGO_ENABLED"), Some("1"));
        assert_eq!(container.exec(), ["go", "test", "-race", "./..."]);
    }

    #[test]
    fn test_custom_hasher_map_source() {
        let mut env: HashMap<String, String, BuildHasherDefault<DefaultHasher>> =
            HashMap::default();
        env.insert(GITHUB_ACTIONS.to_string(), "true".to_string());
        let client = CiDetectorClient::with_env(BaseClient, env);

        assert!(client.is_github_actions());
        assert_eq!(
            client.container().env_variable(GITHUB_ACTIONS),
            Some("true")
        );
    }

    #[test]
    fn test_other_handles_delegate() {
        let client = CiDetectorClient::with_env(BaseClient, github_env());

        assert_eq!(client.cache_volume("k").key(), "k");
        assert_eq!(client.host_directory("/tmp").path(), "/tmp");
    }
}
