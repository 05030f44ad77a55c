//! Configuration management
//!
//! A `goci.yaml` file holds defaults for every pipeline kind. Each section
//! turns into an option list that callers extend with their own options, so
//! anything given later overrides the file.

use super::errors::{GociError, Result};
use crate::golang::{
    CommonOption, CoverMode, LintOption, TestOption, base_image, base_image_repository,
    base_image_tag, cover_profile, disable_cgo, enable_cgo, enable_race_detector, project_root,
    source_image, source_image_repository, source_image_tag, verbose,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`Config::discover`]
pub const CONFIG_FILE_NAME: &str = "goci.yaml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level
    pub log_level: String,
    /// Forward CI variables into containers when a CI run is detected
    pub ci_env: bool,
    /// Go pipeline defaults
    pub golang: GolangConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            ci_env: true,
            golang: GolangConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GociError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Loads `goci.yaml` from `dir`, or returns defaults when there is none
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = match serde_yaml::from_str(content) {
            Ok(config) => config,
            Err(source) => {
                return Err(GociError::ConfigParse {
                    path: PathBuf::from(path),
                    source,
                });
            }
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Defaults for Go pipelines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolangConfig {
    /// Applies to every pipeline kind
    pub base: BaseConfig,
    /// Test pipeline settings
    pub test: TestConfig,
    /// Lint pipeline settings
    pub lint: LintConfig,
}

impl GolangConfig {
    /// Options for the base pipeline
    #[must_use]
    pub fn base_options(&self) -> Vec<CommonOption> {
        self.base.to_options()
    }

    /// Options for the test pipeline
    #[must_use]
    pub fn test_options(&self) -> Vec<TestOption> {
        self.base
            .to_options()
            .into_iter()
            .map(TestOption::from)
            .chain(self.test.to_options())
            .collect()
    }

    /// Options for the lint pipeline
    #[must_use]
    pub fn lint_options(&self) -> Vec<LintOption> {
        self.base
            .to_options()
            .into_iter()
            .map(LintOption::from)
            .chain(self.lint.to_options())
            .collect()
    }
}

/// Settings shared by every pipeline kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Base image repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image_repository: Option<String>,
    /// Base image tag
    #[serde(skip_serializing_if = "Option::is_none", alias = "version")]
    pub base_image_tag: Option<String>,
    /// Full base image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    /// Explicit cgo setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgo: Option<bool>,
    /// Project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,
}

impl BaseConfig {
    /// Converts the set fields into options
    #[must_use]
    pub fn to_options(&self) -> Vec<CommonOption> {
        let mut opts = Vec::new();

        if let Some(v) = &self.base_image_repository {
            opts.push(base_image_repository(v.as_str()));
        }
        if let Some(v) = &self.base_image_tag {
            opts.push(base_image_tag(v.as_str()));
        }
        if let Some(v) = &self.base_image {
            opts.push(base_image(v.as_str()));
        }
        if let Some(enabled) = self.cgo {
            opts.push(if enabled { enable_cgo() } else { disable_cgo() });
        }
        if let Some(v) = &self.project_root {
            opts.push(project_root(v.as_str()));
        }

        opts
    }
}

/// Test pipeline settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Verbose output
    pub verbose: bool,
    /// Race detector
    pub race: bool,
    /// Coverage mode name; unknown names are ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_mode: Option<String>,
    /// Coverage profile output path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_profile: Option<String>,
}

impl TestConfig {
    /// Converts the set fields into options
    #[must_use]
    pub fn to_options(&self) -> Vec<TestOption> {
        let mut opts = Vec::new();

        if self.verbose {
            opts.push(verbose(true));
        }
        if self.race {
            opts.push(enable_race_detector());
        }
        if let Some(name) = &self.cover_mode {
            match name.parse::<CoverMode>() {
                Ok(mode) => opts.push(mode.into()),
                Err(err) => tracing::warn!(error = %err, "Ignoring cover mode"),
            }
        }
        if let Some(v) = &self.cover_profile {
            opts.push(cover_profile(v.as_str()));
        }

        opts
    }
}

/// Lint pipeline settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Linter source image repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image_repository: Option<String>,
    /// Linter source image tag
    #[serde(skip_serializing_if = "Option::is_none", alias = "linter_version")]
    pub source_image_tag: Option<String>,
    /// Full linter source image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
}

impl LintConfig {
    /// Converts the set fields into options
    #[must_use]
    pub fn to_options(&self) -> Vec<LintOption> {
        let mut opts = Vec::new();

        if let Some(v) = &self.source_image_repository {
            opts.push(source_image_repository(v.as_str()));
        }
        if let Some(v) = &self.source_image_tag {
            opts.push(source_image_tag(v.as_str()));
        }
        if let Some(v) = &self.source_image {
            opts.push(source_image(v.as_str()));
        }

        opts
    }
}
