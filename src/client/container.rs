//! Container handles
//!
//! A [`Container`] is a pure description of what ought to run: the image it
//! starts from, the caches and directories mounted into it, its environment
//! and the command it executes. Nothing here talks to a container runtime.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named, persistent cache volume reused across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheVolume {
    key: String,
}

impl CacheVolume {
    /// Creates a cache volume handle for the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the volume key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CacheVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Directory on the host filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    path: String,
}

impl Directory {
    /// Creates a handle for a host directory (relative or absolute)
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the host path
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A single file inside a container image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    /// Image the file is read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Absolute path of the file inside the image
    pub path: String,
}

/// Description of a container and the process it runs.
///
/// This is the execution plan handed to an external runtime. Every `with_*`
/// method consumes the value and returns the updated description, so plans
/// are built as a chain and never mutated once handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Image reference the container starts from
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    /// Cache volumes keyed by mount path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    caches: BTreeMap<String, CacheVolume>,

    /// Host directories keyed by mount path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    directories: BTreeMap<String, Directory>,

    /// Files copied from other images, keyed by destination path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    files: BTreeMap<String, File>,

    /// Working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    workdir: Option<String>,

    /// Environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,

    /// Command arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exec: Vec<String>,
}

impl Container {
    /// Creates an empty container description
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image the container starts from
    pub fn from(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Mounts a cache volume at `path`
    pub fn with_mounted_cache(mut self, path: impl Into<String>, cache: CacheVolume) -> Self {
        self.caches.insert(path.into(), cache);
        self
    }

    /// Mounts a host directory at `path`
    pub fn with_mounted_directory(mut self, path: impl Into<String>, dir: Directory) -> Self {
        self.directories.insert(path.into(), dir);
        self
    }

    /// Copies `file` into the container at `path`
    pub fn with_file(mut self, path: impl Into<String>, file: File) -> Self {
        self.files.insert(path.into(), file);
        self
    }

    /// Sets the working directory
    pub fn with_workdir(mut self, path: impl Into<String>) -> Self {
        self.workdir = Some(path.into());
        self
    }

    /// Sets an environment variable, replacing any previous value
    pub fn with_env_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Sets the command to execute
    pub fn with_exec<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exec = args.into_iter().map(Into::into).collect();
        self
    }

    /// References a file inside this container's image
    pub fn file(&self, path: impl Into<String>) -> File {
        File {
            image: self.image.clone(),
            path: path.into(),
        }
    }

    /// Image reference, if set
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Cache volumes keyed by mount path
    pub fn caches(&self) -> &BTreeMap<String, CacheVolume> {
        &self.caches
    }

    /// Host directories keyed by mount path
    pub fn directories(&self) -> &BTreeMap<String, Directory> {
        &self.directories
    }

    /// Copied files keyed by destination path
    pub fn files(&self) -> &BTreeMap<String, File> {
        &self.files
    }

    /// Working directory, if set
    pub fn workdir(&self) -> Option<&str> {
        self.workdir.as_deref()
    }

    /// All environment variables
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Looks up a single environment variable
    pub fn env_variable(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    /// Command arguments; empty when no command was set
    pub fn exec(&self) -> &[String] {
        &self.exec
    }
}
