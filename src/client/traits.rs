//! Execution client traits
//!
//! Pipeline assemblies never create containers, caches or host directories
//! themselves; they ask a [`Client`] for handles. Wrapping a client lets
//! callers inject behavior into every produced container.

use super::container::{CacheVolume, Container, Directory};
use std::sync::Arc;

/// Source of container, cache volume and host directory handles
pub trait Client {
    /// Returns a fresh container handle
    fn container(&self) -> Container;

    /// Returns the cache volume named `key`
    fn cache_volume(&self, key: &str) -> CacheVolume;

    /// Returns a handle for a directory on the host filesystem
    fn host_directory(&self, path: &str) -> Directory;
}

impl<C: Client + ?Sized> Client for &C {
    fn container(&self) -> Container {
        (**self).container()
    }

    fn cache_volume(&self, key: &str) -> CacheVolume {
        (**self).cache_volume(key)
    }

    fn host_directory(&self, path: &str) -> Directory {
        (**self).host_directory(path)
    }
}

impl<C: Client + ?Sized> Client for Box<C> {
    fn container(&self) -> Container {
        (**self).container()
    }

    fn cache_volume(&self, key: &str) -> CacheVolume {
        (**self).cache_volume(key)
    }

    fn host_directory(&self, path: &str) -> Directory {
        (**self).host_directory(path)
    }
}

impl<C: Client + ?Sized> Client for Arc<C> {
    fn container(&self) -> Container {
        (**self).container()
    }

    fn cache_volume(&self, key: &str) -> CacheVolume {
        (**self).cache_volume(key)
    }

    fn host_directory(&self, path: &str) -> Directory {
        (**self).host_directory(path)
    }
}

/// Plain client handing out empty handles.
///
/// Decorators wrap this to add cross-cutting behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseClient;

impl BaseClient {
    /// Creates a new base client
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Client for BaseClient {
    fn container(&self) -> Container {
        Container::new()
    }

    fn cache_volume(&self, key: &str) -> CacheVolume {
        CacheVolume::new(key)
    }

    fn host_directory(&self, path: &str) -> Directory {
        Directory::new(path)
    }
}
