//! Execution client layer
//!
//! This module contains the handles pipeline assemblies build on and the
//! client abstraction that hands them out.

pub mod ci;
mod container;
mod traits;

pub use ci::{CiDetectorClient, EnvSource, ProcessEnv};
pub use container::{CacheVolume, Container, Directory, File};
pub use traits::{BaseClient, Client};
