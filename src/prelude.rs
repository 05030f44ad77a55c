//! Prelude module for common imports

pub use crate::client::{
    BaseClient, CacheVolume, CiDetectorClient, Client, Container, Directory, EnvSource, File,
    ProcessEnv,
};
pub use crate::golang::{
    self, ApplyTo, BaseOptions, CommonOption, CoverMode, LintOption, LintOptions, TestOption,
    TestOptions,
};
pub use crate::infrastructure::{Config, GociError};
