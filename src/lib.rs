//! # goci - Go CI pipelines as container plans
//!
//! goci describes the containers that build, test and lint a Go project.
//! It never runs anything itself: every pipeline resolves to a
//! [`Container`](client::Container) description that an external container
//! engine executes.
//!
//! ## Quick Start
//!
//! ```
//! use goci::prelude::*;
//!
//! let client = BaseClient::new();
//! let container = golang::test(
//!     &client,
//!     [TestOption::from(golang::version("1.21")), golang::enable_race_detector()],
//! );
//!
//! assert_eq!(container.image(), Some("docker.io/library/golang:1.21"));
//! assert_eq!(container.exec(), ["go", "test", "-race", "./..."]);
//! assert_eq!(container.env_variable("CGO_ENABLED"), Some("1"));
//! ```
//!
//! ## Features
//!
//! - **Composable options**: one option value can target base, test and lint pipelines
//! - **Content-addressed caches**: build and module caches are keyed by the image reference
//! - **CI passthrough**: [`CiDetectorClient`](client::CiDetectorClient) forwards CI metadata
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod client;
pub mod golang;
pub mod infrastructure;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use client::{BaseClient, CacheVolume, CiDetectorClient, Client, Container, Directory, File};
pub use golang::{CommonOption, CoverMode, LintOption, TestOption};
pub use infrastructure::{Config, GociError};

/// Version of the goci crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
