//! Infrastructure layer
//!
//! Configuration, logging and the error type used at the crate's edges.

mod config;
mod errors;
mod logging;

pub use config::{BaseConfig, CONFIG_FILE_NAME, Config, GolangConfig, LintConfig, TestConfig};
pub use errors::{GociError, Result};
pub use logging::init_logging;
