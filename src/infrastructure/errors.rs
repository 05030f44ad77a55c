//! Error types for the configuration and output edges

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the pure pipeline assembly
#[derive(Error, Debug)]
pub enum GociError {
    /// Reading or writing a file failed
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for [`Config`](super::Config)
    #[error("Invalid configuration in '{}': {source}", .path.display())]
    ConfigParse {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        source: serde_yaml::Error,
    },

    /// Rendering a plan failed
    #[error("Failed to render plan: {0}")]
    Render(String),
}

impl From<serde_json::Error> for GociError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for GociError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result alias for fallible edges
pub type Result<T> = std::result::Result<T, GociError>;
