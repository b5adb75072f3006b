//! # UI Error Types
//!
//! Element, tree and renderer operations never fail; they degrade to no-ops.
//! These errors cover loading the configuration only.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up the UI.
#[derive(Error, Debug)]
pub enum UiError {
    /// The configuration file could not be read.
    #[error("cannot read configuration {path}: {source}")]
    ConfigRead {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has wrongly typed values.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but describes an unusable setup.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for UI setup.
pub type UiResult<T> = Result<T, UiError>;
