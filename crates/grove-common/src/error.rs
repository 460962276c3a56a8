//! Error types for Grove.
//!
//! Entity handlers never fail; these errors only surface at the edges
//! (loading configuration, driving a simulation host).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Grove operations.
#[derive(Debug, Error)]
pub enum GroveError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Configuration file has an extension we cannot read
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Host observed a state that breaks an entity invariant
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

/// Result type alias for Grove operations.
pub type GroveResult<T> = Result<T, GroveError>;
