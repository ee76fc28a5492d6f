//! Unified error types for the Stevedore workspace.
//!
//! Extraction errors carry the path of the offending document so the CLI
//! can surface it; pull failures are per-image data, not errors, and live
//! in `stevedore-pull`'s report types instead.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StevedoreError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A compose document is malformed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// An `include` directive references a path that cannot be resolved.
    #[error("cannot resolve include {path} (included from {included_from})")]
    IncludeResolution {
        /// The include target that does not exist.
        path: PathBuf,
        /// Document containing the offending directive.
        included_from: PathBuf,
    },

    /// The container runtime is missing or unusable.
    #[error("container runtime unavailable: {message}")]
    Runtime {
        /// Description of what went wrong.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StevedoreError>;
