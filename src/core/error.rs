//! Error types for srcbundle

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bundling operations
///
/// Only setup and output failures surface as errors. A file that cannot be
/// read or decoded is recorded in the run report instead.
#[derive(Error, Debug)]
pub enum BundleError {
    /// Root-related errors
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("Failed to enumerate {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Output-related errors
    #[error("Cannot create output file {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed writing to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Invalid extension: {ext:?}")]
    InvalidExtension { ext: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundleError {
    /// Create a new root not found error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Create a new configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a new invalid extension error
    pub fn invalid_extension(ext: impl Into<String>) -> Self {
        Self::InvalidExtension { ext: ext.into() }
    }

    /// Whether this error happened before any output was produced
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. }
                | Self::RootNotDirectory { .. }
                | Self::OutputCreate { .. }
                | Self::Config { .. }
                | Self::InvalidExtension { .. }
        )
    }
}

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, BundleError>;
