//! Core types and error handling for srcbundle
//!
//! This module contains the data types shared by the filter, traversal
//! and output stages.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{BundleError, Result};
pub use types::{to_slash_path, BundleReport, ExtensionSet, FileFailure, FileRecord};
