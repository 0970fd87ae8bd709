//! srcbundle - concatenate a source tree into one text file
//!
//! srcbundle walks a directory, drops everything matched by the root
//! `.gitignore` or lacking an allowed extension, and appends each remaining
//! file to a single output file behind a `--- <relative path> ---` header.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use srcbundle::{bundle, BundleConfig, ExtensionSet};
//!
//! let config = BundleConfig::new("./my-project")
//!     .with_output("bundle.txt")
//!     .with_extensions(ExtensionSet::new(["rs", "toml"])?);
//!
//! let report = bundle(config)?;
//! println!("bundled {} files", report.files_bundled());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;

// Re-export commonly used types
pub use crate::core::{
    error::{BundleError, Result},
    types::{BundleReport, ExtensionSet, FileFailure, FileRecord},
};

pub use bundle::{bundle, Aggregator, BundleProgress};

pub use config::{BundleConfig, FileConfig};

pub use ignore::{IgnoreRules, PathFilter};

/// Current version of srcbundle
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
