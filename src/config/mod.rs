//! Configuration management for srcbundle
//!
//! Settings come from built-in defaults, an optional `srcbundle.toml`, and
//! command-line flags, in increasing order of precedence.

pub mod bundle_config;

// Re-export commonly used items
pub use bundle_config::{BundleConfig, FileConfig, ResolvedPaths, CONFIG_FILE_NAME};
