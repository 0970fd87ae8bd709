//! Bundling configuration
//!
//! A [`BundleConfig`] value is passed explicitly to the aggregator. It can
//! be seeded from a TOML file (`srcbundle.toml` at the root, or an explicit
//! path) and then overridden from the command line.

use crate::core::error::{BundleError, Result};
use crate::core::types::ExtensionSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output file name, created in the root directory
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Default ignore file name, looked up at the root
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Config file picked up from the root when present
pub const CONFIG_FILE_NAME: &str = "srcbundle.toml";

/// Configuration for one bundling run
#[derive(Debug, Clone, PartialEq)]
pub struct BundleConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Destination file; relative paths are resolved against the root
    pub output: PathBuf,
    /// Extensions eligible for bundling
    pub allowed_extensions: ExtensionSet,
    /// Ignore file to load instead of `<root>/.gitignore`
    pub ignore_file: Option<PathBuf>,
    /// List what would be bundled without writing the output
    pub dry_run: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BundleConfig {
    /// Create a configuration with defaults for the given root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            allowed_extensions: ExtensionSet::default(),
            ignore_file: None,
            dry_run: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.allowed_extensions = extensions;
        self
    }

    pub fn with_ignore_file(mut self, ignore_file: impl Into<PathBuf>) -> Self {
        self.ignore_file = Some(ignore_file.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Overlay values from a config file; unset keys keep current values
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(extensions) = file.extensions {
            self.allowed_extensions = extensions;
        }
        if let Some(ignore_file) = file.ignore_file {
            self.ignore_file = Some(ignore_file);
        }
    }

    /// Resolve the root and derived paths
    ///
    /// Fails when the root does not exist or is not a directory.
    pub fn resolve(&self) -> Result<ResolvedPaths> {
        if !self.root.exists() {
            return Err(BundleError::root_not_found(&self.root));
        }
        let root = dunce::canonicalize(&self.root)?;
        if !root.is_dir() {
            return Err(BundleError::RootNotDirectory { path: root });
        }

        let output = absolutize(&root, &self.output);
        let ignore_file = match &self.ignore_file {
            Some(path) => absolutize(&root, path),
            None => root.join(DEFAULT_IGNORE_FILE),
        };

        Ok(ResolvedPaths {
            root,
            output,
            ignore_file,
        })
    }
}

fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Absolute paths derived from a [`BundleConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPaths {
    /// Canonical scan root
    pub root: PathBuf,
    /// Output file location
    pub output: PathBuf,
    /// Ignore file location (may not exist)
    pub ignore_file: PathBuf,
}

/// On-disk configuration file
///
/// ```toml
/// output = "bundle.txt"
/// extensions = ["rs", "toml"]
/// ignore_file = ".bundleignore"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub extensions: Option<ExtensionSet>,
    pub ignore_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load a config file, failing if it cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BundleError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            BundleError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load `srcbundle.toml` from the root if it exists
    pub fn discover(root: &Path) -> Result<Option<Self>> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BundleConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.output, PathBuf::from("output.txt"));
        assert_eq!(config.allowed_extensions, ExtensionSet::default());
        assert!(config.ignore_file.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_resolve_relative_paths_against_root() {
        let temp_dir = TempDir::new().unwrap();
        let config = BundleConfig::new(temp_dir.path())
            .with_output("out/bundle.txt")
            .with_ignore_file(".bundleignore");

        let resolved = config.resolve().unwrap();
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        assert_eq!(resolved.root, root);
        assert_eq!(resolved.output, root.join("out/bundle.txt"));
        assert_eq!(resolved.ignore_file, root.join(".bundleignore"));
    }

    #[test]
    fn test_resolve_default_ignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let resolved = BundleConfig::new(temp_dir.path()).resolve().unwrap();
        assert_eq!(resolved.ignore_file, resolved.root.join(".gitignore"));
    }

    #[test]
    fn test_resolve_rejects_missing_or_file_root() {
        let temp_dir = TempDir::new().unwrap();

        let missing = BundleConfig::new(temp_dir.path().join("nope")).resolve();
        assert!(matches!(missing, Err(BundleError::RootNotFound { .. })));

        let file = temp_dir.path().join("file.js");
        fs::write(&file, "x").unwrap();
        let not_dir = BundleConfig::new(&file).resolve();
        assert!(matches!(not_dir, Err(BundleError::RootNotDirectory { .. })));
    }

    #[test]
    fn test_file_config_overrides() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "output = \"all.txt\"\nextensions = [\"rs\", \".TOML\"]\n",
        )
        .unwrap();

        let file = FileConfig::discover(temp_dir.path()).unwrap().unwrap();
        let mut config = BundleConfig::new(temp_dir.path());
        config.apply_file(file);

        assert_eq!(config.output, PathBuf::from("all.txt"));
        assert!(config.allowed_extensions.contains("toml"));
        assert!(!config.allowed_extensions.contains("js"));
        assert!(config.ignore_file.is_none());
    }

    #[test]
    fn test_file_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileConfig::discover(temp_dir.path()).unwrap().is_none());

        let bad = temp_dir.path().join("bad.toml");
        fs::write(&bad, "colour = \"blue\"\n").unwrap();
        assert!(matches!(
            FileConfig::load(&bad),
            Err(BundleError::Config { .. })
        ));

        assert!(FileConfig::load(&temp_dir.path().join("absent.toml")).is_err());
    }
}
