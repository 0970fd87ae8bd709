//! Core data types for srcbundle

use crate::core::error::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Extensions bundled when nothing else is configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "css", "html"];

/// Case-insensitive set of allowed file extensions
///
/// Entries are stored lowercase and without the leading dot, so `.JS`,
/// `js` and `.js` all name the same extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Build a set from user-supplied entries
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for entry in entries {
            set.insert(normalize_extension(entry.as_ref())?);
        }
        Ok(Self(set))
    }

    /// Check whether a file path carries one of the allowed extensions
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => self.0.contains(&ext.to_string_lossy().to_lowercase()),
            None => false,
        }
    }

    /// Check a bare extension (with or without leading dot)
    pub fn contains(&self, ext: &str) -> bool {
        self.0
            .contains(&ext.trim_start_matches('.').to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|e| format!(".{}", e)).collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl TryFrom<Vec<String>> for ExtensionSet {
    type Error = BundleError;

    fn try_from(entries: Vec<String>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ExtensionSet> for Vec<String> {
    fn from(set: ExtensionSet) -> Self {
        set.0.into_iter().collect()
    }
}

fn normalize_extension(raw: &str) -> Result<String> {
    let ext = raw.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(BundleError::invalid_extension(raw));
    }
    Ok(ext.to_lowercase())
}

/// A file visited during traversal
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
}

impl FileRecord {
    pub fn new(path: PathBuf, relative_path: PathBuf) -> Self {
        Self {
            path,
            relative_path,
        }
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Relative path with `/` separators, as printed in block headers
    pub fn display_path(&self) -> String {
        to_slash_path(&self.relative_path)
    }
}

/// Render a relative path with forward slashes regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// A file that passed both filters but could not be read as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Relative path with `/` separators
    pub path: String,
    /// Underlying read or decode error
    pub error: String,
}

/// Summary of a bundling run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleReport {
    /// Canonical scan root
    pub root: PathBuf,
    /// Output file path
    pub output: PathBuf,
    /// Whether the run wrote anything
    pub dry_run: bool,
    /// Regular files seen by the walk, output file excluded
    pub files_visited: usize,
    /// Files skipped by ignore rules
    pub files_ignored: usize,
    /// Files skipped by the extension allowlist
    pub files_unmatched: usize,
    /// Relative paths of bundled files, in output order
    pub bundled: Vec<String>,
    /// Files that could not be read or decoded
    pub failures: Vec<FileFailure>,
    /// Bytes written to the output file
    pub bytes_written: u64,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
}

impl BundleReport {
    pub fn files_bundled(&self) -> usize {
        self.bundled.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_set_normalizes_entries() {
        let set = ExtensionSet::new([".JS", "css", " .Html "]).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("js"));
        assert!(set.contains(".CSS"));
        assert!(set.contains("html"));
        assert_eq!(set.to_string(), ".css, .html, .js");
    }

    #[test]
    fn test_extension_set_rejects_empty_entries() {
        assert!(matches!(
            ExtensionSet::new(["js", "."]),
            Err(BundleError::InvalidExtension { .. })
        ));
        assert!(ExtensionSet::new(["a/b"]).is_err());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let set = ExtensionSet::default();
        assert!(set.matches(Path::new("index.HTML")));
        assert!(set.matches(Path::new("src/app.Js")));
        assert!(!set.matches(Path::new("logo.png")));
        assert!(!set.matches(Path::new("Makefile")));
        // Only the final suffix counts
        assert!(!set.matches(Path::new("bundle.js.map")));
        // Dotfiles without a further dot have no extension
        assert!(!set.matches(Path::new(".js")));
    }

    #[test]
    fn test_display_path_uses_forward_slashes() {
        let rel: PathBuf = ["sub", "deeper", "c.css"].iter().collect();
        let record = FileRecord::new(PathBuf::from("/root").join(&rel), rel);
        assert_eq!(record.display_path(), "sub/deeper/c.css");
        assert_eq!(record.extension().as_deref(), Some("css"));
    }

    #[test]
    fn test_extension_set_from_toml_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            extensions: ExtensionSet,
        }
        let parsed: Wrapper = toml::from_str("extensions = [\".TS\", \"tsx\"]").unwrap();
        assert!(parsed.extensions.contains("ts"));
        assert!(parsed.extensions.contains("tsx"));
        assert!(toml::from_str::<Wrapper>("extensions = [\"\"]").is_err());
    }
}
