//! Deterministic directory traversal with ignore-aware pruning

use crate::core::error::{BundleError, Result};
use crate::core::types::FileRecord;
use crate::ignore::checker::PathFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Depth-first file scanner
///
/// Entries of each directory are visited in lexicographic order of file
/// name, so two scans of an unchanged tree yield the same sequence.
/// Symlinked directories are not entered; symlinks to regular files are
/// reported like regular files.
pub struct FileScanner<'a> {
    /// Canonical scan root
    root: &'a Path,
    /// Filter used to prune ignored directories
    filter: &'a PathFilter,
}

impl<'a> FileScanner<'a> {
    pub fn new(root: &'a Path, filter: &'a PathFilter) -> Self {
        Self { root, filter }
    }

    /// Iterate over every file below the root, in traversal order
    ///
    /// Only a failure to read the root itself is yielded as an error;
    /// unreadable entries deeper in the tree are logged and skipped.
    pub fn files(&self) -> impl Iterator<Item = Result<FileRecord>> + 'a {
        let root = self.root;
        let filter = self.filter;
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| should_enter(root, filter, entry))
            .filter_map(move |entry| to_record(root, entry))
    }

    /// Collect all files, stopping at the first fatal error
    pub fn collect_files(&self) -> Result<Vec<FileRecord>> {
        self.files().collect()
    }
}

fn should_enter(root: &Path, filter: &PathFilter, entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let relative = relative_path(root, entry.path());
    let descend = filter.should_descend(&relative);
    if !descend {
        tracing::trace!("Pruning ignored directory {}", relative.display());
    }
    descend
}

fn to_record(root: &Path, entry: walkdir::Result<DirEntry>) -> Option<Result<FileRecord>> {
    match entry {
        Ok(entry) => {
            let file_type = entry.file_type();
            let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if !is_file {
                return None;
            }

            let path = entry.into_path();
            let relative = relative_path(root, &path);
            Some(Ok(FileRecord::new(path, relative)))
        },
        Err(e) if e.depth() == 0 => Some(Err(BundleError::Walk {
            path: root.to_path_buf(),
            message: e.to_string(),
        })),
        Err(e) => {
            let location = e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            tracing::warn!("Skipping unreadable entry {}: {}", location, e);
            None
        },
    }
}

fn relative_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExtensionSet;
    use crate::ignore::parser::IgnoreRules;
    use std::fs;
    use tempfile::TempDir;

    fn scan(root: &Path, rules: &str) -> Vec<String> {
        let filter = PathFilter::new(IgnoreRules::from_content(rules), ExtensionSet::default());
        FileScanner::new(root, &filter)
            .collect_files()
            .unwrap()
            .iter()
            .map(FileRecord::display_path)
            .collect()
    }

    #[test]
    fn test_lexicographic_depth_first_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("c.js"), "").unwrap();
        fs::write(root.join("a.js"), "").unwrap();
        fs::write(root.join("b/z.js"), "").unwrap();
        fs::write(root.join("b/inner/y.js"), "").unwrap();
        fs::write(root.join("b/a.css"), "").unwrap();

        let files = scan(root, "");
        assert_eq!(
            files,
            vec!["a.js", "b/a.css", "b/inner/y.js", "b/z.js", "c.js"]
        );

        // Same tree, same order
        assert_eq!(files, scan(root, ""));
    }

    #[test]
    fn test_ignored_directories_are_pruned() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join("main.js"), "").unwrap();

        assert_eq!(scan(root, "node_modules/\n"), vec!["main.js"]);

        // With a negation every file is still visited
        assert_eq!(
            scan(root, "node_modules/\n!node_modules/pkg/index.js\n"),
            vec!["main.js", "node_modules/pkg/index.js"]
        );
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let filter = PathFilter::new(IgnoreRules::empty(), ExtensionSet::default());

        let result = FileScanner::new(&missing, &filter).collect_files();
        assert!(matches!(result, Err(BundleError::Walk { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_reported_but_directories_not_entered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/file.js"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("real/file.js"), root.join("alias.js")).unwrap();

        assert_eq!(scan(root, ""), vec!["alias.js", "real/file.js"]);
    }
}
