//! Per-file filter decisions combining ignore rules and the extension allowlist

use crate::core::types::{ExtensionSet, FileRecord};
use crate::ignore::parser::{IgnoreRules, PatternType};
use std::path::{Path, PathBuf};

/// Result of filtering a single file
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDecision {
    /// File should be bundled
    Included,
    /// File matched an ignore pattern
    Ignored(String), // Pattern that ignored it
    /// File extension is not in the allowlist
    UnmatchedExtension,
    /// File is the output file of the current run
    OutputFile,
}

impl FilterDecision {
    pub fn is_included(&self) -> bool {
        matches!(self, FilterDecision::Included)
    }
}

/// Path filter for a single bundling run
///
/// Holds the rule set and the extension set fixed at start; neither
/// changes while the walk is in progress.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: IgnoreRules,
    extensions: ExtensionSet,
    /// Canonical path of the output file, never bundled into itself
    output: Option<PathBuf>,
}

impl PathFilter {
    pub fn new(rules: IgnoreRules, extensions: ExtensionSet) -> Self {
        Self {
            rules,
            extensions,
            output: None,
        }
    }

    /// Exclude the given absolute path from bundling
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Decide whether a visited file is bundled
    pub fn check(&self, record: &FileRecord) -> FilterDecision {
        if self.output.as_deref() == Some(record.path.as_path()) {
            return FilterDecision::OutputFile;
        }

        if let Some(pattern) = self.rules.last_match(&record.relative_path, false) {
            if pattern.pattern_type == PatternType::Ignore {
                return FilterDecision::Ignored(pattern.original.clone());
            }
        }

        if !self.extensions.matches(&record.path) {
            return FilterDecision::UnmatchedExtension;
        }

        FilterDecision::Included
    }

    /// Whether traversal should enter a directory
    ///
    /// An ignored directory is only pruned when no negation could
    /// re-include something beneath it.
    pub fn should_descend(&self, relative_dir: &Path) -> bool {
        if self.rules.has_negations() {
            return true;
        }
        !self.rules.is_ignored(relative_dir, true)
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }
}
