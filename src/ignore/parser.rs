//! .gitignore parser and matcher
//!
//! Patterns are compiled once into an ordered [`IgnoreRules`] set. Matching
//! follows gitignore precedence: the last matching pattern wins and a
//! negation re-includes what an earlier pattern excluded.

use crate::core::types::to_slash_path;
use glob::{MatchOptions, Pattern, PatternError};
use std::fs;
use std::path::Path;

/// Wildcards never cross a path separator; leading dots are not special.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled pattern from an ignore file
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The original pattern line
    pub original: String,
    /// The compiled glob pattern
    pub pattern: Pattern,
    /// Type of pattern (normal or negation)
    pub pattern_type: PatternType,
    /// Whether the pattern is anchored to the root
    pub is_anchored: bool,
    /// Whether this pattern only matches directories
    pub directory_only: bool,
}

/// Type of ignore pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    /// Normal ignore pattern
    Ignore,
    /// Negation pattern (starts with !)
    Include,
}

impl CompiledPattern {
    /// Check the pattern against one candidate path.
    ///
    /// `candidate` is slash-separated and relative to the root.
    fn matches_candidate(&self, candidate: &str, is_dir: bool) -> bool {
        if self.directory_only && !is_dir {
            return false;
        }

        if self.is_anchored {
            self.pattern.matches_with(candidate, MATCH_OPTIONS)
        } else {
            let basename = candidate.rsplit('/').next().unwrap_or(candidate);
            self.pattern.matches_with(basename, MATCH_OPTIONS)
        }
    }

    /// Check the pattern against a file path or any of its ancestor directories
    fn matches_path(&self, relative: &str, is_dir: bool) -> bool {
        let ancestor_matches = relative
            .match_indices('/')
            .any(|(idx, _)| self.matches_candidate(&relative[..idx], true));

        ancestor_matches || self.matches_candidate(relative, is_dir)
    }
}

/// Ordered set of ignore rules loaded from a single ignore file
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<CompiledPattern>,
}

impl IgnoreRules {
    /// An empty rule set that matches nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from an ignore file.
    ///
    /// A missing or unreadable file yields an empty rule set.
    pub fn from_file(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => Self::from_content(&String::from_utf8_lossy(&bytes)),
            Err(e) => {
                tracing::debug!("No ignore rules loaded from {}: {}", path.display(), e);
                Self::empty()
            },
        }
    }

    /// Load `.gitignore` from the top level of `root`
    pub fn load(root: &Path) -> Self {
        Self::from_file(&root.join(".gitignore"))
    }

    /// Compile rules from ignore-file content
    pub fn from_content(content: &str) -> Self {
        let mut patterns = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}, // Empty line or comment
                Err(e) => {
                    tracing::warn!(
                        "Skipping invalid ignore pattern on line {}: {} ({})",
                        line_num + 1,
                        line,
                        e
                    );
                },
            }
        }

        Self { patterns }
    }

    /// Check whether a file path relative to the root is ignored
    pub fn matches(&self, relative_path: &Path) -> bool {
        self.is_ignored(relative_path, false)
    }

    /// Check whether a relative path is ignored, knowing if it is a directory
    pub fn is_ignored(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.last_match(relative_path, is_dir)
            .map(|pattern| pattern.pattern_type == PatternType::Ignore)
            .unwrap_or(false)
    }

    /// The pattern that decides a path, if any pattern matches it
    pub fn last_match(&self, relative_path: &Path, is_dir: bool) -> Option<&CompiledPattern> {
        let relative = to_slash_path(relative_path);
        if relative.is_empty() {
            return None;
        }

        // Later patterns override earlier ones
        self.patterns
            .iter()
            .rev()
            .find(|pattern| pattern.matches_path(&relative, is_dir))
    }

    /// Whether any negation pattern exists.
    ///
    /// Without negations nothing below an ignored directory can be
    /// re-included, so the directory can be pruned from traversal.
    pub fn has_negations(&self) -> bool {
        self.patterns
            .iter()
            .any(|p| p.pattern_type == PatternType::Include)
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Parse a single line from an ignore file
fn parse_line(line: &str) -> Result<Option<CompiledPattern>, PatternError> {
    let line = trim_trailing_whitespace(line);

    // Skip empty lines and comments
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (pattern_type, pattern_str) = match line.strip_prefix('!') {
        Some(rest) => (PatternType::Include, rest),
        None => (PatternType::Ignore, line),
    };

    // Escaped leading markers are literal
    let pattern_str = match pattern_str.strip_prefix('\\') {
        Some(rest) if rest.starts_with('#') || rest.starts_with('!') => rest,
        _ => pattern_str,
    };

    // Directory-only patterns end with /
    let (directory_only, clean_pattern) = match pattern_str.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, pattern_str),
    };

    // A slash anywhere else anchors the pattern to the root
    let is_anchored = clean_pattern.contains('/');
    let clean_pattern = clean_pattern.strip_prefix('/').unwrap_or(clean_pattern);
    if clean_pattern.is_empty() {
        return Ok(None);
    }

    let compiled = Pattern::new(&translate_glob(clean_pattern))?;

    Ok(Some(CompiledPattern {
        original: line.to_string(),
        pattern: compiled,
        pattern_type,
        is_anchored,
        directory_only,
    }))
}

/// Strip trailing spaces unless escaped with a backslash
fn trim_trailing_whitespace(line: &str) -> &str {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_end_matches([' ', '\t']);
    if trimmed.ends_with('\\') && trimmed.len() < line.len() {
        // Keep the escaped space
        &line[..trimmed.len() + 1]
    } else {
        trimmed
    }
}

/// Translate gitignore glob syntax into `glob::Pattern` syntax
///
/// Backslash escapes become single-character classes and `[^...]` becomes
/// `[!...]`. A run of `*` is only recursive when it is a whole path
/// component (`**`); anywhere else it collapses to a single `*`.
fn translate_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped @ ('*' | '?' | '[' | ']')) => {
                    if in_class {
                        out.push(escaped);
                    } else {
                        out.push('[');
                        out.push(escaped);
                        out.push(']');
                    }
                },
                Some(other) => out.push(other),
                None => {},
            },
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('!');
                }
                // A leading ] is part of the class
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push(']');
                }
            },
            ']' if in_class => {
                in_class = false;
                out.push(']');
            },
            '*' if !in_class => {
                let mut run = 1;
                while chars.peek() == Some(&'*') {
                    chars.next();
                    run += 1;
                }
                let starts_component = out.is_empty() || out.ends_with('/');
                let ends_component = matches!(chars.peek(), None | Some('/'));
                if run == 2 && starts_component && ends_component {
                    out.push_str("**");
                } else {
                    out.push('*');
                }
            },
            _ => out.push(ch),
        }
    }

    out
}
