//! File filtering with .gitignore support
//!
//! This module loads the root `.gitignore` into an ordered rule set,
//! combines it with the extension allowlist into a per-file decision, and
//! walks the tree in a fixed order. Patterns support wildcards, negation,
//! directory-only and anchored forms.

pub mod checker;
pub mod parser;
pub mod scanner;

// Re-export commonly used items
pub use checker::{FilterDecision, PathFilter};
pub use parser::{CompiledPattern, IgnoreRules, PatternType};
pub use scanner::FileScanner;
