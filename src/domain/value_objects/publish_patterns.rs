//! Publish patterns value object
//!
//! Selects top-level entries of the published tree (stale output to clear,
//! legacy directories to prune) using gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

use crate::domain::ports::DirEntry;

/// Entry names that are never selected, whatever the patterns say
pub const PROTECTED_ENTRIES: &[&str] = &[".git"];

#[derive(Debug, Error)]
#[error("invalid publish pattern '{pattern}': {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

/// A compiled set of entry patterns.
///
/// Uses the `ignore` crate so that globs, directory-only patterns (`dir/`)
/// and negations (`!keep.html`) behave as they do in `.gitignore`.
#[derive(Debug)]
pub struct PublishPatterns {
    matcher: Gitignore,
    patterns: Vec<String>,
    protected: Vec<String>,
}

impl Default for PublishPatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl PublishPatterns {
    /// A pattern set that selects nothing
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            patterns: Vec::new(),
            protected: Vec::new(),
        }
    }

    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let mut builder = GitignoreBuilder::new("");
        let mut kept = Vec::new();

        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|e| PatternError {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
            kept.push(trimmed.to_string());
        }

        let matcher = builder.build().map_err(|e| PatternError {
            pattern: kept.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            patterns: kept,
            protected: Vec::new(),
        })
    }

    /// Additionally protect an entry name from selection
    pub fn protect(mut self, name: impl Into<String>) -> Self {
        self.protected.push(name.into());
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, name: &str, is_dir: bool) -> bool {
        if PROTECTED_ENTRIES.contains(&name) || self.protected.iter().any(|p| p == name) {
            return false;
        }
        self.matcher.matched(name, is_dir).is_ignore()
    }

    /// Entries of a directory listing that the patterns select
    pub fn select<'a>(&self, entries: &'a [DirEntry]) -> Vec<&'a DirEntry> {
        entries
            .iter()
            .filter(|e| self.matches(&e.name, e.is_dir))
            .collect()
    }
}
