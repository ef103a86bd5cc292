//! `.kitignore` pattern matching
//!
//! Patterns follow the familiar gitignore syntax, one per line. Ignore
//! rules only shape working-tree scans (directory expansion during `add`);
//! they never exempt a file from overwrite protection, and tracked files
//! are matched against the index regardless of any pattern.

use crate::artifacts::safety::repo_path::RepoPath;
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Name of the ignore file at the repository root.
pub const IGNORE_FILE: &str = ".kitignore";

/// Compiled `.kitignore` matcher for one repository.
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Load the ignore file from the repository root. A missing file yields
    /// an empty rule set; a malformed one is an error.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let ignore_file = root.join(IGNORE_FILE);

        if !ignore_file.exists() {
            return Ok(Self {
                matcher: Gitignore::empty(),
            });
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&ignore_file) {
            return Err(err).context(format!("failed to parse {IGNORE_FILE}"));
        }

        let matcher = builder
            .build()
            .context(format!("failed to compile {IGNORE_FILE} patterns"))?;

        Ok(Self { matcher })
    }

    pub fn is_ignored(&self, path: &RepoPath) -> bool {
        self.matcher
            .matched_path_or_any_parents(path.as_str(), false)
            .is_ignore()
    }
}
