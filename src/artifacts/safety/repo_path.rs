//! Repository-relative path validation
//!
//! Every user-supplied path is cleaned lexically before any area touches it:
//! `.` segments drop out, `..` segments pop, and anything that would land
//! outside the repository root is rejected outright. No filesystem access is
//! involved, so the check cannot be raced.

use crate::errors::KitError;
use std::path::{Component, Path, PathBuf};

/// Directory holding all repository state, never a valid operation target.
pub const KIT_DIR: &str = ".kit";

/// A cleaned repository-relative path with forward slashes.
///
/// The empty path is valid and names the repository root (so `add .` can
/// expand it to the whole working tree); index entries are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoPath(String);

impl RepoPath {
    /// Clean a raw path and verify it stays inside the repository root.
    ///
    /// Rejects absolute paths, traversal that escapes the root, and paths
    /// reaching into the repository state directory itself.
    pub fn clean(raw: &str) -> Result<Self, KitError> {
        let path = Path::new(raw);
        let mut segments: Vec<String> = Vec::new();

        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(segment) => {
                    segments.push(segment.to_string_lossy().to_string());
                }
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(KitError::UnsafePath(raw.to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(KitError::UnsafePath(raw.to_string()));
                }
            }
        }

        if segments.first().map(String::as_str) == Some(KIT_DIR) {
            return Err(KitError::UnsafePath(raw.to_string()));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RepoPath> for String {
    fn from(value: RepoPath) -> Self {
        value.0
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
