use crate::errors::KitError;

/// A conflict that blocks a planned working tree migration.
///
/// Conflicts are collected across the whole plan before any file is touched;
/// the first one in path order aborts the migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A tracked file whose on-disk content differs from its staged digest.
    /// Skipped when the migration is forced.
    LocalChanges(String),
    /// An untracked file sitting where the target wants different content.
    /// Never skipped, forced or not.
    UntrackedOverwrite(String),
}

impl Conflict {
    pub fn path(&self) -> &str {
        match self {
            Conflict::LocalChanges(path) | Conflict::UntrackedOverwrite(path) => path,
        }
    }
}

impl From<Conflict> for KitError {
    fn from(value: Conflict) -> Self {
        match value {
            Conflict::LocalChanges(path) => KitError::LocalChangesPresent(path),
            Conflict::UntrackedOverwrite(path) => KitError::UntrackedOverwrite(path),
        }
    }
}
