//! Working tree migration and conflict detection
//!
//! Switching the working tree to a different snapshot involves:
//!
//! 1. Diffing the current index against the target snapshot
//! 2. Detecting conflicts with local changes
//! 3. Applying the planned writes and deletions to the workspace
//! 4. Replacing the index contents with the target snapshot
//!
//! ## Safety
//!
//! All changes are planned and checked before any file is touched, so a
//! conflicting migration leaves the working tree and index exactly as they
//! were. A forced migration skips the local-changes check but still refuses
//! to overwrite untracked files with different content.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::Conflict;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::safety::repo_path::RepoPath;
use crate::errors::KitError;
use bytes::Bytes;
use std::collections::BTreeMap;

/// A single planned file system change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Write the blob with this digest to the path.
    Write(ObjectId),
    /// Delete the file at the path.
    Delete,
}

/// Migration planner and executor.
///
/// Plans the flat set of writes and deletions that turn the current index
/// state into the target snapshot, gates them on conflicts, and applies them.
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Target snapshot as flat path to digest entries.
    target: BTreeMap<String, ObjectId>,
    /// Planned changes, keyed by path.
    changes: BTreeMap<String, Change>,
    /// Skip the local-changes gate (reset --hard).
    force: bool,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        target: BTreeMap<String, ObjectId>,
        force: bool,
    ) -> Self {
        Self {
            repository,
            target,
            changes: BTreeMap::new(),
            force,
        }
    }

    pub fn changes(&self) -> &BTreeMap<String, Change> {
        &self.changes
    }

    /// Plan, gate and apply the migration. On success the workspace matches
    /// the target snapshot and the index has been replaced to mirror it.
    pub fn apply_changes(&mut self, index: &mut Index) -> anyhow::Result<()> {
        self.plan_changes(index);
        self.check_conflicts(index)?;

        self.repository.workspace().apply_migration(self)?;
        index.replace_all(self.target.clone());

        Ok(())
    }

    fn plan_changes(&mut self, index: &Index) {
        for (path, target_oid) in &self.target {
            match index.entry_by_path(path) {
                Some(current_oid) if current_oid == target_oid => {}
                _ => {
                    self.changes
                        .insert(path.clone(), Change::Write(target_oid.clone()));
                }
            }
        }

        for (path, _) in index.entries() {
            if !self.target.contains_key(path) {
                self.changes.insert(path.clone(), Change::Delete);
            }
        }
    }

    /// Walk the planned changes and collect every conflict before reporting.
    /// The first conflict in path order aborts the migration.
    fn check_conflicts(&self, index: &Index) -> anyhow::Result<()> {
        let mut conflicts = Vec::new();
        let workspace = self.repository.workspace();

        for (path, change) in &self.changes {
            let repo_path = RepoPath::clean(path)?;

            match index.entry_by_path(path) {
                Some(staged_oid) => {
                    // A tracked file missing on disk never conflicts.
                    if !self.force
                        && let Some(disk_oid) = workspace.hash_file(&repo_path)?
                        && disk_oid != *staged_oid
                    {
                        conflicts.push(Conflict::LocalChanges(path.clone()));
                    }
                }
                None => {
                    if let Change::Write(incoming_oid) = change
                        && let Some(disk_oid) = workspace.hash_file(&repo_path)?
                        && disk_oid != *incoming_oid
                    {
                        conflicts.push(Conflict::UntrackedOverwrite(path.clone()));
                    }
                }
            }
        }

        match conflicts.into_iter().next() {
            Some(conflict) => Err(KitError::from(conflict).into()),
            None => Ok(()),
        }
    }

    pub fn load_blob_data(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        let blob = self
            .repository
            .database()
            .parse_object_as_blob(oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a blob", oid))?;

        Ok(blob.into_content())
    }
}
