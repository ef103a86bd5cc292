//! Staging area
//!
//! The index tracks which files should be included in the next commit.
//! It maps repository-relative paths to blob digests.
//!
//! ## Index File Format
//!
//! The index is persisted as a JSON object whose keys are paths and whose
//! values are 40-character digests. An absent or empty file is an empty
//! index. Updates are written to a temp file first and renamed over the
//! index, so readers never observe a partial write.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Staging area contents
///
/// Tracks files staged for the next commit. The in-memory state is only
/// meaningful after `rehydrate`, and only persisted by `write_updates`.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Tracked paths mapped to their staged blob digests
    entries: BTreeMap<String, ObjectId>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn is_tracked(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.changed = false;
    }

    /// Load the index from disk, replacing the in-memory state.
    ///
    /// An absent or empty index file yields an empty index without creating
    /// the file.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = Vec::new();
        lock.deref_mut().read_to_end(&mut content)?;

        // an empty index file is a valid empty index
        if content.is_empty() {
            return Ok(());
        }

        self.entries = serde_json::from_slice(&content)
            .with_context(|| format!("failed to parse index file at {:?}", self.path()))?;

        Ok(())
    }

    pub fn add(&mut self, path: String, oid: ObjectId) {
        self.entries.insert(path, oid);
        self.changed = true;
    }

    /// Remove a path from the index. Returns false if the path was not
    /// tracked.
    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            self.changed = true;
        }

        removed
    }

    /// Replace the whole index contents with the given snapshot.
    pub fn replace_all(&mut self, entries: BTreeMap<String, ObjectId>) {
        self.entries = entries;
        self.changed = true;
    }

    /// Persist the in-memory state by atomically replacing the index file.
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// index, so a crash mid-write leaves the previous index intact.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let content = serde_json::to_vec_pretty(&self.entries)
            .context("failed to serialize index contents")?;

        let index_dir = self
            .path
            .parent()
            .with_context(|| format!("invalid index path {:?}", self.path()))?;
        let temp_index_path = index_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_index_path)
            .with_context(|| format!("failed to open temp index file {:?}", temp_index_path))?;
        file.write_all(&content)
            .with_context(|| format!("failed to write temp index file {:?}", temp_index_path))?;

        std::fs::rename(&temp_index_path, self.path())
            .with_context(|| format!("failed to replace index file at {:?}", self.path()))?;

        self.changed = false;

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn generate_temp_name() -> String {
        format!("tmp-idx-{}", rand::random::<u32>())
    }
}
