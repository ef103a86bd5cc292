use crate::artifacts::checkout::migration::{Change, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::safety::ignore_rules::IgnoreRules;
use crate::artifacts::safety::repo_path::{KIT_DIR, RepoPath};
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [KIT_DIR, ".", ".."];

/// Working tree access
///
/// All paths are repository-relative and validated; the metadata directory
/// is invisible to every listing and mutation.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_blob(&self, path: &RepoPath) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        Ok(Blob::new(data))
    }

    /// List the files under a directory (or the whole working tree),
    /// repository-relative, forward-slashed and sorted.
    ///
    /// Ignore rules filter the listing; the metadata directory is always
    /// excluded.
    pub fn list_files(
        &self,
        dir: Option<&RepoPath>,
        ignore_rules: &IgnoreRules,
    ) -> anyhow::Result<Vec<String>> {
        let base = match dir {
            Some(p) => self.path.join(p.as_str()),
            None => self.path.to_path_buf(),
        };

        if !base.exists() {
            anyhow::bail!("the specified path does not exist: {:?}", base);
        }

        let mut files = WalkDir::new(&base)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file() && !Self::is_ignored(entry.path()))
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                Some(relative_path.to_string_lossy().replace('\\', "/"))
            })
            .filter_map(|path| match RepoPath::clean(&path) {
                Ok(repo_path) if !ignore_rules.is_ignored(&repo_path) => Some(path),
                _ => None,
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    pub fn file_exists(&self, path: &RepoPath) -> bool {
        self.path.join(path.as_str()).is_file()
    }

    pub fn dir_exists(&self, path: &RepoPath) -> bool {
        self.path.join(path.as_str()).is_dir()
    }

    pub fn read_file(&self, path: &RepoPath) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(path.as_str());

        let content = std::fs::read(&file_path)
            .with_context(|| format!("failed to read file {:?}", file_path))?;

        Ok(content.into())
    }

    /// Write a file, creating missing parent directories. An existing
    /// directory at the path is replaced.
    pub fn write_file(&self, path: &RepoPath, data: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(path.as_str());

        if file_path.is_dir() {
            std::fs::remove_dir_all(&file_path)
                .with_context(|| format!("failed to remove directory at {:?}", file_path))?;
        }

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directories for {:?}", parent))?;
        }

        std::fs::write(&file_path, data)
            .with_context(|| format!("failed to write file {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file if it exists. A path that is already gone is not an
    /// error.
    pub fn remove_file(&self, path: &RepoPath) -> anyhow::Result<()> {
        let file_path = self.path.join(path.as_str());

        match std::fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove file {:?}", file_path))
            }
        }
    }

    /// Remove the now-empty parent directories of a deleted file, stopping
    /// at the workspace root or the first non-empty directory.
    pub fn prune_empty_parents(&self, path: &RepoPath) -> anyhow::Result<()> {
        let full_path = self.path.join(path.as_str());
        self.prune_empty_parent_dirs(full_path.as_path())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.exists()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("failed to remove empty directory at {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    /// Hash a file's content the way the object store would.
    ///
    /// Returns None when no regular file exists at the path.
    pub fn hash_file(&self, path: &RepoPath) -> anyhow::Result<Option<ObjectId>> {
        if !self.file_exists(path) {
            return Ok(None);
        }

        let blob = self.parse_blob(path)?;
        Ok(Some(blob.object_id()?))
    }

    // The order of applying migrations is important:
    // deletions run first, then their emptied parent directories are pruned,
    // and only then are new file contents written.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (path, change) in migration.changes() {
            if let Change::Delete = change {
                let repo_path = RepoPath::clean(path)?;
                self.remove_file(&repo_path)?;
                self.prune_empty_parents(&repo_path)?;
            }
        }

        for (path, change) in migration.changes() {
            if let Change::Write(oid) = change {
                let repo_path = RepoPath::clean(path)?;
                let data = migration.load_blob_data(oid)?;
                self.write_file(&repo_path, &data)?;
            }
        }

        Ok(())
    }
}
