use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::safety::repo_path::KIT_DIR;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the advisory lock file inside the metadata directory
pub const LOCK_FILE: &str = "kit.lock";

/// Advisory repository lock.
///
/// Held for the duration of a mutating command; concurrent invocations block
/// until the holder releases it by dropping the guard.
pub struct RepoLock {
    _guard: FileGuard<Box<File>>,
}

impl RepoLock {
    pub fn acquire(kit_path: &Path) -> anyhow::Result<Self> {
        let lock_path = kit_path.join(LOCK_FILE);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open lock file at {:?}", lock_path))?;

        let guard = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("failed to lock repository at {:?}", lock_path))?;

        Ok(RepoLock { _guard: guard })
    }
}

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let kit_path = path.join(KIT_DIR);
        let index = Index::new(kit_path.join("index").into_boxed_path());
        let database = Database::new(kit_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(kit_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_path(&self) -> PathBuf {
        self.path.join(KIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load the flat tree snapshot behind a commit.
    pub fn load_commit_snapshot(
        &self,
        commit_oid: &ObjectId,
    ) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let commit = self
            .database()
            .parse_object_as_commit(commit_oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", commit_oid))?;
        let tree = self
            .database()
            .parse_object_as_tree(commit.tree_oid())?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a tree", commit.tree_oid()))?;

        Ok(tree.into_entries())
    }

    /// Run a mutation against the freshly loaded index, persisting it only
    /// when the mutation succeeds.
    ///
    /// The index file is re-read under the lock, so the mutator always sees
    /// the latest on-disk state. A failing mutator leaves the index file
    /// untouched.
    pub async fn update_index<T>(
        &self,
        mutator: impl FnOnce(&mut Index) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;
        let result = mutator(&mut index)?;
        index.write_updates()?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;

    fn scratch_repository(temp: &assert_fs::TempDir) -> Repository {
        std::fs::create_dir_all(temp.path().join(KIT_DIR)).unwrap();
        Repository::new(temp.path().to_str().unwrap(), Box::new(std::io::sink())).unwrap()
    }

    #[tokio::test]
    async fn concurrent_index_updates_all_land() {
        let temp = assert_fs::TempDir::new().unwrap();
        let repository = scratch_repository(&temp);

        let updates = (0..16).map(|i| {
            let repository = &repository;
            async move {
                repository
                    .update_index(|index| {
                        let oid = ObjectId::try_parse(format!("{:040x}", i))?;
                        index.add(format!("file-{i}.txt"), oid);
                        Ok(())
                    })
                    .await
            }
        });

        let results = futures::future::join_all(updates).await;
        assert!(results.iter().all(|r| r.is_ok()));

        let index = repository.index();
        let mut index = index.lock().await;
        index.rehydrate().unwrap();
        assert_eq!(index.len(), 16);
    }

    #[tokio::test]
    async fn failing_mutator_leaves_index_file_untouched() {
        let temp = assert_fs::TempDir::new().unwrap();
        let repository = scratch_repository(&temp);

        repository
            .update_index(|index| {
                index.add(
                    "kept.txt".to_string(),
                    ObjectId::try_parse("a".repeat(40))?,
                );
                Ok(())
            })
            .await
            .unwrap();

        let result: anyhow::Result<()> = repository
            .update_index(|index| {
                index.add(
                    "discarded.txt".to_string(),
                    ObjectId::try_parse("b".repeat(40))?,
                );
                anyhow::bail!("mutation failed after staging")
            })
            .await;
        assert!(result.is_err());

        let index = repository.index();
        let mut index = index.lock().await;
        index.rehydrate().unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.is_tracked("kept.txt"));
        assert!(!index.is_tracked("discarded.txt"));
    }
}
