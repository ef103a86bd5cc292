use crate::areas::repository::Repository;
use crate::artifacts::safety::repo_path::RepoPath;
use crate::errors::KitError;
use std::io::Write;

impl Repository {
    /// Remove files from the index and the working tree.
    ///
    /// A single path is removed all-or-nothing. With several paths each one
    /// is attempted independently and failures are reported without stopping
    /// the rest; the command then fails if anything could not be removed.
    pub async fn rm(&mut self, paths: &[String], force: bool) -> anyhow::Result<()> {
        if let [path] = paths {
            return self.rm_single(path, force).await;
        }

        let mut failed = 0usize;
        for path in paths {
            if let Err(error) = self.rm_single(path, force).await {
                eprintln!("error: {:#}", error);
                failed += 1;
            }
        }

        if failed > 0 {
            anyhow::bail!("failed to remove {} of {} paths", failed, paths.len());
        }

        Ok(())
    }

    async fn rm_single(&self, path: &str, force: bool) -> anyhow::Result<()> {
        let repo_path = RepoPath::clean(path)?;

        self.update_index(|index| {
            let staged_oid = index
                .entry_by_path(repo_path.as_str())
                .cloned()
                .ok_or_else(|| KitError::PathspecNotFound(path.to_string()))?;

            if !force
                && let Some(disk_oid) = self.workspace().hash_file(&repo_path)?
                && disk_oid != staged_oid
            {
                return Err(KitError::LocalChangesPresent(repo_path.to_string()).into());
            }

            self.workspace().remove_file(&repo_path)?;
            self.workspace().prune_empty_parents(&repo_path)?;
            index.remove(repo_path.as_str());

            Ok(())
        })
        .await?;

        writeln!(self.writer(), "rm '{}'", repo_path)?;

        Ok(())
    }
}
