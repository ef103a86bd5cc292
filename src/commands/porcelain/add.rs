use crate::areas::repository::Repository;
use crate::artifacts::safety::ignore_rules::IgnoreRules;
use crate::artifacts::safety::repo_path::RepoPath;
use crate::errors::KitError;

impl Repository {
    /// Stage files for the next commit.
    ///
    /// Directory arguments expand to every non-ignored file beneath them;
    /// explicitly named files are staged even when ignored. Each staged file
    /// is stored as a blob and recorded in the index under its digest.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let expanded = self.expand_paths(paths)?;

        self.update_index(|index| {
            for path in &expanded {
                let blob = self.workspace().parse_blob(path)?;
                let blob_id = self.database().store(&blob)?;

                index.add(path.to_string(), blob_id);
            }

            Ok(())
        })
        .await
    }

    /// Expand each argument into the staged file list: a file stands for
    /// itself, a directory for the non-ignored files beneath it.
    fn expand_paths(&self, paths: &[String]) -> anyhow::Result<Vec<RepoPath>> {
        let ignore_rules = IgnoreRules::load(self.workspace().path())?;
        let mut expanded = Vec::new();

        for raw in paths {
            let repo_path = RepoPath::clean(raw)?;

            if self.workspace().file_exists(&repo_path) {
                expanded.push(repo_path);
            } else if repo_path.is_root() || self.workspace().dir_exists(&repo_path) {
                for path in self
                    .workspace()
                    .list_files(Some(&repo_path), &ignore_rules)?
                {
                    expanded.push(RepoPath::clean(&path)?);
                }
            } else {
                return Err(KitError::PathspecNotFound(raw.clone()).into());
            }
        }

        Ok(expanded)
    }
}
