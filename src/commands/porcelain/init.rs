use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;

pub const DEFAULT_BRANCH: &str = "main";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .kit/refs directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .kit/refs/heads directory")?;

        // attach HEAD to the default branch; the branch ref file itself only
        // appears with the first commit, so the branch starts out unborn.
        // Re-running init must not clobber an existing HEAD.
        if !self.refs().head_path().exists() {
            let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
            self.refs()
                .move_head(&Head::Attached(default_branch))
                .context("Failed to create initial HEAD reference")?;
        }

        let index = self.index();
        let index = index.lock().await;
        // create the index file if it does not exist
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .kit/index file")?;
        }

        write!(
            self.writer(),
            "Initialized empty Kit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
