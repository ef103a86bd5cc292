use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let tree = Tree::new(
            index
                .entries()
                .map(|(path, oid)| (path.clone(), oid.clone()))
                .collect(),
        );
        let tree_id = self.database().store(&tree)?;

        let parent = self.refs().resolve_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };
        let head_label = match self.refs().read_head()? {
            Head::Attached(branch_name) => branch_name.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        };

        let message = message.trim().to_string();
        let commit = Commit::new(
            parent.into_iter().collect(),
            tree_id,
            Commit::timestamp_now(),
            message,
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().advance_head(&commit_id)?;

        write!(
            self.writer(),
            "[{} {}{}] {}",
            head_label,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
