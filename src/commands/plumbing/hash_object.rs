use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::safety::repo_path::RepoPath;
use std::io::Write;

impl Repository {
    /// Hash a working tree file as a blob, optionally storing it.
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let repo_path = RepoPath::clean(object_path)?;
        let object = self.workspace().parse_blob(&repo_path)?;
        let object_id = object.object_id()?;

        write!(self.writer(), "{}", object_id)?;

        if !write {
            return Ok(());
        }

        self.database().store(&object)?;

        Ok(())
    }
}
