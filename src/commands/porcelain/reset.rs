use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use std::io::Write;

/// How much repository state a reset rewinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Move HEAD only.
    Soft,
    /// Move HEAD and replace the index.
    Mixed,
    /// Move HEAD, replace the index and rewrite the working tree.
    Hard,
}

impl Repository {
    /// Move the current HEAD target to the given revision, optionally
    /// resetting the index and working tree to match it.
    ///
    /// The index and working tree are rewritten before HEAD moves, so an
    /// interrupted reset never leaves HEAD pointing at a commit the index
    /// has not caught up with.
    pub async fn reset(&mut self, target: &str, mode: ResetMode) -> anyhow::Result<()> {
        let revision = Revision::try_parse(target)?;
        let target_oid = revision.resolve(self)?;
        let commit = self
            .database()
            .parse_object_as_commit(&target_oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", target_oid))?;

        match mode {
            ResetMode::Soft => {}
            ResetMode::Mixed => {
                let target_snapshot = self.load_commit_snapshot(&target_oid)?;
                self.update_index(|index| {
                    index.replace_all(target_snapshot);
                    Ok(())
                })
                .await?;
            }
            ResetMode::Hard => {
                let target_snapshot = self.load_commit_snapshot(&target_oid)?;
                self.update_index(|index| {
                    Migration::new(self, target_snapshot, true).apply_changes(index)
                })
                .await?;
            }
        }

        self.refs().advance_head(&target_oid)?;

        if mode == ResetMode::Hard {
            writeln!(
                self.writer(),
                "HEAD is now at {} {}",
                target_oid.to_short_oid(),
                commit.short_message()
            )?;
        }

        Ok(())
    }
}
