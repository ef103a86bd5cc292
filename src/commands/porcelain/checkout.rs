use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    kit branch <new-branch-name>
"#;

impl Repository {
    /// Switch the working tree, index and HEAD to the given revision.
    ///
    /// With `create_branch` the target is taken as a new branch name to be
    /// created at the current HEAD; the working tree is left untouched.
    pub async fn checkout(&mut self, target: &str, create_branch: bool) -> anyhow::Result<()> {
        if create_branch {
            return self.checkout_new_branch(target);
        }

        let previous_head = self.refs().read_head()?;
        let previous_oid = self.refs().resolve_head()?;

        let revision = Revision::try_parse(target)?;
        let target_oid = revision.resolve(self)?;
        let new_head = match &revision {
            Revision::Head => previous_head.clone(),
            Revision::Ref(branch_name) => {
                if self.refs().branch_exists(branch_name) {
                    Head::Attached(branch_name.clone())
                } else {
                    // resolved as a commit digest, not a branch
                    Head::Detached(target_oid.clone())
                }
            }
        };

        let target_snapshot = self.load_commit_snapshot(&target_oid)?;
        self.update_index(|index| {
            Migration::new(self, target_snapshot, false).apply_changes(index)
        })
        .await?;

        self.refs().move_head(&new_head)?;

        self.print_previous_head(&previous_head, previous_oid.as_ref(), &target_oid)?;
        self.print_detachment_notice(&previous_head, &new_head, target);
        self.print_new_head(&previous_head, &new_head, &target_oid, target)?;

        Ok(())
    }

    fn checkout_new_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        match self.refs().resolve_head()? {
            Some(head_oid) => self.refs().create_branch(&branch_name, &head_oid)?,
            // unborn HEAD: the new branch starts unborn too, so only the
            // symref moves
            None => {
                if self.refs().branch_exists(&branch_name) {
                    return Err(KitError::BranchAlreadyExists(branch_name.to_string()).into());
                }
            }
        }

        self.refs().move_head(&Head::Attached(branch_name.clone()))?;
        eprintln!("Switched to a new branch '{}'", branch_name);

        Ok(())
    }

    fn print_previous_head(
        &self,
        previous_head: &Head,
        previous_oid: Option<&ObjectId>,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        if let Head::Detached(_) = previous_head
            && let Some(previous_oid) = previous_oid
            && previous_oid != target_oid
        {
            self.print_head_position("Previous HEAD position was", previous_oid)?;
        }

        Ok(())
    }

    fn print_detachment_notice(&self, previous_head: &Head, new_head: &Head, target: &str) {
        if matches!(previous_head, Head::Attached(_)) && matches!(new_head, Head::Detached(_)) {
            eprintln!("Note: checking out '{}'.\n{}", target, DETACHMENT_NOTICE);
        }
    }

    fn print_new_head(
        &self,
        previous_head: &Head,
        new_head: &Head,
        target_oid: &ObjectId,
        target: &str,
    ) -> anyhow::Result<()> {
        match new_head {
            Head::Detached(_) => self.print_head_position("HEAD is now at", target_oid)?,
            Head::Attached(_) if new_head == previous_head => {
                eprintln!("Already on '{}'", target);
            }
            Head::Attached(_) => eprintln!("Switched to branch '{}'", target),
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self
            .database()
            .parse_object_as_commit(oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", oid))?;

        eprintln!("{} {} {}", message, oid.to_short_oid(), commit.short_message());
        Ok(())
    }
}
