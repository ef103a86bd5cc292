use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use std::io::Write;

impl Repository {
    /// Create a branch at the current HEAD commit, or list branches when no
    /// name is given.
    pub async fn branch(&mut self, branch_name: Option<&str>) -> anyhow::Result<()> {
        match branch_name {
            Some(branch_name) => self.create_branch_from_head(branch_name),
            None => self.print_branch_list(),
        }
    }

    fn create_branch_from_head(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().require_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    fn print_branch_list(&mut self) -> anyhow::Result<()> {
        let current_branch = match self.refs().read_head()? {
            Head::Attached(branch_name) => Some(branch_name),
            Head::Detached(_) => None,
        };

        for branch in self.refs().list_branches()? {
            let marker = if Some(&branch) == current_branch.as_ref() {
                "*"
            } else {
                " "
            };
            writeln!(self.writer(), "{} {}", marker, branch)?;
        }

        Ok(())
    }
}
