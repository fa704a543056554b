use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    /// Create `branch_name` at the head commit; HEAD stays where it is
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name)?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete the pointer `branch_name`; its commits stay in the store
    pub fn rm_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name)?;
        if !self.refs().branch_exists(&branch_name) {
            return Err(TwigError::NoSuchBranch.into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::CannotRemoveCurrent.into());
        }

        let tip_oid = self.refs().delete_branch(&branch_name)?;
        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            tip_oid.to_short_oid()
        )?;

        Ok(())
    }
}
