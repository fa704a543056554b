use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create `.twig`, store the root commit and check out the default branch on it
    pub fn init(&self) -> anyhow::Result<ObjectId> {
        if self.is_initialized() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let root_oid = self.database().store(&Commit::root())?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH)?;
        self.refs()
            .create_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        self.staging()
            .write_updates()
            .context("Failed to create .twig/index file")?;

        tracing::info!(root = %root_oid, "repository initialized");
        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.twig_path().display()
        )?;

        Ok(root_oid)
    }
}
