use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    /// Restore `path` as recorded in the commit named by `revision`
    ///
    /// `revision` may be abbreviated. Staging is left alone.
    pub fn checkout_file(&self, revision: &str, path: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = self.database().resolve_commit(revision)?;
        self.restore_file(&commit_oid, path)
    }

    /// Restore `path` as recorded in the head commit
    pub fn checkout_head_file(&self, path: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;
        self.restore_file(&head_oid, path)
    }

    /// Switch to `branch`, rewriting the working directory to its tip
    pub fn checkout_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch)?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(TwigError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::AlreadyOnBranch.into());
        }

        let mut staging = self.staging();
        staging.rehydrate()?;

        self.migrate_to(&target_oid)?;
        self.refs().set_head(&branch_name)?;

        staging.clear();
        staging.write_updates()?;

        eprintln!("Switched to branch '{branch_name}'");
        Ok(())
    }

    fn restore_file(&self, commit_oid: &ObjectId, path: &Path) -> anyhow::Result<()> {
        let path = self.workspace().normalize_path(path)?;
        let commit = self.database().parse_object_as_commit(commit_oid)?;

        let blob_oid = commit.tracked(&path).ok_or(TwigError::FileNotInCommit)?;
        let blob = self.database().parse_object_as_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())?;
        tracing::debug!(path = %path.display(), commit = %commit_oid, "file restored");

        Ok(())
    }

    /// Rewrite the working directory from the head snapshot to `target_oid`'s
    pub(crate) fn migrate_to(&self, target_oid: &ObjectId) -> anyhow::Result<()> {
        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().parse_object_as_commit(target_oid)?;

        self.migrate_between(head_commit.snapshot(), target_commit.snapshot())
    }

    /// Check every path first, then apply; nothing is touched on refusal
    pub(crate) fn migrate_between(&self, current: &Snapshot, target: &Snapshot) -> anyhow::Result<()> {
        let mut migration = Migration::new(self, current, target);
        migration.apply_changes()
    }
}
