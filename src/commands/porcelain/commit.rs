use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::objects::commit::{Commit, CommitTime};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let mut staging = self.staging();

        // Load the staging area from the disk
        staging.rehydrate()?;

        if staging.is_empty() {
            return Err(TwigError::NothingToCommit.into());
        }

        let parent = self.refs().read_head()?;
        let commit_id = self.write_commit(&mut staging, vec![parent], message)?;

        let commit = self.database().parse_object_as_commit(&commit_id)?;
        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }

    /// Record the staged snapshot on top of the first parent and move the
    /// current branch to it
    ///
    /// The commit object is stored before the branch moves; the staging area is
    /// cleared last.
    pub(crate) fn write_commit(
        &self,
        staging: &mut StagingArea,
        parents: Vec<ObjectId>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let base_snapshot = match parents.first() {
            Some(parent) => self.database().parse_object_as_commit(parent)?.into_snapshot(),
            None => Default::default(),
        };
        let snapshot = staging.apply_to(base_snapshot);

        let commit = Commit::new(
            parents,
            snapshot,
            CommitTime::load_from_env(),
            message.to_string(),
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        staging.clear();
        staging.write_updates()?;

        tracing::info!(commit = %commit_id, parents = commit.parents().len(), "commit written");
        Ok(commit_id)
    }
}
