use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::lca_finder::LCAFinder;
use crate::artifacts::merge::resolution::{MergeResolution, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

pub const ANCESTOR_MESSAGE: &str = "Given branch is an ancestor of the current branch.";
pub const FAST_FORWARD_MESSAGE: &str = "Current branch fast-forwarded.";
pub const CONFLICT_MESSAGE: &str = "Encountered a merge conflict.";

/// How a merge ended; conflicts are an outcome, not a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already part of the current history
    AlreadyMerged,
    /// The current branch moved to the given tip, no commit was made
    FastForward(ObjectId),
    Merged {
        commit: ObjectId,
        conflicts: BTreeSet<PathBuf>,
    },
}

impl MergeOutcome {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

impl Repository {
    pub fn merge(&self, branch: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        if !staging.is_empty() {
            return Err(TwigError::UncommittedChanges.into());
        }

        let given_branch = BranchName::try_parse(branch)?;
        let given_oid = self
            .refs()
            .read_branch(&given_branch)?
            .ok_or(TwigError::NoSuchBranch)?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == given_branch {
            return Err(TwigError::SelfMerge.into());
        }

        let (current_oid, current_commit) = self.head_commit()?;
        let given_commit = self.database().parse_object_as_commit(&given_oid)?;

        let base_oid = self.merge_base(&current_oid, &given_oid)?;
        tracing::debug!(
            current = %current_oid,
            given = %given_oid,
            base = ?base_oid,
            "merge base found"
        );

        if base_oid.as_ref() == Some(&given_oid) {
            writeln!(self.writer(), "{ANCESTOR_MESSAGE}")?;
            return Ok(MergeOutcome::AlreadyMerged);
        }

        if base_oid.as_ref() == Some(&current_oid) {
            self.migrate_between(current_commit.snapshot(), given_commit.snapshot())?;
            self.refs().update_head(&given_oid)?;

            writeln!(self.writer(), "{FAST_FORWARD_MESSAGE}")?;
            return Ok(MergeOutcome::FastForward(given_oid));
        }

        let base_snapshot = match &base_oid {
            Some(base_oid) => self.database().parse_object_as_commit(base_oid)?.into_snapshot(),
            None => Snapshot::new(),
        };

        // conflict files are stored before the workspace or any ref changes
        let resolution = MergeResolution::resolve(
            &base_snapshot,
            current_commit.snapshot(),
            given_commit.snapshot(),
            |current, given| self.store_conflict(current, given),
        )?;

        self.migrate_between(current_commit.snapshot(), &resolution.snapshot)?;

        for (path, oid) in &resolution.snapshot {
            if current_commit.tracked(path) != Some(oid) {
                staging.stage_addition(path.clone(), oid.clone());
            }
        }
        for path in current_commit.snapshot().keys() {
            if !resolution.snapshot.contains_key(path) {
                staging.stage_removal(path.clone());
            }
        }

        let message = format!("Merged {given_branch} into {current_branch}.");
        let commit_oid =
            self.write_commit(&mut staging, vec![current_oid, given_oid], &message)?;

        let outcome = MergeOutcome::Merged {
            commit: commit_oid,
            conflicts: resolution.conflicts,
        };
        if outcome.is_conflicted() {
            writeln!(self.writer(), "{CONFLICT_MESSAGE}")?;
        }

        Ok(outcome)
    }

    fn merge_base(
        &self,
        current_oid: &ObjectId,
        given_oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        let lca_finder = LCAFinder::new(|oid: &ObjectId| {
            commit_cache.get_or_load_slim_commit(database, oid)
        });
        lca_finder.find_lowest_common_ancestor(current_oid, given_oid)
    }

    fn store_conflict(
        &self,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let current = self.blob_content_or_empty(current)?;
        let given = self.blob_content_or_empty(given)?;

        self.database()
            .store(&Blob::new(conflict_content(&current, &given)))
    }

    fn blob_content_or_empty(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => Ok(self.database().parse_object_as_blob(oid)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }
}
