//! Checkout migration and conflict detection
//!
//! Materializing a snapshot happens in two phases:
//!
//! 1. Plan: diff the current and target snapshots, then check every changed
//!    path and every path the target keeps against the working directory
//! 2. Apply: delete, modify and add files in the workspace
//!
//! A kept path missing from disk is restored. Files outside both snapshots
//! are never touched.
//!
//! ## Conflict Detection
//!
//! - Stale files: a tracked file was edited and the target writes or deletes it,
//!   even when both snapshots hold the same version
//! - Untracked overwrites: an untracked file, a directory holding untracked
//!   files, or an untracked file standing where a parent directory must go
//!
//! A file whose content already equals the target version never conflicts.

use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::checkout::snapshot_diff::{SnapshotChange, diff_snapshots};
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Modify existing file
    Modify,
}

/// Planned actions grouped by type; deletions carry no blob
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

/// Detected conflicts grouped by type
pub type ConflictsSet = BTreeMap<ConflictType, Vec<PathBuf>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    changes: BTreeMap<PathBuf, SnapshotChange>,
    kept: BTreeMap<PathBuf, ObjectId>,
    actions: ActionsSet,
    conflicts: ConflictsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &Snapshot, target: &Snapshot) -> Self {
        let changes = diff_snapshots(current, target);
        let kept = target
            .iter()
            .filter(|(path, _)| !changes.contains_key(*path))
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect();

        Self {
            repository,
            changes,
            kept,
            actions: ActionsSet::new(),
            conflicts: ConflictsSet::new(),
        }
    }

    pub fn actions_of(&self, action: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check the whole plan, then rewrite the workspace
    ///
    /// Fails with `UntrackedOverwrite` or `UncommittedChanges` before any file
    /// is touched.
    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.repository.workspace().apply_migration(self)?;

        tracing::debug!(
            added = self.actions_of(ActionType::Add).len(),
            modified = self.actions_of(ActionType::Modify).len(),
            deleted = self.actions_of(ActionType::Delete).len(),
            "workspace migrated"
        );
        Ok(())
    }

    pub fn plan_changes(&mut self) -> anyhow::Result<()> {
        self.actions.clear();
        self.conflicts.clear();

        let changes = self
            .changes
            .iter()
            .map(|(path, change)| (path.clone(), change.clone()))
            .collect::<Vec<_>>();

        for (path, change) in &changes {
            self.check_for_conflict(path, change.old_oid(), change.new_oid())?;
            self.record_change(path, change);
        }

        let kept = self.kept.clone();
        for (path, oid) in &kept {
            self.check_for_conflict(path, Some(oid), Some(oid))?;
            if !self.repository.workspace().is_file(path) {
                self.push_action(ActionType::Add, path, Some(oid.clone()));
            }
        }

        // untracked files are reported first, they are the costlier loss
        if let Some((conflict_type, paths)) = self
            .conflicts
            .iter()
            .find(|(_, paths)| !paths.is_empty())
        {
            tracing::info!(?conflict_type, ?paths, "migration refused");
            return Err(TwigError::from(*conflict_type).into());
        }

        Ok(())
    }

    fn check_for_conflict(
        &mut self,
        path: &Path,
        old_oid: Option<&ObjectId>,
        new_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let repository = self.repository;
        let workspace = repository.workspace();

        if workspace.is_dir(path) {
            if new_oid.is_some() && self.directory_obstructs(path)? {
                self.push_conflict(ConflictType::UntrackedOverwritten, path);
            }
            return Ok(());
        }

        if new_oid.is_some()
            && let Some(parent) = self.untracked_parent(path)
        {
            self.push_conflict(ConflictType::UntrackedOverwritten, parent);
            return Ok(());
        }

        if !workspace.is_file(path) {
            return Ok(());
        }

        let disk_oid = workspace.parse_blob(path)?.object_id()?;
        if new_oid == Some(&disk_oid) {
            return Ok(());
        }

        match old_oid {
            Some(old_oid) if old_oid == &disk_oid => {}
            Some(_) => self.push_conflict(ConflictType::StaleFile, path),
            None => self.push_conflict(ConflictType::UntrackedOverwritten, path),
        }

        Ok(())
    }

    fn push_conflict(&mut self, conflict_type: ConflictType, path: &Path) {
        self.conflicts
            .entry(conflict_type)
            .or_default()
            .push(path.to_path_buf());
    }

    /// A directory blocks a file write unless everything inside it is being deleted
    fn directory_obstructs(&self, dir_path: &Path) -> anyhow::Result<bool> {
        Ok(self
            .repository
            .workspace()
            .list_files(Some(dir_path))?
            .iter()
            .any(|file_path| !self.is_deleted(file_path)))
    }

    /// First ancestor of `path` that exists on disk as a file the plan keeps
    fn untracked_parent<'p>(&self, path: &'p Path) -> Option<&'p Path> {
        path.ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .find(|ancestor| {
                self.repository.workspace().is_file(ancestor) && !self.is_deleted(ancestor)
            })
    }

    fn is_deleted(&self, path: &Path) -> bool {
        matches!(self.changes.get(path), Some(SnapshotChange::Deleted(_)))
    }

    fn record_change(&mut self, path: &Path, change: &SnapshotChange) {
        let (action, oid) = match change {
            SnapshotChange::Added(new) => (ActionType::Add, Some(new.clone())),
            SnapshotChange::Deleted(_) => (ActionType::Delete, None),
            SnapshotChange::Modified { new, .. } => (ActionType::Modify, Some(new.clone())),
        };

        self.push_action(action, path, oid);
    }

    fn push_action(&mut self, action: ActionType, path: &Path, oid: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_path_buf(), oid));
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self
            .repository
            .database()
            .parse_object_as_blob(object_id)?
            .into_content())
    }
}
