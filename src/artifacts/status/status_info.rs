use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

/// Classified view of the workspace against HEAD and the staging area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

impl StatusInfo {
    /// Nothing staged, nothing changed, nothing untracked
    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.removed_files.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }

    pub fn render(&self, writer: &mut dyn std::io::Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(writer, "{} {}", path.display(), change)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(writer, "{}", path.display().to_string().red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, staging: &StagingArea) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let current_branch = refs.current_branch()?;
        let branches = refs.list_branches()?;

        let (_, head_commit) = self.repository.head_commit()?;
        let head_snapshot = head_commit.snapshot();
        let inspector = Inspector::new(self.repository);

        let mut workspace_changeset = ChangeSet::new();

        // tracked files nobody staged
        for (path, oid) in head_snapshot {
            if staging.staged_addition(path).is_some() || staging.is_staged_for_removal(path) {
                continue;
            }
            if let Some(change) = inspector.check_against_workspace(path, oid)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        // staged content that changed again on disk
        for (path, oid) in staging.additions() {
            if let Some(change) = inspector.check_against_workspace(path, oid)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        let untracked_files = self
            .repository
            .workspace()
            .list_files(None)?
            .into_iter()
            .filter(|path| {
                !head_snapshot.contains_key(path) && staging.staged_addition(path).is_none()
            })
            .collect::<FileSet>();

        Ok(StatusInfo {
            current_branch,
            branches,
            staged_files: staging.additions().keys().cloned().collect(),
            removed_files: staging.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}
