//! Branch pointers and HEAD
//!
//! Branches are text files under `.twig/refs/heads/` holding the 40-hex id of
//! their tip commit. `HEAD` is always symbolic (`ref: refs/heads/<branch>`)
//! and names the checked-out branch; it is never detached.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.twig`)
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at `branch_name` without checking that the branch exists
    ///
    /// Used while bootstrapping a repository and after a successful checkout.
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), SymRefName::from(branch_name).to_string())?;
        tracing::debug!(branch = %branch_name, "HEAD moved");
        Ok(())
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let sym_ref = SymRefName::try_parse(&content)
            .with_context(|| format!("HEAD is not a symbolic ref: {:?}", content.trim()))?;

        BranchName::try_parse_sym_ref_name(&sym_ref)
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Tip commit of the checked-out branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;

        self.read_branch(&branch_name)?
            .with_context(|| format!("current branch {branch_name} has no tip commit"))
    }

    /// Move the checked-out branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_name = self.current_branch()?;
        self.update_branch(&branch_name, oid)
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref().to_string())?;
        tracing::debug!(branch = %branch_name, oid = %oid, "branch moved");
        Ok(())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);
        if branch_path.is_file() {
            return Err(TwigError::BranchExists.into());
        }

        // `a` and `a/b` cannot both be branches
        let heads_path = self.heads_path();
        let clashes_with_prefix = branch_path
            .ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != &*heads_path)
            .any(Path::is_file);
        if branch_path.is_dir() || clashes_with_prefix {
            return Err(TwigError::InvalidBranchName(branch_name.to_string()).into());
        }

        self.update_branch(branch_name, oid)
    }

    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(branch_name)?
            .ok_or(TwigError::NoSuchBranch)?;

        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        tracing::debug!(branch = %branch_name, oid = %oid, "branch deleted");
        Ok(oid)
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;
        lock.deref_mut().write_all(b"\n")?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.to_path()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
