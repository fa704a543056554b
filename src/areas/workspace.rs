use crate::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [REPOSITORY_DIR];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into a path relative to the workspace root
    ///
    /// `.` components are dropped and `..` is resolved lexically; paths that
    /// escape the workspace or point into the repository directory are refused.
    pub fn normalize_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path)
                .with_context(|| format!("{} is outside the repository", path.display()))?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => normalized.push(name),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        anyhow::bail!("{} is outside the repository", path.display());
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    anyhow::bail!("{} is outside the repository", path.display())
                }
            }
        }

        if Self::is_ignored(&normalized) {
            anyhow::bail!("{} is inside the repository directory", path.display());
        }

        Ok(normalized)
    }

    /// Every regular file under `root` (the whole workspace when `None`), relative
    /// to the workspace root and sorted
    ///
    /// Fails with `FileNotFound` when `root` does not exist.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_path = match root {
            Some(root) => self.path.join(root),
            None => self.path.to_path_buf(),
        };

        if !root_path.exists() {
            return Err(TwigError::FileNotFound.into());
        }

        let mut files = WalkDir::new(&root_path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored_name(entry.file_name()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => Self::is_ignored_name(name),
            _ => false,
        })
    }

    fn is_ignored_name(name: &std::ffi::OsStr) -> bool {
        IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, dir_path: &Path) -> bool {
        self.path.join(dir_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        if !full_path.is_file() {
            return Err(TwigError::FileNotFound.into());
        }

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Write `content` to `file_path`, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete `file_path` if present, then prune the directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(file_path)
    }

    fn prune_empty_parent_dirs(&self, file_path: &Path) -> anyhow::Result<()> {
        for ancestor in file_path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }

            let dir_path = self.path.join(ancestor);
            let is_empty = match std::fs::read_dir(&dir_path) {
                Ok(mut entries) => entries.next().is_none(),
                Err(_) => break,
            };
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Failed to remove directory: {:?}", ancestor))?;
        }

        Ok(())
    }

    // Deletions go first so a file can replace a directory it used to live in,
    // and the other way round.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (file_path, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, oid) in migration.actions_of(action) {
                let oid = oid
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("Invalid action and entry combination"))?;
                let data = migration.load_blob_data(oid)?;

                self.write_file(file_path, &data)?;
            }
        }

        Ok(())
    }
}
