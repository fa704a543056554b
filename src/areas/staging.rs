//! Staging area
//!
//! Pending edits for the next commit: an addition set (path -> blob id) and a
//! removal set (paths). Both are persisted in `.twig/index` with a trailing
//! checksum and cleared by a successful commit.
//!
//! A path never sits in both sets; staging it on one side drops it from the other.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::HEADER_SIZE;
use crate::artifacts::staging::checksum::Checksum;
use crate::artifacts::staging::staged_entry::StagedEntry;
use crate::artifacts::staging::staging_header::StagingHeader;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Path to the staging file (`.twig/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    /// Set when the in-memory sets diverge from the file
    changed: bool,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn staged_addition(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.removals.remove(&path);
        self.additions.insert(path, oid);
        self.changed = true;
    }

    pub fn stage_removal(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
        self.changed = true;
    }

    /// Drop any pending edit for `path`, returning whether there was one
    pub fn unstage(&mut self, path: &Path) -> bool {
        let was_staged = self.additions.remove(path).is_some() | self.removals.remove(path);
        self.changed |= was_staged;
        was_staged
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.additions.clear();
        self.removals.clear();
    }

    /// Snapshot of the next commit: `base` with additions applied, then removals
    pub fn apply_to(&self, mut base: Snapshot) -> Snapshot {
        for (path, oid) in &self.additions {
            base.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            base.remove(path);
        }
        base
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty file is an empty staging area. The trailing checksum
    /// is verified; a mismatch is reported as corruption.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the staging file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut staging_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut staging_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);

        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StagingHeader::deserialize(std::io::Cursor::new(header_bytes))?;
        header.validate()?;

        let entries_count = header.additions_count + header.removals_count;
        for _ in 0..entries_count {
            match StagedEntry::parse(|size| reader.read(size))? {
                StagedEntry::Addition { path, oid } => {
                    self.additions.insert(path, oid);
                }
                StagedEntry::Removal { path } => {
                    self.removals.insert(path);
                }
            }
        }

        if self.additions.len() != header.additions_count as usize
            || self.removals.len() != header.removals_count as usize
        {
            anyhow::bail!("Staging file entries do not match its header");
        }

        reader.verify()?;

        tracing::trace!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "loaded staging area"
        );
        Ok(())
    }

    /// Persist the staging area, replacing the previous file
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the staging file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut staging_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let lock = file_guard::lock(&mut staging_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header =
            StagingHeader::with_counts(self.additions.len() as u32, self.removals.len() as u32);
        writer.write(&header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "staging area written"
        );
        Ok(())
    }

    fn entries(&self) -> impl Iterator<Item = StagedEntry> + '_ {
        let additions = self
            .additions
            .iter()
            .map(|(path, oid)| StagedEntry::Addition {
                path: path.clone(),
                oid: oid.clone(),
            });
        let removals = self
            .removals
            .iter()
            .map(|path| StagedEntry::Removal { path: path.clone() });

        additions.chain(removals)
    }
}
